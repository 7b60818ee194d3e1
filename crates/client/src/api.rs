//! Resource client.
//!
//! One typed call per REST endpoint. The trait is the seam the workflows and dashboards are
//! written against; [`HttpApi`] is the reqwest implementation and `MockResourceApi` is generated
//! for tests.

use async_trait::async_trait;
use classdesk_core::errors::{DeskError, DeskResult};
use classdesk_core::models::{
    Announcement, Assignment, AttendanceRecord, ChangeRequest, ClassSession, NewAnnouncement,
    NewAssignment, NewChangeRequest, NewClassSession, NewUser, PerformanceRecord, RequestStatus,
    StatusUpdate, StudentProfile, User,
};
use mockall::automock;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::ClientConfig;

#[automock]
#[async_trait]
pub trait ResourceApi: Send + Sync {
    async fn list_users(&self) -> DeskResult<Vec<User>>;
    /// Equality query on both fields; the API answers with every matching user.
    async fn find_users_by_credentials(&self, email: &str, password: &str) -> DeskResult<Vec<User>>;
    async fn get_user(&self, id: &str) -> DeskResult<User>;
    async fn create_user(&self, user: &NewUser) -> DeskResult<User>;
    async fn update_user(&self, user: &User) -> DeskResult<User>;
    async fn update_profile(&self, id: &str, profile: &StudentProfile) -> DeskResult<User>;
    async fn delete_user(&self, id: &str) -> DeskResult<()>;

    async fn list_classes(&self) -> DeskResult<Vec<ClassSession>>;
    async fn create_class(&self, class: &NewClassSession) -> DeskResult<ClassSession>;

    async fn list_announcements(&self) -> DeskResult<Vec<Announcement>>;
    async fn create_announcement(&self, announcement: &NewAnnouncement) -> DeskResult<Announcement>;
    async fn delete_announcement(&self, id: &str) -> DeskResult<()>;

    async fn list_requests(&self) -> DeskResult<Vec<ChangeRequest>>;
    async fn create_request(&self, request: &NewChangeRequest) -> DeskResult<ChangeRequest>;
    async fn update_request_status(&self, id: &str, status: RequestStatus) -> DeskResult<ChangeRequest>;

    async fn list_attendance(&self) -> DeskResult<Vec<AttendanceRecord>>;
    async fn create_attendance(&self, record: &AttendanceRecord) -> DeskResult<AttendanceRecord>;

    /// All records, or only one student's when `student_id` is given.
    async fn list_performance(&self, student_id: Option<String>) -> DeskResult<Vec<PerformanceRecord>>;
    async fn create_performance(&self, record: &PerformanceRecord) -> DeskResult<PerformanceRecord>;

    async fn list_assignments(&self) -> DeskResult<Vec<Assignment>>;
    async fn create_assignment(&self, assignment: &NewAssignment) -> DeskResult<Assignment>;
}

/// Error body returned by the API on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

fn transport(error: reqwest::Error) -> DeskError {
    DeskError::Transport(eyre::Report::new(error))
}

#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration) -> DeskResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(transport)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> DeskResult<Self> {
        Self::new(&config.api_url, config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url, collection)
    }

    fn record_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, collection, urlencoding::encode(id))
    }

    async fn send(&self, request: RequestBuilder) -> DeskResult<Response> {
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url());

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .ok()
            .filter(|message| !message.is_empty())
            .or_else(|| Some(text.trim().to_string()).filter(|t| !t.is_empty()))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());

        Err(DeskError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> DeskResult<T> {
        let response = self.send(self.client.get(url).query(query)).await?;
        response.json::<T>().await.map_err(transport)
    }

    async fn post<B, T>(&self, url: &str, body: &B) -> DeskResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.client.post(url).json(body)).await?;
        response.json::<T>().await.map_err(transport)
    }

    async fn patch<B, T>(&self, url: &str, body: &B) -> DeskResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.client.patch(url).json(body)).await?;
        response.json::<T>().await.map_err(transport)
    }

    async fn remove(&self, url: &str) -> DeskResult<()> {
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}

#[async_trait]
impl ResourceApi for HttpApi {
    async fn list_users(&self) -> DeskResult<Vec<User>> {
        self.fetch(&self.collection_url("users"), &[]).await
    }

    async fn find_users_by_credentials(&self, email: &str, password: &str) -> DeskResult<Vec<User>> {
        self.fetch(
            &self.collection_url("users"),
            &[("email", email), ("password", password)],
        )
        .await
    }

    async fn get_user(&self, id: &str) -> DeskResult<User> {
        self.fetch(&self.record_url("users", id), &[]).await
    }

    async fn create_user(&self, user: &NewUser) -> DeskResult<User> {
        self.post(&self.collection_url("users"), user).await
    }

    async fn update_user(&self, user: &User) -> DeskResult<User> {
        self.patch(&self.record_url("users", &user.id), user).await
    }

    async fn update_profile(&self, id: &str, profile: &StudentProfile) -> DeskResult<User> {
        self.patch(&self.record_url("users", id), profile).await
    }

    async fn delete_user(&self, id: &str) -> DeskResult<()> {
        self.remove(&self.record_url("users", id)).await
    }

    async fn list_classes(&self) -> DeskResult<Vec<ClassSession>> {
        self.fetch(&self.collection_url("classes"), &[]).await
    }

    async fn create_class(&self, class: &NewClassSession) -> DeskResult<ClassSession> {
        self.post(&self.collection_url("classes"), class).await
    }

    async fn list_announcements(&self) -> DeskResult<Vec<Announcement>> {
        self.fetch(&self.collection_url("announcements"), &[]).await
    }

    async fn create_announcement(&self, announcement: &NewAnnouncement) -> DeskResult<Announcement> {
        self.post(&self.collection_url("announcements"), announcement).await
    }

    async fn delete_announcement(&self, id: &str) -> DeskResult<()> {
        self.remove(&self.record_url("announcements", id)).await
    }

    async fn list_requests(&self) -> DeskResult<Vec<ChangeRequest>> {
        self.fetch(&self.collection_url("requests"), &[]).await
    }

    async fn create_request(&self, request: &NewChangeRequest) -> DeskResult<ChangeRequest> {
        self.post(&self.collection_url("requests"), request).await
    }

    async fn update_request_status(&self, id: &str, status: RequestStatus) -> DeskResult<ChangeRequest> {
        self.patch(&self.record_url("requests", id), &StatusUpdate { status })
            .await
    }

    async fn list_attendance(&self) -> DeskResult<Vec<AttendanceRecord>> {
        self.fetch(&self.collection_url("attendance"), &[]).await
    }

    async fn create_attendance(&self, record: &AttendanceRecord) -> DeskResult<AttendanceRecord> {
        self.post(&self.collection_url("attendance"), record).await
    }

    async fn list_performance(&self, student_id: Option<String>) -> DeskResult<Vec<PerformanceRecord>> {
        let url = self.collection_url("performance");
        match student_id.as_deref() {
            Some(id) => self.fetch(&url, &[("studentId", id)]).await,
            None => self.fetch(&url, &[]).await,
        }
    }

    async fn create_performance(&self, record: &PerformanceRecord) -> DeskResult<PerformanceRecord> {
        self.post(&self.collection_url("performance"), record).await
    }

    async fn list_assignments(&self) -> DeskResult<Vec<Assignment>> {
        self.fetch(&self.collection_url("assignments"), &[]).await
    }

    async fn create_assignment(&self, assignment: &NewAssignment) -> DeskResult<Assignment> {
        self.post(&self.collection_url("assignments"), assignment).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_url_encodes_ids() {
        let api = HttpApi::new("http://localhost:5000/", Duration::from_secs(5))
            .expect("client should build");

        assert_eq!(api.base_url(), "http://localhost:5000");
        assert_eq!(
            api.record_url("users", "a b/c"),
            "http://localhost:5000/users/a%20b%2Fc"
        );
        assert_eq!(api.collection_url("classes"), "http://localhost:5000/classes");
    }
}
