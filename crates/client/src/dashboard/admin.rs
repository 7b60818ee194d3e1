use chrono::NaiveDateTime;
use classdesk_core::analytics::{
    self, AnalyticsReport, RoleCounts, StudentAttendance, TutorClassStats,
};
use classdesk_core::errors::{DeskError, DeskResult};
use classdesk_core::forms::{AnnouncementForm, ClassForm, UserForm};
use classdesk_core::models::{
    Announcement, AttendanceRecord, ChangeRequest, ClassSession, PerformanceRecord, User,
};
use std::fmt;
use std::str::FromStr;

use super::{apply_fetch, parse_tab, Listing, NO_ANNOUNCEMENTS, NO_CLASSES_SCHEDULED, NO_REQUESTS};
use crate::api::ResourceApi;
use crate::workflows::requests::{self, ReviewDecision};
use crate::workflows::{announcements, scheduling, users};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Overview,
    Schedule,
    Analytics,
    Announcements,
}

const ADMIN_TABS: [(&str, AdminTab); 4] = [
    ("overview", AdminTab::Overview),
    ("schedule", AdminTab::Schedule),
    ("analytics", AdminTab::Analytics),
    ("announcements", AdminTab::Announcements),
];

impl FromStr for AdminTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_tab(s, &ADMIN_TABS)
    }
}

impl fmt::Display for AdminTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = ADMIN_TABS
            .iter()
            .find(|(_, tab)| tab == self)
            .map_or("overview", |(name, _)| *name);
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TutorOverview<'a> {
    pub tutor: &'a User,
    pub stats: TutorClassStats,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentOverview<'a> {
    pub student: &'a User,
    pub attendance: StudentAttendance,
}

#[derive(Debug, Clone)]
pub struct AdminDashboard {
    pub user: User,
    pub tab: AdminTab,
    users: Vec<User>,
    classes: Vec<ClassSession>,
    requests: Vec<ChangeRequest>,
    attendance: Vec<AttendanceRecord>,
    performance: Vec<PerformanceRecord>,
    announcements: Vec<Announcement>,
}

impl AdminDashboard {
    pub fn new(user: User) -> DeskResult<Self> {
        if !user.is_admin() {
            return Err(DeskError::Authorization(
                "The admin dashboard is only available to admins".to_string(),
            ));
        }
        Ok(Self {
            user,
            tab: AdminTab::default(),
            users: Vec::new(),
            classes: Vec::new(),
            requests: Vec::new(),
            attendance: Vec::new(),
            performance: Vec::new(),
            announcements: Vec::new(),
        })
    }

    pub async fn refresh(&mut self, api: &dyn ResourceApi) {
        let (users, classes, requests, attendance, performance, announcements) = tokio::join!(
            api.list_users(),
            api.list_classes(),
            api.list_requests(),
            api.list_attendance(),
            api.list_performance(None),
            api.list_announcements(),
        );

        if apply_fetch(&mut self.users, users, "users") {
            users::sort_for_listing(&mut self.users);
        }
        if apply_fetch(&mut self.classes, classes, "classes") {
            scheduling::sort_newest_first(&mut self.classes);
        }
        apply_fetch(&mut self.requests, requests, "requests");
        apply_fetch(&mut self.attendance, attendance, "attendance");
        apply_fetch(&mut self.performance, performance, "performance");
        apply_fetch(&mut self.announcements, announcements, "announcements");
    }

    async fn refresh_users(&mut self, api: &dyn ResourceApi) {
        if apply_fetch(&mut self.users, api.list_users().await, "users") {
            users::sort_for_listing(&mut self.users);
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn role_counts(&self) -> RoleCounts {
        analytics::role_counts(&self.users)
    }

    pub fn tutor_overview(&self, now: NaiveDateTime) -> Vec<TutorOverview<'_>> {
        self
            .users
            .iter()
            .filter(|user| user.is_tutor())
            .map(|tutor| TutorOverview {
                tutor,
                stats: analytics::tutor_class_stats(&self.classes, &tutor.id, now),
            })
            .collect()
    }

    pub fn student_overview(&self) -> Vec<StudentOverview<'_>> {
        self
            .users
            .iter()
            .filter(|user| user.is_student())
            .map(|student| StudentOverview {
                student,
                attendance: analytics::student_attendance(&self.attendance, &student.id),
            })
            .collect()
    }

    pub fn requests(&self) -> Listing<'_, ChangeRequest> {
        Listing::of(&self.requests, NO_REQUESTS)
    }

    pub fn pending_requests(&self) -> Vec<&ChangeRequest> {
        requests::pending(&self.requests)
    }

    pub fn schedule(&self) -> Listing<'_, ClassSession> {
        Listing::of(&self.classes, NO_CLASSES_SCHEDULED)
    }

    pub fn analytics(&self) -> AnalyticsReport {
        analytics::analytics_report(&self.attendance, &self.performance)
    }

    pub fn announcements(&self) -> Listing<'_, Announcement> {
        Listing::of(&self.announcements, NO_ANNOUNCEMENTS)
    }

    pub fn user_name(&self, id: &str) -> Option<&str> {
        self.users
            .iter()
            .find(|user| user.id == id)
            .map(|user| user.name.as_str())
    }

    pub async fn review(
        &mut self,
        api: &dyn ResourceApi,
        request_id: &str,
        decision: ReviewDecision,
    ) -> DeskResult<ChangeRequest> {
        let request = self
            .requests
            .iter()
            .find(|request| request.id == request_id)
            .cloned()
            .ok_or_else(|| DeskError::NotFound(format!("Request {request_id} not found")))?;
        let updated = requests::review_request(api, &self.user, &request, decision).await?;
        apply_fetch(&mut self.requests, api.list_requests().await, "requests");
        Ok(updated)
    }

    pub async fn schedule_class(&mut self, api: &dyn ResourceApi, form: ClassForm) -> DeskResult<ClassSession> {
        let created = scheduling::schedule_class(api, &self.user, form).await?;
        if apply_fetch(&mut self.classes, api.list_classes().await, "classes") {
            scheduling::sort_newest_first(&mut self.classes);
        }
        Ok(created)
    }

    pub async fn post_announcement(
        &mut self,
        api: &dyn ResourceApi,
        form: AnnouncementForm,
    ) -> DeskResult<Announcement> {
        let created = announcements::post_announcement(api, &self.user, form).await?;
        apply_fetch(&mut self.announcements, api.list_announcements().await, "announcements");
        Ok(created)
    }

    pub async fn delete_announcement(&mut self, api: &dyn ResourceApi, id: &str) -> DeskResult<()> {
        announcements::delete_announcement(api, &self.user, id).await?;
        apply_fetch(&mut self.announcements, api.list_announcements().await, "announcements");
        Ok(())
    }

    pub async fn add_user(&mut self, api: &dyn ResourceApi, form: UserForm) -> DeskResult<User> {
        let created = users::add_user(api, &self.user, form).await?;
        self.refresh_users(api).await;
        Ok(created)
    }

    pub async fn update_user(&mut self, api: &dyn ResourceApi, user: &User) -> DeskResult<User> {
        let updated = users::update_user(api, &self.user, user).await?;
        self.refresh_users(api).await;
        Ok(updated)
    }

    pub async fn delete_user(&mut self, api: &dyn ResourceApi, id: &str) -> DeskResult<()> {
        users::delete_user(api, &self.user, id).await?;
        self.refresh_users(api).await;
        Ok(())
    }
}
