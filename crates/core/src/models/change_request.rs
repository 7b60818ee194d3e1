use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::wire;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    Cancel,
    Reschedule,
    Swap,
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RequestType::Cancel => "cancel",
            RequestType::Reschedule => "reschedule",
            RequestType::Swap => "swap",
        })
    }
}

impl FromStr for RequestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cancel" => Ok(RequestType::Cancel),
            "reschedule" => Ok(RequestType::Reschedule),
            "swap" => Ok(RequestType::Swap),
            _ => Err(format!("{s:?} is not a valid request type (expected cancel, reschedule or swap)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Approved and rejected requests never change again.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRequest {
    pub id: String,
    pub class_id: String,
    pub tutor_id: String,
    #[serde(rename = "type")]
    pub kind: RequestType,
    pub reason: String,
    #[serde(default, with = "wire::optional_text", skip_serializing_if = "Option::is_none")]
    pub new_time: Option<String>,
    #[serde(default, with = "wire::optional_text", skip_serializing_if = "Option::is_none")]
    pub new_tutor_id: Option<String>,
    #[serde(default)]
    pub status: RequestStatus,
}

impl ChangeRequest {
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

/// Body of `POST /requests`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChangeRequest {
    pub class_id: String,
    pub tutor_id: String,
    #[serde(rename = "type")]
    pub kind: RequestType,
    pub reason: String,
    #[serde(
        default,
        with = "wire::optional_local_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub new_time: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_tutor_id: Option<String>,
    pub status: RequestStatus,
}

/// Body of `PATCH /requests/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: RequestStatus,
}
