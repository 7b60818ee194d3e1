use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::wire;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassStatus {
    Scheduled,
    Cancelled,
    /// Any status the API reports that this client has no special handling for.
    #[serde(untagged)]
    Other(String),
}

impl ClassStatus {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClassStatus::Cancelled)
    }
}

impl Default for ClassStatus {
    fn default() -> Self {
        ClassStatus::Scheduled
    }
}

impl fmt::Display for ClassStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassStatus::Scheduled => f.write_str("scheduled"),
            ClassStatus::Cancelled => f.write_str("cancelled"),
            ClassStatus::Other(other) => f.write_str(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSession {
    pub id: String,
    pub subject: String,
    /// Scheduled time as stored by the API. Read through [`ClassSession::scheduled_at`].
    pub time: String,
    pub tutor_id: String,
    #[serde(default)]
    pub status: ClassStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl ClassSession {
    /// The scheduled time, or `None` when the stored value is not a recognisable date-time.
    pub fn scheduled_at(&self) -> Option<NaiveDateTime> {
        wire::parse_local_datetime(&self.time)
    }
}

/// Body of `POST /classes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClassSession {
    pub subject: String,
    #[serde(with = "wire::local_datetime")]
    pub time: NaiveDateTime,
    pub tutor_id: String,
    pub status: ClassStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}
