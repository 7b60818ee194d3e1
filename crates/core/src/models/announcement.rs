use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::user::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetRole {
    All,
    Student,
    Tutor,
}

impl TargetRole {
    /// Whether a reader with `role` is in this announcement's audience.
    pub fn includes(&self, role: Role) -> bool {
        match self {
            TargetRole::All => true,
            TargetRole::Student => role == Role::Student,
            TargetRole::Tutor => role == Role::Tutor,
        }
    }
}

impl fmt::Display for TargetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TargetRole::All => "all",
            TargetRole::Student => "student",
            TargetRole::Tutor => "tutor",
        })
    }
}

impl FromStr for TargetRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TargetRole::All),
            "student" => Ok(TargetRole::Student),
            "tutor" => Ok(TargetRole::Tutor),
            _ => Err(format!("{s:?} is not a valid audience (expected all, student or tutor)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub content: String,
    pub target_role: TargetRole,
    pub author_id: String,
    pub author_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Body of `POST /announcements`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnnouncement {
    pub title: String,
    pub content: String,
    pub target_role: TargetRole,
    pub author_id: String,
    pub author_name: String,
    pub date: String,
}
