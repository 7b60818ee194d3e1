use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::wire;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentType {
    #[default]
    Homework,
    MockTest,
}

impl AssignmentType {
    pub fn label(&self) -> &'static str {
        match self {
            AssignmentType::Homework => "Homework",
            AssignmentType::MockTest => "Mock Test",
        }
    }
}

impl fmt::Display for AssignmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AssignmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "homework" => Ok(AssignmentType::Homework),
            "mock_test" => Ok(AssignmentType::MockTest),
            _ => Err(format!("{s:?} is not a valid assignment type (expected homework or mock_test)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub class_id: String,
    pub tutor_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    #[serde(default, with = "wire::optional_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, rename = "type")]
    pub kind: AssignmentType,
}

/// Body of `POST /assignments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssignment {
    pub class_id: String,
    pub tutor_id: String,
    pub title: String,
    pub description: String,
    pub link: String,
    #[serde(default, with = "wire::optional_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub kind: AssignmentType,
}
