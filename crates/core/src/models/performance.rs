use serde::{Deserialize, Serialize};

use super::wire;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceKind {
    /// Exam mark entered by the student.
    Academic,
    #[serde(untagged)]
    Other(String),
}

/// A score for one student in one subject.
///
/// Two kinds share the `performance` collection: tutor or admin notes carry `remarks`, student
/// exam marks carry `examName` and `type = "academic"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub student_id: String,
    pub subject: String,
    #[serde(deserialize_with = "wire::flexible_score")]
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<PerformanceKind>,
}

impl PerformanceRecord {
    pub fn note(student_id: &str, subject: &str, score: f64, remarks: &str) -> Self {
        Self {
            id: None,
            student_id: student_id.to_string(),
            subject: subject.to_string(),
            score,
            remarks: Some(remarks.to_string()),
            exam_name: None,
            kind: None,
        }
    }

    pub fn academic(student_id: &str, subject: &str, exam_name: &str, score: f64) -> Self {
        Self {
            id: None,
            student_id: student_id.to_string(),
            subject: subject.to_string(),
            score,
            remarks: None,
            exam_name: Some(exam_name.to_string()),
            kind: Some(PerformanceKind::Academic),
        }
    }

    pub fn is_academic(&self) -> bool {
        matches!(self.kind, Some(PerformanceKind::Academic))
    }
}
