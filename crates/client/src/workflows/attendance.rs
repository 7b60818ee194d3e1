//! Attendance marking.
//!
//! Marks live in a local draft until they are committed in one batch. The draft belongs to a
//! single class at a time.

use chrono::NaiveDate;
use classdesk_core::errors::{DeskError, DeskResult};
use classdesk_core::models::{AttendanceRecord, AttendanceStatus};
use futures::future::join_all;
use std::collections::BTreeMap;
use tracing::{error, info};

use crate::api::ResourceApi;

pub const SAVE_FAILED: &str = "Failed to save attendance";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceDraft {
    class_id: Option<String>,
    marks: BTreeMap<String, AttendanceStatus>,
}

impl AttendanceDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points the draft at a class. Switching to a different class drops the marks taken so far;
    /// re-selecting the same class keeps them.
    pub fn select_class(&mut self, class_id: &str) {
        if self.class_id.as_deref() != Some(class_id) {
            self.marks.clear();
            self.class_id = Some(class_id.to_string());
        }
    }

    pub fn class_id(&self) -> Option<&str> {
        self.class_id.as_deref()
    }

    /// Records a mark, replacing any earlier one for the student.
    ///
    /// Returns `false` and records nothing when no class is selected. Class membership is not
    /// checked.
    pub fn mark_local(&mut self, student_id: &str, status: AttendanceStatus) -> bool {
        if self.class_id.is_none() {
            return false;
        }
        self.marks.insert(student_id.to_string(), status);
        true
    }

    pub fn status_of(&self, student_id: &str) -> Option<AttendanceStatus> {
        self.marks.get(student_id).copied()
    }

    pub fn marks(&self) -> &BTreeMap<String, AttendanceStatus> {
        &self.marks
    }

    pub fn can_commit(&self) -> bool {
        self.class_id.is_some() && !self.marks.is_empty()
    }

    pub fn clear(&mut self) {
        self.marks.clear();
    }

    /// One record per marked student, all dated `date`.
    pub fn to_records(&self, date: NaiveDate) -> Vec<AttendanceRecord> {
        let Some(class_id) = &self.class_id else {
            return Vec::new();
        };
        self.marks
            .iter()
            .map(|(student_id, status)| AttendanceRecord {
                id: None,
                class_id: class_id.clone(),
                student_id: student_id.clone(),
                status: *status,
                date,
            })
            .collect()
    }

    /// Submits every mark concurrently and waits for all of them.
    ///
    /// Any failure yields a single aggregate error; submissions that succeeded stay saved and
    /// nothing is retried. The draft itself is left untouched. Returns the number of records saved.
    pub async fn commit(&self, api: &dyn ResourceApi, date: NaiveDate) -> DeskResult<usize> {
        if !self.can_commit() {
            return Ok(0);
        }

        let records = self.to_records(date);
        let results = join_all(records.iter().map(|record| api.create_attendance(record))).await;

        let total = results.len();
        let failed = results
            .iter()
            .filter_map(|result| result.as_ref().err())
            .inspect(|e| error!("Attendance submission failed: {}", e))
            .count();

        if failed > 0 {
            return Err(DeskError::Batch {
                message: SAVE_FAILED.to_string(),
                failed,
                total,
            });
        }

        info!("Saved {} attendance records for {}", total, date);
        Ok(total)
    }
}
