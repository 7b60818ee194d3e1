//! Performance notes and academic marks.

use classdesk_core::errors::DeskResult;
use classdesk_core::forms::{AcademicMarkForm, PerformanceNoteForm};
use classdesk_core::models::{PerformanceRecord, Role, User};
use tracing::info;

use super::require_role;
use crate::api::ResourceApi;
use crate::dashboard::Listing;

pub const NO_RECORDS: &str = "No records found.";
pub const NO_ACADEMIC_MARKS: &str = "No academic marks found.";

/// One student's records split into tutor notes and academic marks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceBook {
    pub notes: Vec<PerformanceRecord>,
    pub academic: Vec<PerformanceRecord>,
}

impl PerformanceBook {
    pub fn from_records(records: Vec<PerformanceRecord>) -> Self {
        let (academic, notes) = records.into_iter().partition(PerformanceRecord::is_academic);
        Self { notes, academic }
    }

    pub fn notes_listing(&self) -> Listing<'_, PerformanceRecord> {
        Listing::of(&self.notes, NO_RECORDS)
    }

    pub fn academic_listing(&self) -> Listing<'_, PerformanceRecord> {
        Listing::of(&self.academic, NO_ACADEMIC_MARKS)
    }
}

pub async fn fetch_student_book(api: &dyn ResourceApi, student_id: &str) -> DeskResult<PerformanceBook> {
    let records = api.list_performance(Some(student_id.to_string())).await?;
    Ok(PerformanceBook::from_records(records))
}

/// A tutor or admin records a note against a student.
pub async fn add_note(
    api: &dyn ResourceApi,
    author: &User,
    student_id: &str,
    form: PerformanceNoteForm,
) -> DeskResult<PerformanceRecord> {
    require_role(author, &[Role::Admin, Role::Tutor], "add performance notes")?;
    let record = form.into_record(student_id)?;
    let created = api.create_performance(&record).await?;
    info!("Recorded {} note for student {}", created.subject, student_id);
    Ok(created)
}

/// A student records one of their own exam results.
pub async fn add_academic_mark(
    api: &dyn ResourceApi,
    student: &User,
    form: AcademicMarkForm,
) -> DeskResult<PerformanceRecord> {
    require_role(student, &[Role::Student], "add academic marks")?;
    let record = form.into_record(&student.id)?;
    let created = api.create_performance(&record).await?;
    info!("Student {} added a {} mark", student.id, created.subject);
    Ok(created)
}
