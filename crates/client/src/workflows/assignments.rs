//! Homework and mock-test assignments.

use classdesk_core::errors::DeskResult;
use classdesk_core::forms::AssignmentForm;
use classdesk_core::models::{Assignment, ClassSession, Role, User};
use tracing::info;

use super::require_role;
use crate::api::ResourceApi;

/// Creates an assignment for the selected class.
pub async fn create_assignment(
    api: &dyn ResourceApi,
    tutor: &User,
    class: Option<&ClassSession>,
    form: AssignmentForm,
) -> DeskResult<Assignment> {
    require_role(tutor, &[Role::Tutor], "create assignments")?;
    let assignment = form.into_new(class, tutor)?;
    let created = api.create_assignment(&assignment).await?;
    info!("Created {} {:?} for class {}", created.kind, created.title, created.class_id);
    Ok(created)
}

pub fn assignments_by_tutor(assignments: &[Assignment], tutor_id: &str) -> Vec<Assignment> {
    assignments
        .iter()
        .filter(|assignment| assignment.tutor_id == tutor_id)
        .cloned()
        .collect()
}
