//! Class scheduling and class listings.

use classdesk_core::errors::DeskResult;
use classdesk_core::forms::ClassForm;
use classdesk_core::models::{ClassSession, User};
use std::cmp::Reverse;
use tracing::info;

use crate::api::ResourceApi;

/// Creates a class. Tutors always schedule for themselves; admins must name a tutor.
pub async fn schedule_class(
    api: &dyn ResourceApi,
    actor: &User,
    form: ClassForm,
) -> DeskResult<ClassSession> {
    let class = form.into_new_class(actor)?;
    let created = api.create_class(&class).await?;
    info!("Scheduled {} at {} for tutor {}", created.subject, created.time, created.tutor_id);
    Ok(created)
}

/// Sorts newest first. Classes with an unreadable time sink to the end.
pub fn sort_newest_first(classes: &mut [ClassSession]) {
    classes.sort_by_key(|class| Reverse(class.scheduled_at()));
}

pub fn classes_for_tutor(classes: &[ClassSession], tutor_id: &str) -> Vec<ClassSession> {
    let mut own: Vec<ClassSession> = classes
        .iter()
        .filter(|class| class.tutor_id == tutor_id)
        .cloned()
        .collect();
    sort_newest_first(&mut own);
    own
}

pub fn find_class<'a>(classes: &'a [ClassSession], id: &str) -> Option<&'a ClassSession> {
    classes.iter().find(|class| class.id == id)
}
