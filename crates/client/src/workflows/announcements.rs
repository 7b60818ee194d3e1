//! Announcements.

use chrono::Utc;
use classdesk_core::errors::DeskResult;
use classdesk_core::forms::AnnouncementForm;
use classdesk_core::models::{Announcement, Role, User};
use tracing::info;

use super::require_role;
use crate::api::ResourceApi;

pub async fn post_announcement(
    api: &dyn ResourceApi,
    author: &User,
    form: AnnouncementForm,
) -> DeskResult<Announcement> {
    let announcement = form.into_new(author, Utc::now())?;
    let created = api.create_announcement(&announcement).await?;
    info!("{} posted announcement {:?} to {}", author.id, created.title, created.target_role);
    Ok(created)
}

pub async fn delete_announcement(api: &dyn ResourceApi, actor: &User, id: &str) -> DeskResult<()> {
    require_role(actor, &[Role::Admin], "delete announcements")?;
    api.delete_announcement(id).await?;
    info!("Deleted announcement {}", id);
    Ok(())
}

/// Announcements shown to a reader. Students only see what is addressed to everyone or to
/// students; tutors and admins see the whole board.
pub fn visible_to(announcements: &[Announcement], role: Role) -> Vec<Announcement> {
    match role {
        Role::Student => announcements
            .iter()
            .filter(|announcement| announcement.target_role.includes(Role::Student))
            .cloned()
            .collect(),
        Role::Tutor | Role::Admin => announcements.to_vec(),
    }
}
