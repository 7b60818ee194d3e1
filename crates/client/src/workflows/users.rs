//! User administration and student self-service.

use classdesk_core::errors::{DeskError, DeskResult};
use classdesk_core::forms::UserForm;
use classdesk_core::models::{Role, StudentProfile, User};
use tracing::info;

use super::require_role;
use crate::api::ResourceApi;

pub const USER_NOT_FOUND: &str = "User not found";

/// Admins first, then tutors, then students; alphabetical by name within a role.
pub fn sort_for_listing(users: &mut [User]) {
    users.sort_by(|a, b| {
        a.role
            .listing_rank()
            .cmp(&b.role.listing_rank())
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
}

pub fn with_role(users: &[User], role: Role) -> Vec<User> {
    users.iter().filter(|user| user.role == role).cloned().collect()
}

pub async fn add_user(api: &dyn ResourceApi, admin: &User, form: UserForm) -> DeskResult<User> {
    require_role(admin, &[Role::Admin], "add users")?;
    let user = form.into_new_user()?;
    let created = api.create_user(&user).await?;
    info!("Created {} account {}", created.role, created.email);
    Ok(created)
}

/// Fetches one user; a missing id is reported as [`USER_NOT_FOUND`].
pub async fn find_user(api: &dyn ResourceApi, id: &str) -> DeskResult<User> {
    match api.get_user(id).await {
        Err(DeskError::Api { status: 404, .. }) | Err(DeskError::NotFound(_)) => {
            Err(DeskError::NotFound(USER_NOT_FOUND.to_string()))
        }
        result => result,
    }
}

/// Saves an admin's edit of a full user record.
pub async fn update_user(api: &dyn ResourceApi, admin: &User, user: &User) -> DeskResult<User> {
    require_role(admin, &[Role::Admin], "edit users")?;
    if user.name.trim().is_empty() || user.email.trim().is_empty() {
        return Err(DeskError::Validation("Name and email are required".to_string()));
    }
    let updated = api.update_user(user).await?;
    info!("Updated user {}", updated.id);
    Ok(updated)
}

pub async fn delete_user(api: &dyn ResourceApi, admin: &User, id: &str) -> DeskResult<()> {
    require_role(admin, &[Role::Admin], "delete users")?;
    if admin.id == id {
        return Err(DeskError::Validation("You cannot delete your own account".to_string()));
    }
    api.delete_user(id).await?;
    info!("Deleted user {}", id);
    Ok(())
}

/// A student edits the profile fields of their own record; nothing else is sent.
pub async fn update_own_profile(
    api: &dyn ResourceApi,
    student: &User,
    profile: &StudentProfile,
) -> DeskResult<User> {
    require_role(student, &[Role::Student], "edit a student profile")?;
    if profile.is_empty() {
        return Err(DeskError::Validation("Nothing to update".to_string()));
    }
    api.update_profile(&student.id, profile).await
}
