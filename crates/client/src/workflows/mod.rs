//! Role workflows.
//!
//! Each workflow validates its form locally, checks the actor's role, and only then calls the
//! resource client. Nothing here caches; dashboards own the cached collections.

pub mod announcements;
pub mod assignments;
pub mod attendance;
pub mod performance;
pub mod requests;
pub mod scheduling;
pub mod users;

use classdesk_core::errors::{DeskError, DeskResult};
use classdesk_core::models::{Role, User};

/// Refuses the action unless the actor holds one of `roles`.
pub(crate) fn require_role(actor: &User, roles: &[Role], action: &str) -> DeskResult<()> {
    if roles.contains(&actor.role) {
        Ok(())
    } else {
        Err(DeskError::Authorization(format!(
            "{} accounts cannot {}",
            actor.role, action
        )))
    }
}
