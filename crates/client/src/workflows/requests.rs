//! Change requests: tutors propose, admins decide.

use classdesk_core::errors::{DeskError, DeskResult};
use classdesk_core::forms::ChangeRequestForm;
use classdesk_core::models::{ChangeRequest, ClassSession, RequestStatus, Role, User};
use std::fmt;
use tracing::info;

use super::require_role;
use crate::api::ResourceApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl ReviewDecision {
    pub fn status(&self) -> RequestStatus {
        match self {
            ReviewDecision::Approve => RequestStatus::Approved,
            ReviewDecision::Reject => RequestStatus::Rejected,
        }
    }
}

impl fmt::Display for ReviewDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReviewDecision::Approve => "approve",
            ReviewDecision::Reject => "reject",
        })
    }
}

/// Decisions an admin may still take on `request`; empty once it has been reviewed.
pub fn available_actions(request: &ChangeRequest) -> &'static [ReviewDecision] {
    if request.is_pending() {
        &[ReviewDecision::Approve, ReviewDecision::Reject]
    } else {
        &[]
    }
}

/// Tutors a swap could hand the class to: every tutor except the requester.
pub fn swap_candidates<'a>(users: &'a [User], requester_id: &str) -> Vec<&'a User> {
    users
        .iter()
        .filter(|user| user.is_tutor() && user.id != requester_id)
        .collect()
}

pub fn pending(requests: &[ChangeRequest]) -> Vec<&ChangeRequest> {
    requests.iter().filter(|request| request.is_pending()).collect()
}

pub async fn submit_request(
    api: &dyn ResourceApi,
    tutor: &User,
    class: Option<&ClassSession>,
    form: ChangeRequestForm,
) -> DeskResult<ChangeRequest> {
    require_role(tutor, &[Role::Tutor], "request class changes")?;
    let class = class
        .ok_or_else(|| DeskError::Validation("Please select a class first".to_string()))?;
    let request = form.into_request(&class.id, &tutor.id)?;

    let created = api.create_request(&request).await?;
    info!("Tutor {} requested {} for class {}", tutor.id, created.kind, class.id);
    Ok(created)
}

/// Approves or rejects a pending request. The class itself is not modified.
pub async fn review_request(
    api: &dyn ResourceApi,
    admin: &User,
    request: &ChangeRequest,
    decision: ReviewDecision,
) -> DeskResult<ChangeRequest> {
    require_role(admin, &[Role::Admin], "review change requests")?;
    if !available_actions(request).contains(&decision) {
        return Err(DeskError::Validation(format!(
            "Request {} has already been {}",
            request.id, request.status
        )));
    }

    let updated = api.update_request_status(&request.id, decision.status()).await?;
    info!("Request {} marked {}", updated.id, updated.status);
    Ok(updated)
}
