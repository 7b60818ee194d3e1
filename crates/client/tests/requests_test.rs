mod common;

use chrono::NaiveDate;
use classdesk_client::api::MockResourceApi;
use classdesk_client::workflows::requests::{
    available_actions, review_request, submit_request, swap_candidates, ReviewDecision,
};
use classdesk_core::errors::DeskError;
use classdesk_core::forms::ChangeRequestForm;
use classdesk_core::models::{ChangeRequest, NewChangeRequest, RequestStatus, RequestType, Role};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn created_from(request: &NewChangeRequest) -> ChangeRequest {
    ChangeRequest {
        id: "r9".to_string(),
        class_id: request.class_id.clone(),
        tutor_id: request.tutor_id.clone(),
        kind: request.kind,
        reason: request.reason.clone(),
        new_time: request
            .new_time
            .map(|time| time.format("%Y-%m-%dT%H:%M").to_string()),
        new_tutor_id: request.new_tutor_id.clone(),
        status: request.status,
    }
}

#[tokio::test]
async fn test_reschedule_sends_only_new_time() {
    let new_time = NaiveDate::from_ymd_opt(2024, 7, 1)
        .unwrap()
        .and_hms_opt(15, 0, 0)
        .unwrap();
    let mut api = MockResourceApi::new();
    api.expect_create_request()
        .times(1)
        .withf(move |request: &NewChangeRequest| {
            request.kind == RequestType::Reschedule
                && request.new_time == Some(new_time)
                && request.new_tutor_id.is_none()
                && request.status == RequestStatus::Pending
                && request.tutor_id == "t1"
        })
        .returning(|request| Ok(created_from(request)));

    let form = ChangeRequestForm {
        kind: RequestType::Reschedule,
        reason: "Exam clash".to_string(),
        new_time: Some(new_time),
        new_tutor_id: Some("t2".to_string()),
    };
    let class = common::class("c1", "t1", "2024-06-30T15:00");

    let created = submit_request(&api, &common::tutor(), Some(&class), form).await.unwrap();

    assert_eq!(created.new_time.as_deref(), Some("2024-07-01T15:00"));
    assert!(created.is_pending());
}

#[rstest]
#[case::swap_without_tutor(ChangeRequestForm::new(RequestType::Swap, "Travelling"))]
#[case::reschedule_without_time(ChangeRequestForm::new(RequestType::Reschedule, "Travelling"))]
#[case::blank_reason(ChangeRequestForm::new(RequestType::Cancel, "   "))]
#[tokio::test]
async fn test_invalid_form_never_reaches_api(#[case] form: ChangeRequestForm) {
    let mut api = MockResourceApi::new();
    api.expect_create_request().never();
    let class = common::class("c1", "t1", "2024-06-30T15:00");

    let result = submit_request(&api, &common::tutor(), Some(&class), form).await;

    assert!(matches!(result, Err(DeskError::Validation(_))));
}

#[tokio::test]
async fn test_request_needs_a_selected_class() {
    let mut api = MockResourceApi::new();
    api.expect_create_request().never();

    let form = ChangeRequestForm::new(RequestType::Cancel, "Unwell");
    let result = submit_request(&api, &common::tutor(), None, form).await;

    assert!(matches!(result, Err(DeskError::Validation(msg)) if msg == "Please select a class first"));
}

#[tokio::test]
async fn test_admin_approves_pending_request() {
    let mut api = MockResourceApi::new();
    api.expect_update_request_status()
        .times(1)
        .withf(|id: &str, status: &RequestStatus| id == "r1" && *status == RequestStatus::Approved)
        .returning(|_, status| Ok(common::request("r1", status)));

    let pending = common::request("r1", RequestStatus::Pending);
    let updated = review_request(&api, &common::admin(), &pending, ReviewDecision::Approve)
        .await
        .unwrap();

    assert_eq!(updated.status, RequestStatus::Approved);
    assert!(available_actions(&updated).is_empty());
}

#[rstest]
#[case(RequestStatus::Approved)]
#[case(RequestStatus::Rejected)]
#[tokio::test]
async fn test_reviewed_request_is_final(#[case] status: RequestStatus) {
    let mut api = MockResourceApi::new();
    api.expect_update_request_status().never();

    let reviewed = common::request("r1", status);
    let result = review_request(&api, &common::admin(), &reviewed, ReviewDecision::Reject).await;

    assert!(matches!(result, Err(DeskError::Validation(_))));
}

#[tokio::test]
async fn test_tutor_cannot_review() {
    let mut api = MockResourceApi::new();
    api.expect_update_request_status().never();

    let pending = common::request("r1", RequestStatus::Pending);
    let result = review_request(&api, &common::tutor(), &pending, ReviewDecision::Approve).await;

    assert!(matches!(result, Err(DeskError::Authorization(_))));
}

#[test]
fn test_swap_candidates_exclude_requester() {
    let users = vec![
        common::admin(),
        common::tutor(),
        common::user("t2", "Tia Tutor", Role::Tutor),
        common::student(),
    ];

    let candidates: Vec<&str> = swap_candidates(&users, "t1")
        .into_iter()
        .map(|user| user.id.as_str())
        .collect();

    assert_eq!(candidates, vec!["t2"]);
}
