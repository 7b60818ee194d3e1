use chrono::NaiveDate;
use classdesk_api::{build_router, store::CollectionStore, ApiState};
use classdesk_client::api::{HttpApi, ResourceApi};
use classdesk_client::session::{LoginOutcome, SessionStore};
use classdesk_client::workflows::attendance::AttendanceDraft;
use classdesk_client::workflows::{requests, scheduling, users};
use classdesk_core::errors::DeskError;
use classdesk_core::forms::{ChangeRequestForm, ClassForm};
use classdesk_core::models::{AttendanceStatus, RequestStatus, RequestType};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

async fn spawn_api() -> HttpApi {
    let seed = json!({
        "users": [
            { "id": "a1", "name": "Ada Admin", "email": "ada@classdesk.test", "password": "admin", "role": "admin" },
            { "id": "t1", "name": "Tom Tutor", "email": "tom@classdesk.test", "password": "tutor", "role": "tutor" },
            { "id": "s1", "name": "Sara Student", "email": "sara@classdesk.test", "password": "student", "role": "student", "school": "Hillside" }
        ]
    });
    let store = CollectionStore::from_seed(seed).expect("valid seed");
    let app = build_router(ApiState::new(store));

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server");
    });

    HttpApi::new(&format!("http://{addr}"), Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn test_tutor_day_against_stand_in_api() {
    let api = spawn_api().await;
    let dir = TempDir::new().unwrap();
    let mut session = SessionStore::new(dir.path().join("session.json"));
    session.initialize().await;

    let outcome = session.login(&api, "tom@classdesk.test", "wrong").await.unwrap();
    assert!(matches!(outcome, LoginOutcome::Failure { .. }));

    let outcome = session.login(&api, "tom@classdesk.test", "tutor").await.unwrap();
    let LoginOutcome::Success { user: tutor } = outcome else {
        panic!("tutor should be able to sign in");
    };

    let form = ClassForm {
        subject: "Chemistry".to_string(),
        time: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap().and_hms_opt(9, 0, 0),
        tutor_id: None,
        link: Some("https://meet.example/chem".to_string()),
    };
    let class = scheduling::schedule_class(&api, &tutor, form).await.unwrap();
    assert_eq!(class.tutor_id, "t1");
    assert_eq!(class.time, "2024-06-03T09:00");

    let mut draft = AttendanceDraft::new();
    draft.select_class(&class.id);
    draft.mark_local("s1", AttendanceStatus::Present);
    let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    assert_eq!(draft.commit(&api, day).await.unwrap(), 1);

    let saved = api.list_attendance().await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].date, day);
    assert!(saved[0].id.is_some());

    let mut form = ChangeRequestForm::new(RequestType::Swap, "Conference");
    form.new_tutor_id = Some("a1".to_string());
    let request = requests::submit_request(&api, &tutor, Some(&class), form).await.unwrap();
    assert_eq!(request.status, RequestStatus::Pending);

    let admin = users::find_user(&api, "a1").await.unwrap();
    let reviewed = requests::review_request(&api, &admin, &request, requests::ReviewDecision::Approve)
        .await
        .unwrap();
    assert_eq!(reviewed.status, RequestStatus::Approved);
    assert_eq!(reviewed.new_tutor_id.as_deref(), Some("a1"));
}

#[tokio::test]
async fn test_api_errors_surface_as_typed_errors() {
    let api = spawn_api().await;

    let missing = users::find_user(&api, "nobody").await;
    assert!(matches!(missing, Err(DeskError::NotFound(msg)) if msg == "User not found"));

    let student = api.get_user("s1").await.unwrap();
    assert_eq!(student.profile.school.as_deref(), Some("Hillside"));

    let records = api.list_performance(Some("s1".to_string())).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_unreachable_api_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpApi::new(&format!("http://{addr}"), Duration::from_secs(2)).unwrap();
    let result = api.list_classes().await;

    assert!(matches!(result, Err(DeskError::Transport(_))));
}
