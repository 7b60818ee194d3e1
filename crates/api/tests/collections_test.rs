use axum::http::StatusCode;
use axum_test::TestServer;
use classdesk_api::{build_router, store::CollectionStore, ApiState};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use std::io::Write;

fn server_with(seed: Value) -> TestServer {
    let store = CollectionStore::from_seed(seed).expect("valid seed");
    TestServer::new(build_router(ApiState::new(store))).expect("test server")
}

fn empty_server() -> TestServer {
    TestServer::new(build_router(ApiState::new(CollectionStore::new()))).expect("test server")
}

#[tokio::test]
async fn test_health_reports_record_counts() {
    let server = server_with(json!({ "users": [{ "id": "a1", "name": "Admin" }] }));

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["records"]["users"], 1);
    assert_eq!(body["records"]["classes"], 0);
}

#[tokio::test]
async fn test_create_assigns_id_and_lists() {
    let server = empty_server();

    let created = server
        .post("/classes")
        .json(&json!({ "subject": "Maths", "time": "2024-06-01T10:00", "tutorId": "t1" }))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let created: Value = created.json();
    let id = created["id"].as_str().expect("generated id").to_string();

    let listed: Vec<Value> = server.get("/classes").await.json();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], id.as_str());

    let fetched: Value = server.get(&format!("/classes/{id}")).await.json();
    assert_eq!(fetched["subject"], "Maths");
}

#[tokio::test]
async fn test_query_filters_by_equality() {
    let server = server_with(json!({
        "performance": [
            { "id": "p1", "studentId": "s1", "subject": "Maths", "score": 80 },
            { "id": "p2", "studentId": "s2", "subject": "Maths", "score": 70 },
            { "id": "p3", "studentId": "s1", "subject": "Science", "score": "65", "type": "academic" }
        ]
    }));

    let mine: Vec<Value> = server
        .get("/performance")
        .add_query_param("studentId", "s1")
        .await
        .json();
    assert_eq!(mine.len(), 2);

    let academic: Vec<Value> = server
        .get("/performance")
        .add_query_param("studentId", "s1")
        .add_query_param("type", "academic")
        .await
        .json();
    assert_eq!(academic.len(), 1);
    assert_eq!(academic[0]["id"], "p3");
}

#[tokio::test]
async fn test_login_style_credential_query() {
    let server = server_with(json!({
        "users": [
            { "id": "t1", "name": "Tara", "email": "tara@example.com", "password": "pw", "role": "tutor" }
        ]
    }));

    let hit: Vec<Value> = server
        .get("/users")
        .add_query_param("email", "tara@example.com")
        .add_query_param("password", "pw")
        .await
        .json();
    let miss: Vec<Value> = server
        .get("/users")
        .add_query_param("email", "tara@example.com")
        .add_query_param("password", "nope")
        .await
        .json();

    assert_eq!(hit.len(), 1);
    assert!(miss.is_empty());
}

#[tokio::test]
async fn test_patch_merges_and_keeps_id() {
    let server = server_with(json!({
        "requests": [{ "id": "r1", "classId": "c1", "type": "cancel", "status": "pending" }]
    }));

    let patched: Value = server
        .patch("/requests/r1")
        .json(&json!({ "status": "approved", "id": "hijack" }))
        .await
        .json();

    assert_eq!(patched["status"], "approved");
    assert_eq!(patched["id"], "r1");
    assert_eq!(patched["classId"], "c1");

    let refetched: Vec<Value> = server.get("/requests").await.json();
    assert_eq!(refetched[0]["status"], "approved");
}

#[tokio::test]
async fn test_delete_removes_record() {
    let server = server_with(json!({
        "announcements": [{ "id": "n1", "title": "Exam" }, { "id": "n2", "title": "Holiday" }]
    }));

    let response = server.delete("/announcements/n1").await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let remaining: Vec<Value> = server.get("/announcements").await.json();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["id"], "n2");

    let again = server.delete("/announcements/n1").await;
    assert_eq!(again.status_code(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case("/widgets")]
#[case("/users/missing")]
#[tokio::test]
async fn test_not_found_paths(#[case] path: &str) {
    let server = empty_server();

    let response = server.get(path).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_non_object_body_is_bad_request() {
    let server = empty_server();

    let response = server.post("/users").json(&json!(["not", "an", "object"])).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_seed_file_loading() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        "{}",
        json!({ "users": [{ "id": "a1", "name": "Admin", "role": "admin" }] })
    )
    .unwrap();

    let store = CollectionStore::load_seed_file(file.path()).await.expect("seed loads");
    let server = TestServer::new(build_router(ApiState::new(store))).unwrap();

    let users: Vec<Value> = server.get("/users").await.json();
    assert_eq!(users.len(), 1);
}
