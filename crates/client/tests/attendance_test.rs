use chrono::NaiveDate;
use classdesk_client::api::MockResourceApi;
use classdesk_client::workflows::attendance::{AttendanceDraft, SAVE_FAILED};
use classdesk_core::errors::DeskError;
use classdesk_core::models::{AttendanceRecord, AttendanceStatus};
use pretty_assertions::assert_eq;

fn commit_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
}

fn draft_with(marks: &[(&str, AttendanceStatus)]) -> AttendanceDraft {
    let mut draft = AttendanceDraft::new();
    draft.select_class("c1");
    for (student_id, status) in marks {
        draft.mark_local(student_id, *status);
    }
    draft
}

#[tokio::test]
async fn test_commit_submits_one_record_per_mark() {
    let mut api = MockResourceApi::new();
    api.expect_create_attendance()
        .times(2)
        .withf(|record: &AttendanceRecord| {
            record.class_id == "c1" && record.date == commit_day() && record.id.is_none()
        })
        .returning(|record| Ok(record.clone()));

    let draft = draft_with(&[
        ("s1", AttendanceStatus::Present),
        ("s2", AttendanceStatus::Absent),
    ]);

    let saved = draft.commit(&api, commit_day()).await.unwrap();

    assert_eq!(saved, 2);
    // Marks stay visible after saving.
    assert_eq!(draft.status_of("s2"), Some(AttendanceStatus::Absent));
}

#[tokio::test]
async fn test_partial_failure_is_reported_once() {
    let mut api = MockResourceApi::new();
    api.expect_create_attendance().times(3).returning(|record| {
        if record.student_id == "s2" {
            Err(DeskError::Api {
                status: 500,
                message: "disk full".to_string(),
            })
        } else {
            Ok(record.clone())
        }
    });

    let draft = draft_with(&[
        ("s1", AttendanceStatus::Present),
        ("s2", AttendanceStatus::Present),
        ("s3", AttendanceStatus::Absent),
    ]);

    let error = draft.commit(&api, commit_day()).await.unwrap_err();

    match error {
        DeskError::Batch { message, failed, total } => {
            assert_eq!(message, SAVE_FAILED);
            assert_eq!((failed, total), (1, 3));
        }
        other => panic!("expected a batch error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_overwritten_mark_is_sent_once() {
    let mut api = MockResourceApi::new();
    api.expect_create_attendance()
        .times(1)
        .withf(|record: &AttendanceRecord| record.status == AttendanceStatus::Absent)
        .returning(|record| Ok(record.clone()));

    let mut draft = draft_with(&[("s1", AttendanceStatus::Present)]);
    draft.mark_local("s1", AttendanceStatus::Absent);

    assert_eq!(draft.commit(&api, commit_day()).await.unwrap(), 1);
}

#[test]
fn test_records_carry_commit_date() {
    let draft = draft_with(&[("s1", AttendanceStatus::Present)]);

    let records = draft.to_records(commit_day());

    assert_eq!(
        records,
        vec![AttendanceRecord {
            id: None,
            class_id: "c1".to_string(),
            student_id: "s1".to_string(),
            status: AttendanceStatus::Present,
            date: commit_day(),
        }]
    );
}
