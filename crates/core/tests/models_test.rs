use chrono::NaiveDate;
use classdesk_core::models::{
    Assignment, AssignmentType, AttendanceRecord, AttendanceStatus, ChangeRequest, ClassSession,
    ClassStatus, NewChangeRequest, PerformanceRecord, RequestStatus, RequestType, Role,
    StudentProfile, TargetRole, User,
};
use pretty_assertions::assert_eq;
use serde_json::{from_value, json, to_value};
use serde_test::{assert_tokens, Token};

#[test]
fn test_role_tokens() {
    assert_tokens(&Role::Admin, &[Token::UnitVariant { name: "Role", variant: "admin" }]);
    assert_tokens(&Role::Tutor, &[Token::UnitVariant { name: "Role", variant: "tutor" }]);
    assert_tokens(&Role::Student, &[Token::UnitVariant { name: "Role", variant: "student" }]);
}

#[test]
fn test_assignment_type_tokens() {
    assert_tokens(
        &AssignmentType::MockTest,
        &[Token::UnitVariant { name: "AssignmentType", variant: "mock_test" }],
    );
}

#[test]
fn test_student_user_deserialization() {
    let user: User = from_value(json!({
        "id": "s1",
        "name": "Priya",
        "email": "priya@example.com",
        "password": "secret",
        "role": "student",
        "phone": "555-0100",
        "class": "10",
        "parentName": "Lakshmi"
    }))
    .expect("Failed to deserialize user");

    assert_eq!(user.role, Role::Student);
    assert_eq!(user.profile.class_name.as_deref(), Some("10"));
    assert_eq!(user.profile.parent_name.as_deref(), Some("Lakshmi"));
    assert_eq!(user.profile.school, None);
}

#[test]
fn test_profile_serializes_only_present_fields() {
    let profile = StudentProfile {
        phone: Some("555-0100".to_string()),
        class_name: Some("9".to_string()),
        ..StudentProfile::default()
    };

    assert_eq!(to_value(&profile).unwrap(), json!({ "phone": "555-0100", "class": "9" }));
}

#[test]
fn test_class_status_keeps_unknown_values() {
    let class: ClassSession = from_value(json!({
        "id": "c1",
        "subject": "Physics",
        "time": "2024-06-01T09:00",
        "tutorId": "t1",
        "status": "completed"
    }))
    .unwrap();

    assert_eq!(class.status, ClassStatus::Other("completed".to_string()));
    assert_eq!(to_value(&class.status).unwrap(), json!("completed"));
    assert!(class.scheduled_at().is_some());
}

#[test]
fn test_class_status_defaults_to_scheduled() {
    let class: ClassSession = from_value(json!({
        "id": "c1",
        "subject": "Physics",
        "time": "not a time",
        "tutorId": "t1"
    }))
    .unwrap();

    assert_eq!(class.status, ClassStatus::Scheduled);
    assert_eq!(class.scheduled_at(), None);
}

#[test]
fn test_change_request_wire_names() {
    let request: ChangeRequest = from_value(json!({
        "id": "r1",
        "classId": "c1",
        "tutorId": "t1",
        "type": "swap",
        "reason": "Travelling",
        "newTutorId": "t2",
        "status": "pending"
    }))
    .unwrap();

    assert_eq!(request.kind, RequestType::Swap);
    assert_eq!(request.new_tutor_id.as_deref(), Some("t2"));
    assert!(request.is_pending());
    assert!(!request.status.is_terminal());
    assert!(RequestStatus::Approved.is_terminal());
}

#[test]
fn test_change_request_blank_fields_read_as_absent() {
    let request: ChangeRequest = from_value(json!({
        "id": "r2",
        "classId": "c1",
        "tutorId": "t1",
        "type": "cancel",
        "reason": "Ill",
        "newTime": "",
        "newTutorId": "  ",
        "status": "pending"
    }))
    .unwrap();

    assert_eq!(request.new_time, None);
    assert_eq!(request.new_tutor_id, None);
    assert_eq!(
        to_value(&request).unwrap(),
        json!({
            "id": "r2",
            "classId": "c1",
            "tutorId": "t1",
            "type": "cancel",
            "reason": "Ill",
            "status": "pending"
        })
    );
}

#[test]
fn test_new_reschedule_request_formats_time() {
    let body = NewChangeRequest {
        class_id: "c1".to_string(),
        tutor_id: "t1".to_string(),
        kind: RequestType::Reschedule,
        reason: "Exam week".to_string(),
        new_time: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap().and_hms_opt(16, 30, 0),
        new_tutor_id: None,
        status: RequestStatus::Pending,
    };

    assert_eq!(
        to_value(&body).unwrap(),
        json!({
            "classId": "c1",
            "tutorId": "t1",
            "type": "reschedule",
            "reason": "Exam week",
            "newTime": "2024-06-03T16:30",
            "status": "pending"
        })
    );
}

#[test]
fn test_attendance_record_serialization() {
    let record = AttendanceRecord {
        id: None,
        class_id: "c1".to_string(),
        student_id: "s1".to_string(),
        status: AttendanceStatus::Present,
        date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    };

    assert_eq!(
        to_value(&record).unwrap(),
        json!({ "classId": "c1", "studentId": "s1", "status": "present", "date": "2024-06-01" })
    );
}

#[test]
fn test_performance_score_accepts_text() {
    let record: PerformanceRecord = from_value(json!({
        "studentId": "s1",
        "subject": "Maths",
        "examName": "Midterm",
        "score": "88",
        "type": "academic"
    }))
    .unwrap();

    assert_eq!(record.score, 88.0);
    assert!(record.is_academic());
}

#[test]
fn test_performance_bad_score_reads_as_zero() {
    let record: PerformanceRecord = from_value(json!({
        "studentId": "s1",
        "subject": "Maths",
        "score": "eighty",
        "remarks": "typo in entry"
    }))
    .unwrap();

    assert_eq!(record.score, 0.0);
    assert!(!record.is_academic());
}

#[test]
fn test_assignment_empty_due_date() {
    let assignment: Assignment = from_value(json!({
        "id": "a1",
        "classId": "c1",
        "tutorId": "t1",
        "title": "Worksheet",
        "description": "",
        "link": "",
        "dueDate": "",
        "type": "mock_test"
    }))
    .unwrap();

    assert_eq!(assignment.due_date, None);
    assert_eq!(assignment.kind, AssignmentType::MockTest);
    assert_eq!(assignment.kind.label(), "Mock Test");
}

#[test]
fn test_target_role_audience() {
    assert!(TargetRole::All.includes(Role::Tutor));
    assert!(TargetRole::Student.includes(Role::Student));
    assert!(!TargetRole::Student.includes(Role::Tutor));
    assert!(!TargetRole::Tutor.includes(Role::Admin));
}

#[test]
fn test_role_parsing() {
    assert_eq!("Tutor".parse::<Role>().unwrap(), Role::Tutor);
    assert!("parent".parse::<Role>().is_err());
}
