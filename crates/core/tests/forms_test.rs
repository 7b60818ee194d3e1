use chrono::{NaiveDate, TimeZone, Utc};
use classdesk_core::errors::DeskError;
use classdesk_core::forms::{
    AcademicMarkForm, AnnouncementForm, AssignmentForm, ChangeRequestForm, ClassForm,
    PerformanceNoteForm, UserForm,
};
use classdesk_core::models::{
    ClassSession, ClassStatus, RequestStatus, RequestType, Role, StudentProfile, TargetRole, User,
};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use pretty_assertions::assert_eq;

fn user(id: &str, role: Role) -> User {
    User {
        id: id.to_string(),
        name: Name().fake(),
        email: SafeEmail().fake(),
        password: None,
        role,
        profile: StudentProfile::default(),
    }
}

fn selected_class() -> ClassSession {
    ClassSession {
        id: "c1".to_string(),
        subject: "Maths".to_string(),
        time: "2024-06-01T10:00".to_string(),
        tutor_id: "t1".to_string(),
        status: ClassStatus::Scheduled,
        link: None,
    }
}

#[test]
fn reschedule_without_new_time_is_rejected() {
    let form = ChangeRequestForm::new(RequestType::Reschedule, "Clash with exams");

    assert!(matches!(form.validate(), Err(DeskError::Validation(_))));
    assert!(form.into_request("c1", "t1").is_err());
}

#[test]
fn swap_without_tutor_is_rejected() {
    let mut form = ChangeRequestForm::new(RequestType::Swap, "Unwell");
    form.new_tutor_id = Some("   ".to_string());

    assert!(matches!(form.validate(), Err(DeskError::Validation(_))));
}

#[test]
fn every_request_needs_a_reason() {
    let form = ChangeRequestForm::new(RequestType::Cancel, "  ");
    assert!(matches!(form.validate(), Err(DeskError::Validation(_))));
}

#[test]
fn request_only_carries_fields_for_its_type() {
    let mut form = ChangeRequestForm::new(RequestType::Cancel, "Holiday");
    form.new_time = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap().and_hms_opt(9, 0, 0);
    form.new_tutor_id = Some("t2".to_string());

    let body = form.into_request("c1", "t1").unwrap();

    assert_eq!(body.new_time, None);
    assert_eq!(body.new_tutor_id, None);
    assert_eq!(body.status, RequestStatus::Pending);
    assert_eq!(body.reason, "Holiday");
}

#[test]
fn tutor_schedules_for_themselves() {
    let tutor = user("t1", Role::Tutor);
    let form = ClassForm {
        subject: "Chemistry".to_string(),
        time: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap().and_hms_opt(10, 0, 0),
        tutor_id: Some("someone-else".to_string()),
        link: Some(" ".to_string()),
    };

    let body = form.into_new_class(&tutor).unwrap();

    assert_eq!(body.tutor_id, "t1");
    assert_eq!(body.status, ClassStatus::Scheduled);
    assert_eq!(body.link, None);
}

#[test]
fn admin_must_pick_a_tutor() {
    let admin = user("a1", Role::Admin);
    let form = ClassForm {
        subject: "Chemistry".to_string(),
        time: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap().and_hms_opt(10, 0, 0),
        ..ClassForm::default()
    };

    assert!(matches!(form.into_new_class(&admin), Err(DeskError::Validation(_))));
}

#[test]
fn students_cannot_schedule() {
    let form = ClassForm::default();
    assert!(matches!(
        form.into_new_class(&user("s1", Role::Student)),
        Err(DeskError::Authorization(_))
    ));
}

#[test]
fn announcement_target_defaults_by_author() {
    let posted_at = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
    let form = AnnouncementForm {
        title: "Holiday".to_string(),
        content: "No classes on Friday".to_string(),
        target_role: None,
    };

    let from_admin = form.clone().into_new(&user("a1", Role::Admin), posted_at).unwrap();
    let from_tutor = form.into_new(&user("t1", Role::Tutor), posted_at).unwrap();

    assert_eq!(from_admin.target_role, TargetRole::All);
    assert_eq!(from_tutor.target_role, TargetRole::Student);
    assert_eq!(from_tutor.author_id, "t1");
}

#[test]
fn assignment_needs_selected_class() {
    let form = AssignmentForm {
        title: "Worksheet 1".to_string(),
        ..AssignmentForm::default()
    };
    let tutor = user("t1", Role::Tutor);

    match form.clone().into_new(None, &tutor) {
        Err(DeskError::Validation(msg)) => assert_eq!(msg, "Please select a class first"),
        other => panic!("unexpected {other:?}"),
    }

    let class = selected_class();
    let body = form.into_new(Some(&class), &tutor).unwrap();
    assert_eq!(body.class_id, "c1");
    assert_eq!(body.tutor_id, "t1");
}

#[test]
fn user_form_requires_every_field() {
    let form = UserForm {
        name: "New Tutor".to_string(),
        email: "".to_string(),
        password: "pw".to_string(),
        role: Role::Tutor,
    };
    assert!(form.into_new_user().is_err());
}

#[test]
fn score_must_be_numeric() {
    let note = PerformanceNoteForm {
        subject: "Maths".to_string(),
        score: "A+".to_string(),
        remarks: "".to_string(),
    };
    assert!(matches!(note.into_record("s1"), Err(DeskError::Validation(_))));

    let mark = AcademicMarkForm {
        subject: "Maths".to_string(),
        exam_name: "Quarterly".to_string(),
        score: " 92.5 ".to_string(),
    };
    let record = mark.into_record("s1").unwrap();
    assert_eq!(record.score, 92.5);
    assert!(record.is_academic());
}
