#![allow(dead_code)]

use classdesk_core::models::{
    Announcement, ChangeRequest, ClassSession, ClassStatus, RequestStatus, RequestType, Role,
    StudentProfile, TargetRole, User,
};

pub fn user(id: &str, name: &str, role: Role) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{id}@classdesk.test"),
        password: None,
        role,
        profile: StudentProfile::default(),
    }
}

pub fn admin() -> User {
    user("a1", "Ada Admin", Role::Admin)
}

pub fn tutor() -> User {
    user("t1", "Tom Tutor", Role::Tutor)
}

pub fn student() -> User {
    user("s1", "Sara Student", Role::Student)
}

pub fn class(id: &str, tutor_id: &str, time: &str) -> ClassSession {
    ClassSession {
        id: id.to_string(),
        subject: "Maths".to_string(),
        time: time.to_string(),
        tutor_id: tutor_id.to_string(),
        status: ClassStatus::Scheduled,
        link: None,
    }
}

pub fn request(id: &str, status: RequestStatus) -> ChangeRequest {
    ChangeRequest {
        id: id.to_string(),
        class_id: "c1".to_string(),
        tutor_id: "t1".to_string(),
        kind: RequestType::Cancel,
        reason: "Unwell".to_string(),
        new_time: None,
        new_tutor_id: None,
        status,
    }
}

pub fn announcement(id: &str, target_role: TargetRole) -> Announcement {
    Announcement {
        id: id.to_string(),
        title: format!("Notice {id}"),
        content: "Bring calculators".to_string(),
        target_role,
        author_id: "a1".to_string(),
        author_name: "Ada Admin".to_string(),
        date: None,
    }
}
