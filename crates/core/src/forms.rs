//! Form contracts.
//!
//! Each form is checked on the client before anything is sent; a failing form never reaches the
//! API. Converting a form yields the exact request body for the matching collection.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::errors::{DeskError, DeskResult};
use crate::models::{
    AssignmentType, ClassSession, ClassStatus, NewAnnouncement, NewAssignment, NewChangeRequest,
    NewClassSession, NewUser, PerformanceRecord, RequestStatus, RequestType, Role, TargetRole, User,
};

fn required(field: &str, value: &str) -> DeskResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DeskError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRequestForm {
    pub kind: RequestType,
    pub reason: String,
    pub new_time: Option<NaiveDateTime>,
    pub new_tutor_id: Option<String>,
}

impl ChangeRequestForm {
    pub fn new(kind: RequestType, reason: &str) -> Self {
        Self {
            kind,
            reason: reason.to_string(),
            new_time: None,
            new_tutor_id: None,
        }
    }

    pub fn validate(&self) -> DeskResult<()> {
        required("Reason", &self.reason)?;
        match self.kind {
            RequestType::Cancel => Ok(()),
            RequestType::Reschedule if self.new_time.is_none() => Err(DeskError::Validation(
                "New time is required for a reschedule request".to_string(),
            )),
            RequestType::Swap if optional(self.new_tutor_id.as_deref()).is_none() => Err(
                DeskError::Validation("Replacement tutor is required for a swap request".to_string()),
            ),
            _ => Ok(()),
        }
    }

    /// Builds the request body; only the field belonging to the request's type is carried.
    pub fn into_request(self, class_id: &str, tutor_id: &str) -> DeskResult<NewChangeRequest> {
        self.validate()?;
        let (new_time, new_tutor_id) = match self.kind {
            RequestType::Cancel => (None, None),
            RequestType::Reschedule => (self.new_time, None),
            RequestType::Swap => (None, optional(self.new_tutor_id.as_deref())),
        };
        Ok(NewChangeRequest {
            class_id: class_id.to_string(),
            tutor_id: tutor_id.to_string(),
            kind: self.kind,
            reason: self.reason.trim().to_string(),
            new_time,
            new_tutor_id,
            status: RequestStatus::Pending,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassForm {
    pub subject: String,
    pub time: Option<NaiveDateTime>,
    /// Ignored when a tutor schedules; the tutor is always the actor.
    pub tutor_id: Option<String>,
    pub link: Option<String>,
}

impl ClassForm {
    pub fn into_new_class(self, actor: &User) -> DeskResult<NewClassSession> {
        let tutor_id = match actor.role {
            Role::Tutor => actor.id.clone(),
            Role::Admin => optional(self.tutor_id.as_deref())
                .ok_or_else(|| DeskError::Validation("Tutor is required".to_string()))?,
            Role::Student => {
                return Err(DeskError::Authorization(
                    "Students cannot schedule classes".to_string(),
                ));
            }
        };
        let subject = required("Subject", &self.subject)?;
        let time = self
            .time
            .ok_or_else(|| DeskError::Validation("Date & time is required".to_string()))?;

        Ok(NewClassSession {
            subject,
            time,
            tutor_id,
            status: ClassStatus::Scheduled,
            link: optional(self.link.as_deref()),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnouncementForm {
    pub title: String,
    pub content: String,
    /// Defaults by author: admins broadcast to everyone, tutors to students.
    pub target_role: Option<TargetRole>,
}

impl AnnouncementForm {
    pub fn into_new(self, author: &User, posted_at: DateTime<Utc>) -> DeskResult<NewAnnouncement> {
        let default_target = match author.role {
            Role::Admin => TargetRole::All,
            Role::Tutor => TargetRole::Student,
            Role::Student => {
                return Err(DeskError::Authorization(
                    "Students cannot post announcements".to_string(),
                ));
            }
        };
        Ok(NewAnnouncement {
            title: required("Title", &self.title)?,
            content: required("Content", &self.content)?,
            target_role: self.target_role.unwrap_or(default_target),
            author_id: author.id.clone(),
            author_name: author.name.clone(),
            date: posted_at.to_rfc3339(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentForm {
    pub title: String,
    pub description: String,
    pub link: String,
    pub due_date: Option<NaiveDate>,
    pub kind: AssignmentType,
}

impl AssignmentForm {
    pub fn into_new(self, class: Option<&ClassSession>, tutor: &User) -> DeskResult<NewAssignment> {
        let class = class
            .ok_or_else(|| DeskError::Validation("Please select a class first".to_string()))?;
        Ok(NewAssignment {
            class_id: class.id.clone(),
            tutor_id: tutor.id.clone(),
            title: required("Title", &self.title)?,
            description: self.description.trim().to_string(),
            link: self.link.trim().to_string(),
            due_date: self.due_date,
            kind: self.kind,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl UserForm {
    pub fn into_new_user(self) -> DeskResult<NewUser> {
        Ok(NewUser {
            name: required("Name", &self.name)?,
            email: required("Email", &self.email)?,
            password: required("Password", &self.password)?,
            role: self.role,
        })
    }
}

/// Score entry shared by tutor notes and student marks. Kept as text as typed by the user.
fn parse_score(raw: &str) -> DeskResult<f64> {
    let raw = required("Score", raw)?;
    raw.parse::<f64>()
        .ok()
        .filter(|score| score.is_finite())
        .ok_or_else(|| DeskError::Validation(format!("Score must be a number, got {raw:?}")))
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceNoteForm {
    pub subject: String,
    pub score: String,
    pub remarks: String,
}

impl PerformanceNoteForm {
    pub fn into_record(self, student_id: &str) -> DeskResult<PerformanceRecord> {
        let subject = required("Subject", &self.subject)?;
        let score = parse_score(&self.score)?;
        Ok(PerformanceRecord::note(student_id, &subject, score, self.remarks.trim()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AcademicMarkForm {
    pub subject: String,
    pub exam_name: String,
    pub score: String,
}

impl AcademicMarkForm {
    pub fn into_record(self, student_id: &str) -> DeskResult<PerformanceRecord> {
        let subject = required("Subject", &self.subject)?;
        let exam_name = required("Exam name", &self.exam_name)?;
        let score = parse_score(&self.score)?;
        Ok(PerformanceRecord::academic(student_id, &subject, &exam_name, score))
    }
}
