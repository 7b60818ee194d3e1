//! Plain-text rendering of dashboard views.

use classdesk_core::models::wire::format_local_datetime;
use classdesk_core::models::{
    Announcement, Assignment, ChangeRequest, ClassSession, PerformanceRecord, RequestType,
    StudentProfile, User,
};
use std::fmt;

use crate::dashboard::Listing;
use crate::workflows::performance::PerformanceBook;
use crate::workflows::requests::available_actions;

/// Text produced by one command, printed by the binary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Screen {
    lines: Vec<String>,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    pub fn heading(&mut self, title: &str) {
        if !self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.lines.push(format!("== {title} =="));
    }

    pub fn listing<T>(&mut self, listing: Listing<'_, T>, row: impl Fn(&T) -> String) {
        match listing {
            Listing::Empty(message) => self.line(message),
            Listing::Items(items) => self.lines.extend(items.iter().map(row)),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

pub fn class_time(class: &ClassSession) -> String {
    class
        .scheduled_at()
        .map(|at| format_local_datetime(&at).replace('T', " "))
        .unwrap_or_else(|| class.time.clone())
}

pub fn class_row(class: &ClassSession, tutor_name: Option<&str>) -> String {
    let mut row = format!("[{}] {} at {} ({})", class.id, class.subject, class_time(class), class.status);
    if let Some(name) = tutor_name {
        row.push_str(&format!(" with {name}"));
    }
    if let Some(link) = &class.link {
        row.push_str(&format!(" {link}"));
    }
    row
}

pub fn user_row(user: &User) -> String {
    format!("[{}] {} <{}> {}", user.id, user.name, user.email, user.role)
}

pub fn profile_lines(screen: &mut Screen, profile: &StudentProfile) {
    let fields = [
        ("Phone", &profile.phone),
        ("School", &profile.school),
        ("Class", &profile.class_name),
        ("Place", &profile.place),
        ("Parent name", &profile.parent_name),
        ("Parent phone", &profile.parent_phone),
    ];
    for (label, value) in fields {
        screen.line(format!("{label}: {}", value.as_deref().unwrap_or("-")));
    }
}

pub fn announcement_row(announcement: &Announcement) -> String {
    format!(
        "[{}] {} ({} from {}{}): {}",
        announcement.id,
        announcement.title,
        announcement.target_role,
        announcement.author_name,
        announcement
            .date
            .as_deref()
            .map(|date| format!(", {date}"))
            .unwrap_or_default(),
        announcement.content
    )
}

pub fn assignment_row(assignment: &Assignment) -> String {
    let due = assignment
        .due_date
        .map(|date| format!(" due {date}"))
        .unwrap_or_default();
    let mut row = format!(
        "[{}] {}: {} (class {}){}",
        assignment.id, assignment.kind, assignment.title, assignment.class_id, due
    );
    if !assignment.link.is_empty() {
        row.push_str(&format!(" {}", assignment.link));
    }
    row
}

pub fn request_row(request: &ChangeRequest) -> String {
    let detail = match (request.kind, &request.new_time, &request.new_tutor_id) {
        (RequestType::Reschedule, Some(time), _) => format!(" to {time}"),
        (RequestType::Swap, _, Some(tutor)) => format!(" to tutor {tutor}"),
        _ => String::new(),
    };
    format!(
        "[{}] {}{} for class {} by {} ({}): {}",
        request.id, request.kind, detail, request.class_id, request.tutor_id, request.status, request.reason
    )
}

/// A request row followed by the decisions an admin can still take on it.
pub fn review_row(request: &ChangeRequest) -> String {
    let actions = available_actions(request);
    if actions.is_empty() {
        return request_row(request);
    }
    let names: Vec<String> = actions.iter().map(ToString::to_string).collect();
    format!("{} [actions: {}]", request_row(request), names.join(", "))
}

pub fn note_row(record: &PerformanceRecord) -> String {
    format!(
        "{}: {} {}",
        record.subject,
        record.score,
        record.remarks.as_deref().unwrap_or("")
    )
    .trim_end()
    .to_string()
}

pub fn mark_row(record: &PerformanceRecord) -> String {
    format!(
        "{} ({}): {}",
        record.subject,
        record.exam_name.as_deref().unwrap_or("exam"),
        record.score
    )
}

pub fn book_lines(screen: &mut Screen, book: &PerformanceBook) {
    screen.heading("Performance notes");
    screen.listing(book.notes_listing(), note_row);
    screen.heading("Academic marks");
    screen.listing(book.academic_listing(), mark_row);
}
