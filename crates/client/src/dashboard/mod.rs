//! Per-role dashboards.
//!
//! A dashboard caches the collections its views need, the active tab, and any in-progress
//! selection. None of it is persisted. `refresh` refetches everything; a failed fetch is logged
//! and the previously cached collection stays in place. Fetch results are applied in the order
//! they complete, so the last response to arrive wins.

pub mod admin;
pub mod student;
pub mod tutor;

pub use admin::{AdminDashboard, AdminTab};
pub use student::{StudentDashboard, StudentTab};
pub use tutor::{TutorDashboard, TutorTab};

use classdesk_core::errors::DeskResult;
use tracing::error;

pub const NO_CLASSES_ASSIGNED: &str = "No classes assigned";
pub const NO_CLASSES_SCHEDULED: &str = "No classes scheduled.";
pub const NO_ASSIGNMENTS: &str = "No assignments found.";
pub const NO_ANNOUNCEMENTS: &str = "No announcements found.";
pub const NO_REQUESTS: &str = "No requests found.";
pub const NO_TUTORS: &str = "No tutors found.";
pub const NO_STUDENTS: &str = "No students found.";

/// A list view: either the rows to show or the message shown in their place.
#[derive(Debug, PartialEq)]
pub enum Listing<'a, T> {
    Empty(&'static str),
    Items(&'a [T]),
}

impl<'a, T> Listing<'a, T> {
    pub fn of(items: &'a [T], empty: &'static str) -> Self {
        if items.is_empty() {
            Listing::Empty(empty)
        } else {
            Listing::Items(items)
        }
    }

    pub fn items(&self) -> &'a [T] {
        match self {
            Listing::Empty(_) => &[],
            Listing::Items(items) => items,
        }
    }
}

/// Replaces `slot` with a fresh fetch, or logs and keeps the stale copy.
pub(crate) fn apply_fetch<T>(slot: &mut Vec<T>, result: DeskResult<Vec<T>>, what: &str) -> bool {
    match result {
        Ok(items) => {
            *slot = items;
            true
        }
        Err(e) => {
            error!("Failed to fetch {}: {}", what, e);
            false
        }
    }
}

/// Shared parsing for `--tab` style selectors.
pub(crate) fn parse_tab<T: Copy>(raw: &str, tabs: &[(&str, T)]) -> Result<T, String> {
    let wanted = raw.trim().to_ascii_lowercase();
    tabs.iter()
        .find(|(name, _)| *name == wanted)
        .map(|(_, tab)| *tab)
        .ok_or_else(|| {
            let names: Vec<&str> = tabs.iter().map(|(name, _)| *name).collect();
            format!("Unknown tab {:?} (expected one of: {})", raw, names.join(", "))
        })
}
