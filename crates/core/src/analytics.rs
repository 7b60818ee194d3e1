//! # Analytics Aggregation
//!
//! Pure aggregation over collections that have already been fetched. Nothing here is
//! incremental: every report is recomputed from the full input, so the same input always yields
//! the same output.
//!
//! Rounding is half-up to the nearest integer, and an empty denominator yields 0.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::{AttendanceRecord, AttendanceStatus, ClassSession, PerformanceRecord, Role, User};

/// Rounds half-up; non-finite input rounds to 0.
pub fn round_half_up(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    (value + 0.5).floor() as i64
}

/// `round(100 * part / total)`, or 0 when `total` is 0. Always within `0..=100` for `part <= total`.
pub fn percentage(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    round_half_up(100.0 * part as f64 / total as f64).clamp(0, 100) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AttendanceSummary {
    pub total: usize,
    pub present: usize,
    pub percentage: u8,
}

pub fn attendance_summary(records: &[AttendanceRecord]) -> AttendanceSummary {
    let total = records.len();
    let present = records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Present)
        .count();
    AttendanceSummary {
        total,
        present,
        percentage: percentage(present, total),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StudentAttendance {
    pub percentage: u8,
    /// Status of the most recent record by date; `None` when the student has no records.
    pub last_status: Option<AttendanceStatus>,
}

impl StudentAttendance {
    pub fn last_status_label(&self) -> String {
        self.last_status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

pub fn student_attendance(records: &[AttendanceRecord], student_id: &str) -> StudentAttendance {
    let mine: Vec<&AttendanceRecord> = records.iter().filter(|r| r.student_id == student_id).collect();
    let present = mine
        .iter()
        .filter(|r| r.status == AttendanceStatus::Present)
        .count();

    // Earliest-listed record wins among records sharing the latest date.
    let latest = mine.iter().copied().fold(None::<&AttendanceRecord>, |best, r| match best {
        Some(b) if b.date >= r.date => Some(b),
        _ => Some(r),
    });

    StudentAttendance {
        percentage: percentage(present, mine.len()),
        last_status: latest.map(|r| r.status),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PerformanceSummary {
    pub average: i64,
    pub total_tests: usize,
}

/// Overall average over academic marks only.
pub fn academic_summary(records: &[PerformanceRecord]) -> PerformanceSummary {
    let (sum, count) = records
        .iter()
        .filter(|r| r.is_academic())
        .fold((0.0, 0usize), |(sum, count), r| (sum + r.score, count + 1));
    PerformanceSummary {
        average: if count == 0 { 0 } else { round_half_up(sum / count as f64) },
        total_tests: count,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectAverage {
    pub subject: String,
    pub average: i64,
    pub count: usize,
}

/// Average academic score per subject, in order of each subject's first appearance.
pub fn subject_averages(records: &[PerformanceRecord]) -> Vec<SubjectAverage> {
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<&str, (f64, usize)> = HashMap::new();

    for record in records.iter().filter(|r| r.is_academic()) {
        let entry = totals.entry(record.subject.as_str()).or_insert_with(|| {
            order.push(record.subject.clone());
            (0.0, 0)
        });
        entry.0 += record.score;
        entry.1 += 1;
    }

    order
        .into_iter()
        .map(|subject| {
            let (sum, count) = totals[subject.as_str()];
            SubjectAverage {
                average: round_half_up(sum / count as f64),
                subject,
                count,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TutorClassStats {
    pub total: usize,
    pub completed: usize,
    pub upcoming: usize,
}

/// Class counts for one tutor relative to `now`.
///
/// Cancelled classes are neither completed nor upcoming, and a class scheduled exactly at `now` is
/// neither. Classes with an unreadable time only count toward the total.
pub fn tutor_class_stats(classes: &[ClassSession], tutor_id: &str, now: NaiveDateTime) -> TutorClassStats {
    let mut stats = TutorClassStats::default();
    for class in classes.iter().filter(|c| c.tutor_id == tutor_id) {
        stats.total += 1;
        if class.status.is_cancelled() {
            continue;
        }
        match class.scheduled_at() {
            Some(at) if at < now => stats.completed += 1,
            Some(at) if at > now => stats.upcoming += 1,
            _ => {}
        }
    }
    stats
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RoleCounts {
    pub admins: usize,
    pub tutors: usize,
    pub students: usize,
}

pub fn role_counts(users: &[User]) -> RoleCounts {
    users.iter().fold(RoleCounts::default(), |mut counts, user| {
        match user.role {
            Role::Admin => counts.admins += 1,
            Role::Tutor => counts.tutors += 1,
            Role::Student => counts.students += 1,
        }
        counts
    })
}

/// Everything the admin analytics tab shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AnalyticsReport {
    pub attendance: AttendanceSummary,
    pub performance: PerformanceSummary,
    pub subjects: Vec<SubjectAverage>,
}

pub fn analytics_report(attendance: &[AttendanceRecord], performance: &[PerformanceRecord]) -> AnalyticsReport {
    AnalyticsReport {
        attendance: attendance_summary(attendance),
        performance: academic_summary(performance),
        subjects: subject_averages(performance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_rounds_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.4999), 2);
        assert_eq!(round_half_up(f64::NAN), 0);
    }

    #[test]
    fn two_of_three_is_67() {
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
    }

    #[test]
    fn empty_total_is_zero() {
        assert_eq!(percentage(0, 0), 0);
    }
}
