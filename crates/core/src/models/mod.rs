//! Wire types for the REST collections.
//!
//! Field names follow the API's camelCase JSON. Values that the API echoes back as raw form text
//! (class times, scores, due dates) are read leniently; see [`wire`].

pub mod announcement;
pub mod assignment;
pub mod attendance;
pub mod change_request;
pub mod class_session;
pub mod performance;
pub mod user;
pub mod wire;

pub use announcement::{Announcement, NewAnnouncement, TargetRole};
pub use assignment::{Assignment, AssignmentType, NewAssignment};
pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use change_request::{ChangeRequest, NewChangeRequest, RequestStatus, RequestType, StatusUpdate};
pub use class_session::{ClassSession, ClassStatus, NewClassSession};
pub use performance::{PerformanceKind, PerformanceRecord};
pub use user::{NewUser, Role, StudentProfile, User};
