//! Command line surface.
//!
//! Every command names the roles allowed to run it; the handlers pass that set through the access
//! guard before doing anything else.

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use classdesk_core::models::wire::parse_local_datetime;
use classdesk_core::models::{AssignmentType, RequestType, Role, StudentProfile, TargetRole};

const ADMIN: &[Role] = &[Role::Admin];
const TUTOR: &[Role] = &[Role::Tutor];
const STUDENT: &[Role] = &[Role::Student];
const STAFF: &[Role] = &[Role::Admin, Role::Tutor];
const ADMIN_OR_STUDENT: &[Role] = &[Role::Admin, Role::Student];
const CLASSROOM: &[Role] = &[Role::Tutor, Role::Student];
const EVERYONE: &[Role] = &[Role::Admin, Role::Tutor, Role::Student];

fn parse_time(raw: &str) -> Result<NaiveDateTime, String> {
    parse_local_datetime(raw).ok_or_else(|| format!("{raw:?} is not a date-time (expected YYYY-MM-DDTHH:MM)"))
}

#[derive(Debug, Parser)]
#[command(name = "classdesk", version, about = "Role-based tutoring dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the current session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Open a dashboard route such as /admin, /tutor, /student or /admin/user/<id>
    Open {
        path: String,
        #[arg(long)]
        tab: Option<String>,
    },
    /// Manage user accounts
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// List or schedule classes
    Classes {
        #[command(subcommand)]
        action: ClassAction,
    },
    /// Take attendance for one of your classes
    Attendance {
        #[command(subcommand)]
        action: AttendanceAction,
    },
    /// Class change requests
    Requests {
        #[command(subcommand)]
        action: RequestAction,
    },
    Announcements {
        #[command(subcommand)]
        action: AnnouncementAction,
    },
    Assignments {
        #[command(subcommand)]
        action: AssignmentAction,
    },
    /// Performance notes and academic marks
    Performance {
        #[command(subcommand)]
        action: PerformanceAction,
    },
    /// Show or edit your student profile
    Profile(ProfileArgs),
    /// Admin overview: counts, tutors, students and pending requests
    Overview,
    /// Attendance and academic analytics
    Analytics,
}

#[derive(Debug, Subcommand)]
pub enum UserAction {
    List,
    Show {
        id: String,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "student")]
        role: Role,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        role: Option<Role>,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ClassAction {
    List,
    Schedule {
        #[arg(long)]
        subject: String,
        /// Local date-time, e.g. 2024-05-01T16:30
        #[arg(long, value_parser = parse_time)]
        time: NaiveDateTime,
        /// Required for admins; tutors always schedule for themselves
        #[arg(long)]
        tutor: Option<String>,
        #[arg(long)]
        link: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum AttendanceAction {
    /// List the students that can be marked
    Roster,
    /// Mark students for a class and save the marks for today
    Mark {
        #[arg(long = "class")]
        class_id: String,
        #[arg(long, value_delimiter = ',')]
        present: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        absent: Vec<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum RequestAction {
    List,
    Submit {
        #[arg(long = "class")]
        class_id: String,
        #[arg(long = "type")]
        kind: RequestType,
        #[arg(long)]
        reason: String,
        #[arg(long, value_parser = parse_time)]
        new_time: Option<NaiveDateTime>,
        #[arg(long = "new-tutor")]
        new_tutor_id: Option<String>,
    },
    /// Tutors who could take over a class in a swap
    Candidates,
    Approve {
        id: String,
    },
    Reject {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum AnnouncementAction {
    List,
    Post {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// all, student or tutor; defaults by role
        #[arg(long)]
        target: Option<TargetRole>,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum AssignmentAction {
    List,
    Create {
        #[arg(long = "class")]
        class_id: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        link: String,
        #[arg(long)]
        due: Option<NaiveDate>,
        #[arg(long = "type", default_value = "homework")]
        kind: AssignmentType,
    },
}

#[derive(Debug, Subcommand)]
pub enum PerformanceAction {
    /// Notes and marks for a student (students see their own)
    List {
        #[arg(long)]
        student: Option<String>,
    },
    Note {
        #[arg(long)]
        student: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        score: String,
        #[arg(long, default_value = "")]
        remarks: String,
    },
    /// Record one of your own exam results
    AddMark {
        #[arg(long)]
        subject: String,
        #[arg(long = "exam")]
        exam_name: String,
        #[arg(long)]
        score: String,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub school: Option<String>,
    #[arg(long = "class")]
    pub class_name: Option<String>,
    #[arg(long)]
    pub place: Option<String>,
    #[arg(long)]
    pub parent_name: Option<String>,
    #[arg(long)]
    pub parent_phone: Option<String>,
}

impl ProfileArgs {
    pub fn into_profile(self) -> StudentProfile {
        StudentProfile {
            phone: self.phone,
            school: self.school,
            class_name: self.class_name,
            place: self.place,
            parent_name: self.parent_name,
            parent_phone: self.parent_phone,
        }
    }
}

impl Command {
    /// Roles allowed to run the command, or `None` when it needs no signed-in user.
    pub fn allowed_roles(&self) -> Option<&'static [Role]> {
        match self {
            Command::Login { .. } | Command::Logout | Command::Whoami | Command::Open { .. } => None,
            Command::Users { .. } | Command::Overview | Command::Analytics => Some(ADMIN),
            Command::Classes { action } => match action {
                ClassAction::List => Some(EVERYONE),
                ClassAction::Schedule { .. } => Some(STAFF),
            },
            Command::Attendance { .. } => Some(TUTOR),
            Command::Requests { action } => match action {
                RequestAction::List | RequestAction::Approve { .. } | RequestAction::Reject { .. } => Some(ADMIN),
                RequestAction::Submit { .. } | RequestAction::Candidates => Some(TUTOR),
            },
            Command::Announcements { action } => match action {
                AnnouncementAction::List => Some(EVERYONE),
                AnnouncementAction::Post { .. } => Some(STAFF),
                AnnouncementAction::Delete { .. } => Some(ADMIN),
            },
            Command::Assignments { action } => match action {
                AssignmentAction::List => Some(CLASSROOM),
                AssignmentAction::Create { .. } => Some(TUTOR),
            },
            Command::Performance { action } => match action {
                PerformanceAction::List { .. } => Some(ADMIN_OR_STUDENT),
                PerformanceAction::Note { .. } => Some(STAFF),
                PerformanceAction::AddMark { .. } => Some(STUDENT),
            },
            Command::Profile(_) => Some(STUDENT),
        }
    }
}
