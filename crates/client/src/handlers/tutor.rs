use classdesk_core::errors::{DeskError, DeskResult};
use classdesk_core::forms::{AssignmentForm, ChangeRequestForm};
use classdesk_core::models::AttendanceStatus;

use super::render::{announcement_row, assignment_row, class_row, user_row, Screen};
use super::HandlerContext;
use crate::commands::{AttendanceAction, RequestAction};
use crate::dashboard::{Listing, TutorDashboard, TutorTab, NO_TUTORS};

pub(super) async fn load(ctx: &HandlerContext<'_>) -> DeskResult<TutorDashboard> {
    let mut dashboard = TutorDashboard::new(ctx.user()?)?;
    dashboard.refresh(ctx.api).await;
    Ok(dashboard)
}

pub async fn attendance(ctx: &mut HandlerContext<'_>, action: AttendanceAction) -> DeskResult<Screen> {
    let mut dashboard = load(ctx).await?;
    let mut screen = Screen::new();

    match action {
        AttendanceAction::Roster => {
            screen.heading("Students");
            screen.listing(dashboard.students(), user_row);
        }
        AttendanceAction::Mark {
            class_id,
            present,
            absent,
        } => {
            let class = dashboard.select_class(&class_id)?.clone();
            let marks = present
                .iter()
                .map(|id| (id, AttendanceStatus::Present))
                .chain(absent.iter().map(|id| (id, AttendanceStatus::Absent)));
            for (student_id, status) in marks {
                dashboard.mark(student_id.trim(), status);
            }
            if !dashboard.draft().can_commit() {
                return Err(DeskError::Validation(
                    "Mark at least one student with --present or --absent".to_string(),
                ));
            }

            let today = ctx.now.date();
            let saved = dashboard.save_attendance(ctx.api, today).await?;
            screen.line(format!(
                "Saved attendance for {} on {} ({} students)",
                class.subject, today, saved
            ));
            for (student_id, status) in dashboard.draft().marks() {
                screen.line(format!("{student_id}: {status}"));
            }
        }
    }
    Ok(screen)
}

pub async fn requests(ctx: &mut HandlerContext<'_>, action: RequestAction) -> DeskResult<Screen> {
    let mut dashboard = load(ctx).await?;
    let mut screen = Screen::new();

    match action {
        RequestAction::Candidates => {
            screen.heading("Swap candidates");
            screen.listing(Listing::of(dashboard.swap_candidates(), NO_TUTORS), user_row);
        }
        RequestAction::Submit {
            class_id,
            kind,
            reason,
            new_time,
            new_tutor_id,
        } => {
            dashboard.select_class(&class_id)?;
            let form = ChangeRequestForm {
                kind,
                reason,
                new_time,
                new_tutor_id,
            };
            let created = dashboard.submit_request(ctx.api, form).await?;
            screen.line(format!("Submitted {} request {} (pending review)", created.kind, created.id));
        }
        RequestAction::List | RequestAction::Approve { .. } | RequestAction::Reject { .. } => {
            return Err(DeskError::Authorization(
                "Only admins can review change requests".to_string(),
            ));
        }
    }
    Ok(screen)
}

pub async fn create_assignment(
    ctx: &mut HandlerContext<'_>,
    class_id: &str,
    form: AssignmentForm,
) -> DeskResult<Screen> {
    let mut dashboard = load(ctx).await?;
    dashboard.select_class(class_id)?;
    let created = dashboard.create_assignment(ctx.api, form).await?;

    let mut screen = Screen::new();
    screen.line(format!("Created {}", assignment_row(&created)));
    Ok(screen)
}

/// Renders one tab of the tutor dashboard; the schedule when no tab is given.
pub async fn render(ctx: &HandlerContext<'_>, tab: Option<&str>, screen: &mut Screen) -> DeskResult<()> {
    let mut dashboard = load(ctx).await?;
    if let Some(tab) = tab {
        dashboard.tab = tab.parse::<TutorTab>().map_err(DeskError::Validation)?;
    }

    match dashboard.tab {
        TutorTab::Schedule => {
            screen.heading("My classes");
            screen.listing(dashboard.schedule(), |class| class_row(class, None));
            screen.heading("Students");
            screen.listing(dashboard.students(), user_row);
        }
        TutorTab::Assignments => {
            screen.heading("My assignments");
            screen.listing(dashboard.assignments(), assignment_row);
        }
        TutorTab::Announcements => {
            screen.heading("Announcements");
            screen.listing(dashboard.announcements(), announcement_row);
        }
    }
    Ok(())
}
