use classdesk_core::errors::{DeskError, DeskResult};
use classdesk_core::forms::AcademicMarkForm;

use super::render::{announcement_row, assignment_row, class_row, mark_row, note_row, profile_lines, Screen};
use super::HandlerContext;
use crate::dashboard::{StudentDashboard, StudentTab};

pub(super) async fn load(ctx: &HandlerContext<'_>) -> DeskResult<StudentDashboard> {
    let mut dashboard = StudentDashboard::new(ctx.user()?)?;
    dashboard.refresh(ctx.api).await;
    Ok(dashboard)
}

pub(super) fn performance_tabs(dashboard: &StudentDashboard, screen: &mut Screen) {
    screen.heading("Performance notes");
    screen.listing(dashboard.performance_notes(), note_row);
    screen.heading("Academic marks");
    screen.listing(dashboard.academic_marks(), mark_row);
}

pub async fn add_mark(ctx: &mut HandlerContext<'_>, form: AcademicMarkForm) -> DeskResult<Screen> {
    let mut dashboard = load(ctx).await?;
    let created = dashboard.add_academic_mark(ctx.api, form).await?;

    let mut screen = Screen::new();
    screen.line(format!("Recorded {}", mark_row(&created)));
    screen.heading("Academic marks");
    screen.listing(dashboard.academic_marks(), mark_row);
    Ok(screen)
}

/// Renders one tab of the student dashboard; the schedule when no tab is given.
pub async fn render(ctx: &HandlerContext<'_>, tab: Option<&str>, screen: &mut Screen) -> DeskResult<()> {
    let mut dashboard = load(ctx).await?;
    if let Some(tab) = tab {
        dashboard.tab = tab.parse::<StudentTab>().map_err(DeskError::Validation)?;
    }

    match dashboard.tab {
        StudentTab::Schedule => {
            screen.heading("Classes");
            screen.listing(dashboard.schedule(), |class| class_row(class, None));
        }
        StudentTab::Profile => {
            screen.heading("Profile");
            screen.line(format!("{} <{}>", dashboard.user.name, dashboard.user.email));
            profile_lines(screen, dashboard.profile());
        }
        StudentTab::Performance => {
            screen.heading("Performance notes");
            screen.listing(dashboard.performance_notes(), note_row);
        }
        StudentTab::Academic => {
            screen.heading("Academic marks");
            screen.listing(dashboard.academic_marks(), mark_row);
        }
        StudentTab::Assignments => {
            screen.heading("Assignments");
            screen.listing(dashboard.assignments(), assignment_row);
        }
        StudentTab::Announcements => {
            screen.heading("Announcements");
            screen.listing(dashboard.announcements(), announcement_row);
        }
    }
    Ok(())
}
