use classdesk_core::errors::{DeskError, DeskResult};
use classdesk_core::forms::UserForm;

use super::render::{announcement_row, book_lines, class_row, profile_lines, review_row, user_row, Screen};
use super::HandlerContext;
use crate::commands::{RequestAction, UserAction};
use crate::dashboard::{AdminDashboard, AdminTab, Listing, NO_REQUESTS, NO_STUDENTS, NO_TUTORS};
use crate::workflows::requests::ReviewDecision;
use crate::workflows::{performance, users};

async fn load(ctx: &HandlerContext<'_>) -> DeskResult<AdminDashboard> {
    let mut dashboard = AdminDashboard::new(ctx.user()?)?;
    dashboard.refresh(ctx.api).await;
    Ok(dashboard)
}

pub async fn users(ctx: &mut HandlerContext<'_>, action: UserAction) -> DeskResult<Screen> {
    let mut dashboard = load(ctx).await?;
    let mut screen = Screen::new();

    match action {
        UserAction::List => {
            screen.heading("Users");
            screen.listing(Listing::of(dashboard.users(), "No users found."), user_row);
        }
        UserAction::Show { id } => render_user(ctx, &id, &mut screen).await?,
        UserAction::Add {
            name,
            email,
            password,
            role,
        } => {
            let form = UserForm {
                name,
                email,
                password,
                role,
            };
            let created = dashboard.add_user(ctx.api, form).await?;
            screen.line(format!("Created {}", user_row(&created)));
        }
        UserAction::Update {
            id,
            name,
            email,
            password,
            role,
        } => {
            let mut user = users::find_user(ctx.api, &id).await?;
            if let Some(name) = name {
                user.name = name;
            }
            if let Some(email) = email {
                user.email = email;
            }
            if let Some(password) = password {
                user.password = Some(password);
            }
            if let Some(role) = role {
                user.role = role;
            }
            let updated = dashboard.update_user(ctx.api, &user).await?;
            screen.line(format!("Updated {}", user_row(&updated)));
        }
        UserAction::Delete { id } => {
            dashboard.delete_user(ctx.api, &id).await?;
            screen.line(format!("Deleted user {id}"));
        }
    }
    Ok(screen)
}

pub async fn render_user(ctx: &HandlerContext<'_>, id: &str, screen: &mut Screen) -> DeskResult<()> {
    let user = users::find_user(ctx.api, id).await?;
    screen.heading("User details");
    screen.line(user_row(&user));
    if user.is_student() {
        profile_lines(screen, &user.profile);
        let book = performance::fetch_student_book(ctx.api, &user.id).await?;
        book_lines(screen, &book);
    }
    Ok(())
}

pub async fn overview(ctx: &mut HandlerContext<'_>) -> DeskResult<Screen> {
    let dashboard = load(ctx).await?;
    let mut screen = Screen::new();
    overview_tab(ctx, &dashboard, &mut screen);
    Ok(screen)
}

fn overview_tab(ctx: &HandlerContext<'_>, dashboard: &AdminDashboard, screen: &mut Screen) {
    let counts = dashboard.role_counts();
    screen.heading("Overview");
    screen.line(format!("Tutors: {}  Students: {}", counts.tutors, counts.students));

    screen.heading("Users");
    screen.listing(Listing::of(dashboard.users(), "No users found."), user_row);

    screen.heading("Tutor overview");
    let tutors = dashboard.tutor_overview(ctx.now);
    screen.listing(Listing::of(&tutors, NO_TUTORS), |row| {
        format!(
            "{}: {} classes, {} completed, {} upcoming",
            row.tutor.name, row.stats.total, row.stats.completed, row.stats.upcoming
        )
    });

    screen.heading("Student overview");
    let students = dashboard.student_overview();
    screen.listing(Listing::of(&students, NO_STUDENTS), |row| {
        format!(
            "{}: attendance {}%, last {}",
            row.student.name,
            row.attendance.percentage,
            row.attendance.last_status_label()
        )
    });

    screen.heading("Pending requests");
    let pending = dashboard.pending_requests();
    if pending.is_empty() {
        screen.line(NO_REQUESTS);
    }
    for request in pending {
        screen.line(review_row(request));
    }
}

pub async fn analytics(ctx: &mut HandlerContext<'_>) -> DeskResult<Screen> {
    let dashboard = load(ctx).await?;
    let mut screen = Screen::new();
    analytics_tab(&dashboard, &mut screen);
    Ok(screen)
}

fn analytics_tab(dashboard: &AdminDashboard, screen: &mut Screen) {
    let report = dashboard.analytics();
    screen.heading("Analytics");
    screen.line(format!(
        "Attendance: {}% ({} of {} present)",
        report.attendance.percentage, report.attendance.present, report.attendance.total
    ));
    screen.line(format!(
        "Academic average: {} over {} tests",
        report.performance.average, report.performance.total_tests
    ));
    if report.subjects.is_empty() {
        screen.line("No academic marks found.");
    }
    for subject in &report.subjects {
        screen.line(format!("{}: {} ({} tests)", subject.subject, subject.average, subject.count));
    }
}

pub async fn requests(ctx: &mut HandlerContext<'_>, action: RequestAction) -> DeskResult<Screen> {
    let mut dashboard = load(ctx).await?;
    let mut screen = Screen::new();

    let (id, decision) = match action {
        RequestAction::List => {
            screen.heading("Change requests");
            screen.listing(dashboard.requests(), review_row);
            return Ok(screen);
        }
        RequestAction::Approve { id } => (id, ReviewDecision::Approve),
        RequestAction::Reject { id } => (id, ReviewDecision::Reject),
        RequestAction::Submit { .. } | RequestAction::Candidates => {
            return Err(DeskError::Authorization(
                "Only tutors can submit change requests".to_string(),
            ));
        }
    };

    let updated = dashboard.review(ctx.api, &id, decision).await?;
    screen.line(format!("Request {} {}", updated.id, updated.status));
    Ok(screen)
}

/// Renders one tab of the admin dashboard; the overview when no tab is given.
pub async fn render(ctx: &HandlerContext<'_>, tab: Option<&str>, screen: &mut Screen) -> DeskResult<()> {
    let mut dashboard = load(ctx).await?;
    if let Some(tab) = tab {
        dashboard.tab = tab.parse::<AdminTab>().map_err(DeskError::Validation)?;
    }

    match dashboard.tab {
        AdminTab::Overview => overview_tab(ctx, &dashboard, screen),
        AdminTab::Schedule => {
            screen.heading("Schedule");
            screen.listing(dashboard.schedule(), |class| {
                class_row(class, dashboard.user_name(&class.tutor_id))
            });
        }
        AdminTab::Analytics => analytics_tab(&dashboard, screen),
        AdminTab::Announcements => {
            screen.heading("Announcements");
            screen.listing(dashboard.announcements(), announcement_row);
        }
    }
    Ok(())
}
