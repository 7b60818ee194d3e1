//! Commands whose output depends on the caller's role.

use classdesk_core::errors::{DeskError, DeskResult};
use classdesk_core::forms::{AcademicMarkForm, AnnouncementForm, AssignmentForm, ClassForm, PerformanceNoteForm};
use classdesk_core::models::Role;

use super::render::{announcement_row, book_lines, class_row, note_row, Screen};
use super::{admin, student, tutor, HandlerContext};
use crate::commands::{AnnouncementAction, AssignmentAction, ClassAction, PerformanceAction};
use crate::dashboard::{AdminDashboard, TutorDashboard};
use crate::workflows::performance;

pub async fn classes(ctx: &mut HandlerContext<'_>, action: ClassAction) -> DeskResult<Screen> {
    let user = ctx.user()?;
    let mut screen = Screen::new();

    match action {
        ClassAction::List => {
            let tab = Some("schedule");
            match user.role {
                Role::Admin => admin::render(ctx, tab, &mut screen).await?,
                Role::Tutor => tutor::render(ctx, tab, &mut screen).await?,
                Role::Student => student::render(ctx, tab, &mut screen).await?,
            }
        }
        ClassAction::Schedule {
            subject,
            time,
            tutor,
            link,
        } => {
            let form = ClassForm {
                subject,
                time: Some(time),
                tutor_id: tutor,
                link,
            };
            let created = match user.role {
                Role::Admin => AdminDashboard::new(user)?.schedule_class(ctx.api, form).await?,
                _ => TutorDashboard::new(user)?.schedule_class(ctx.api, form).await?,
            };
            screen.line(format!("Scheduled {}", class_row(&created, None)));
        }
    }
    Ok(screen)
}

pub async fn announcements(ctx: &mut HandlerContext<'_>, action: AnnouncementAction) -> DeskResult<Screen> {
    let user = ctx.user()?;
    let mut screen = Screen::new();

    match action {
        AnnouncementAction::List => {
            let tab = Some("announcements");
            match user.role {
                Role::Admin => admin::render(ctx, tab, &mut screen).await?,
                Role::Tutor => tutor::render(ctx, tab, &mut screen).await?,
                Role::Student => student::render(ctx, tab, &mut screen).await?,
            }
        }
        AnnouncementAction::Post {
            title,
            content,
            target,
        } => {
            let form = AnnouncementForm {
                title,
                content,
                target_role: target,
            };
            let created = match user.role {
                Role::Admin => AdminDashboard::new(user)?.post_announcement(ctx.api, form).await?,
                _ => TutorDashboard::new(user)?.post_announcement(ctx.api, form).await?,
            };
            screen.line(format!("Posted {}", announcement_row(&created)));
        }
        AnnouncementAction::Delete { id } => {
            AdminDashboard::new(user)?.delete_announcement(ctx.api, &id).await?;
            screen.line(format!("Deleted announcement {id}"));
        }
    }
    Ok(screen)
}

pub async fn assignments(ctx: &mut HandlerContext<'_>, action: AssignmentAction) -> DeskResult<Screen> {
    match action {
        AssignmentAction::List => {
            let mut screen = Screen::new();
            let tab = Some("assignments");
            match ctx.user()?.role {
                Role::Tutor => tutor::render(ctx, tab, &mut screen).await?,
                _ => student::render(ctx, tab, &mut screen).await?,
            }
            Ok(screen)
        }
        AssignmentAction::Create {
            class_id,
            title,
            description,
            link,
            due,
            kind,
        } => {
            let form = AssignmentForm {
                title,
                description,
                link,
                due_date: due,
                kind,
            };
            tutor::create_assignment(ctx, &class_id, form).await
        }
    }
}

pub async fn performance(ctx: &mut HandlerContext<'_>, action: PerformanceAction) -> DeskResult<Screen> {
    let user = ctx.user()?;

    match action {
        PerformanceAction::List { student } if user.is_admin() => {
            let student_id = student.ok_or_else(|| {
                DeskError::Validation("Choose a student with --student".to_string())
            })?;
            let book = performance::fetch_student_book(ctx.api, &student_id).await?;
            let mut screen = Screen::new();
            book_lines(&mut screen, &book);
            Ok(screen)
        }
        PerformanceAction::List { .. } => {
            let dashboard = student::load(ctx).await?;
            let mut screen = Screen::new();
            student::performance_tabs(&dashboard, &mut screen);
            Ok(screen)
        }
        PerformanceAction::Note {
            student,
            subject,
            score,
            remarks,
        } => {
            let form = PerformanceNoteForm {
                subject,
                score,
                remarks,
            };
            let created = performance::add_note(ctx.api, &user, &student, form).await?;
            let mut screen = Screen::new();
            screen.line(format!("Recorded note {}", note_row(&created)));
            Ok(screen)
        }
        PerformanceAction::AddMark {
            subject,
            exam_name,
            score,
        } => {
            let form = AcademicMarkForm {
                subject,
                exam_name,
                score,
            };
            student::add_mark(ctx, form).await
        }
    }
}
