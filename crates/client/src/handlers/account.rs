use classdesk_core::access::Route;
use classdesk_core::errors::{DeskError, DeskResult};

use super::render::{profile_lines, Screen};
use super::HandlerContext;
use crate::commands::ProfileArgs;
use crate::dashboard::StudentDashboard;
use crate::session::LoginOutcome;
use crate::workflows::users;

pub async fn login(ctx: &mut HandlerContext<'_>, email: &str, password: &str) -> DeskResult<Screen> {
    match ctx.session.login(ctx.api, email, password).await? {
        LoginOutcome::Success { user } => {
            let mut screen = Screen::new();
            screen.line(format!("Welcome, {}! Signed in as {}.", user.name, user.role));
            screen.line(format!("Your dashboard: {}", Route::home_for(user.role)));
            Ok(screen)
        }
        LoginOutcome::Failure { message } => Err(DeskError::Authentication(message)),
    }
}

pub async fn logout(ctx: &mut HandlerContext<'_>) -> DeskResult<Screen> {
    ctx.session.logout().await?;
    let mut screen = Screen::new();
    screen.line("Signed out.");
    Ok(screen)
}

pub fn whoami(ctx: &HandlerContext<'_>) -> DeskResult<Screen> {
    let mut screen = Screen::new();
    match ctx.session.current_user() {
        Some(user) => {
            screen.line(format!("{} <{}> ({})", user.name, user.email, user.role));
            screen.line(format!("Dashboard: {}", Route::home_for(user.role)));
        }
        None => screen.line("Not signed in."),
    }
    Ok(screen)
}

pub fn login_page(ctx: &HandlerContext<'_>, screen: &mut Screen) {
    match ctx.session.current_user() {
        Some(user) => screen.line(format!(
            "Signed in as {}. Open {} to continue.",
            user.name,
            Route::home_for(user.role)
        )),
        None => screen.line("Sign in with: classdesk login --email <email> --password <password>"),
    }
}

/// Shows the student's profile, or saves the given fields when any are set.
pub async fn profile(ctx: &mut HandlerContext<'_>, args: ProfileArgs) -> DeskResult<Screen> {
    let mut dashboard = StudentDashboard::new(ctx.user()?)?;
    let profile = args.into_profile();
    let mut screen = Screen::new();

    if profile.is_empty() {
        let user = users::find_user(ctx.api, &dashboard.user.id).await?;
        screen.heading("Profile");
        screen.line(format!("{} <{}>", user.name, user.email));
        profile_lines(&mut screen, &user.profile);
        return Ok(screen);
    }

    let updated = dashboard.update_profile(ctx.api, &profile).await?.clone();
    ctx.session.replace_user(updated).await?;

    screen.line("Profile updated.");
    profile_lines(&mut screen, dashboard.profile());
    Ok(screen)
}
