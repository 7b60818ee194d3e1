use chrono::NaiveDateTime;
use classdesk_core::access::{guard, navigate, GuardDecision, Route};
use classdesk_core::errors::{DeskError, DeskResult};
use classdesk_core::models::{Role, User};
use tracing::{debug, info};

pub mod account;
pub mod admin;
pub mod render;
pub mod shared;
pub mod student;
pub mod tutor;

pub use render::Screen;

use crate::api::ResourceApi;
use crate::commands::Command;
use crate::session::SessionStore;

/// Shared context for command handlers.
///
/// Bundles the resource client, the session store and the clock reading used for "today" and
/// for upcoming/completed class counts.
pub struct HandlerContext<'a> {
    pub api: &'a dyn ResourceApi,
    pub session: &'a mut SessionStore,
    pub now: NaiveDateTime,
}

impl HandlerContext<'_> {
    /// The signed-in user, cloned so handlers can keep using the context mutably.
    pub fn user(&self) -> DeskResult<User> {
        self.session.require_user().cloned()
    }
}

/// Runs the access guard for a command that needs one of `roles`.
pub fn authorize(session: &SessionStore, roles: &[Role]) -> DeskResult<()> {
    match guard(session.access_state(), roles) {
        GuardDecision::Render => Ok(()),
        GuardDecision::Placeholder => Err(DeskError::Authentication(
            "Session is still loading".to_string(),
        )),
        GuardDecision::Redirect(Route::Login) => Err(DeskError::Authentication(
            "Please log in first (classdesk login --email <email> --password <password>)".to_string(),
        )),
        GuardDecision::Redirect(home) => Err(DeskError::Authorization(format!(
            "This command is not available to your role; your dashboard is {home}"
        ))),
    }
}

/// Handles one parsed command.
pub async fn dispatch(ctx: &mut HandlerContext<'_>, command: Command) -> DeskResult<Screen> {
    debug!("Dispatching {:?}", command);
    if let Some(roles) = command.allowed_roles() {
        authorize(ctx.session, roles)?;
    }

    match command {
        Command::Login { email, password } => account::login(ctx, &email, &password).await,
        Command::Logout => account::logout(ctx).await,
        Command::Whoami => account::whoami(ctx),
        Command::Open { path, tab } => open(ctx, &path, tab.as_deref()).await,
        Command::Users { action } => admin::users(ctx, action).await,
        Command::Overview => admin::overview(ctx).await,
        Command::Analytics => admin::analytics(ctx).await,
        Command::Classes { action } => shared::classes(ctx, action).await,
        Command::Attendance { action } => tutor::attendance(ctx, action).await,
        Command::Requests { action } => match ctx.user()?.role {
            Role::Admin => admin::requests(ctx, action).await,
            _ => tutor::requests(ctx, action).await,
        },
        Command::Announcements { action } => shared::announcements(ctx, action).await,
        Command::Assignments { action } => shared::assignments(ctx, action).await,
        Command::Performance { action } => shared::performance(ctx, action).await,
        Command::Profile(args) => account::profile(ctx, args).await,
    }
}

/// Navigates to a dashboard path the way a browser would: protected views redirect to the
/// login page or to the user's own home.
pub async fn open(ctx: &mut HandlerContext<'_>, path: &str, tab: Option<&str>) -> DeskResult<Screen> {
    let route = Route::parse(path)?;
    let mut screen = Screen::new();

    let target = match navigate(ctx.session.access_state(), &route) {
        GuardDecision::Placeholder => {
            screen.line("Loading...");
            return Ok(screen);
        }
        GuardDecision::Redirect(to) => {
            info!("Redirecting {} to {}", route, to);
            screen.line(format!("Redirected to {to}"));
            to
        }
        GuardDecision::Render => route,
    };

    match target {
        Route::Root | Route::Login => account::login_page(ctx, &mut screen),
        Route::AdminHome => admin::render(ctx, tab, &mut screen).await?,
        Route::AdminUserDetails(id) => admin::render_user(ctx, &id, &mut screen).await?,
        Route::TutorHome => tutor::render(ctx, tab, &mut screen).await?,
        Route::StudentHome => student::render(ctx, tab, &mut screen).await?,
    }
    Ok(screen)
}
