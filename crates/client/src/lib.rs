use chrono::Local;
use eyre::Result;
use tracing::debug;

pub mod api;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod handlers;
pub mod session;
pub mod workflows;

use crate::api::HttpApi;
use crate::commands::Cli;
use crate::config::ClientConfig;
use crate::handlers::{HandlerContext, Screen};
use crate::session::SessionStore;
use classdesk_core::errors::DeskError;

/// Run one CLI command against the configured API.
///
/// Restores the saved session, dispatches the command through the access guard and returns the
/// rendered output for the caller to print.
///
/// # Arguments
///
/// * `cli` - The parsed command line
/// * `config` - Client configuration (API URL, session file, timeouts)
pub async fn run(cli: Cli, config: ClientConfig) -> Result<Screen> {
    debug!("Using API at {}", config.api_url);
    let api = HttpApi::from_config(&config)?;

    let mut session = SessionStore::new(&config.session_file);
    session.initialize().await;

    let mut ctx = HandlerContext {
        api: &api,
        session: &mut session,
        now: Local::now().naive_local(),
    };
    let screen = handlers::dispatch(&mut ctx, cli.command).await?;
    Ok(screen)
}

/// The short message to show for a failed command, or `None` when the full report should be shown.
pub fn user_facing_message(report: &eyre::Report) -> Option<String> {
    match report.downcast_ref::<DeskError>()? {
        DeskError::Internal(_) => None,
        err => Some(err.user_message()),
    }
}
