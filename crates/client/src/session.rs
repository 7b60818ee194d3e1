//! Session store.
//!
//! Holds the signed-in identity for the lifetime of the process and keeps it in a small JSON file
//! between CLI invocations. The store is passed around explicitly; nothing reads it globally.

use chrono::{DateTime, Utc};
use classdesk_core::access::AccessState;
use classdesk_core::errors::{DeskError, DeskResult};
use classdesk_core::models::User;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::ResourceApi;

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Contents of the session file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub token: String,
    pub user: User,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// `initialize` has not finished yet.
    Loading,
    Unauthenticated,
    Authenticated(PersistedSession),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Success { user: User },
    Failure { message: String },
}

#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    state: SessionState,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: SessionState::Loading,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Restores a previous session from disk.
    ///
    /// A missing file means nobody is signed in. A file that cannot be read or parsed is removed
    /// and also resolves to signed out.
    pub async fn initialize(&mut self) -> &SessionState {
        self.state = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => match serde_json::from_str::<PersistedSession>(&contents) {
                Ok(session) => {
                    debug!("Restored session for {}", session.user.email);
                    SessionState::Authenticated(session)
                }
                Err(e) => {
                    warn!("Discarding corrupt session file {}: {}", self.path.display(), e);
                    self.remove_file().await;
                    SessionState::Unauthenticated
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => SessionState::Unauthenticated,
            Err(e) => {
                warn!("Could not read session file {}: {}", self.path.display(), e);
                self.remove_file().await;
                SessionState::Unauthenticated
            }
        };
        &self.state
    }

    /// Checks the credentials against the user collection.
    ///
    /// Exactly one matching user signs in; anything else is a [`LoginOutcome::Failure`]. Transport
    /// and API errors are returned as errors so they are never mistaken for a wrong password.
    pub async fn login(
        &mut self,
        api: &dyn ResourceApi,
        email: &str,
        password: &str,
    ) -> DeskResult<LoginOutcome> {
        let mut matches = api.find_users_by_credentials(email.trim(), password).await?;
        if matches.len() != 1 {
            debug!("Login rejected: {} matching users", matches.len());
            return Ok(LoginOutcome::Failure {
                message: INVALID_CREDENTIALS.to_string(),
            });
        }

        let mut user = matches.remove(0);
        user.password = None;

        let session = PersistedSession {
            token: Uuid::new_v4().to_string(),
            user: user.clone(),
            created_at: Utc::now(),
        };
        self.write_file(&session).await?;

        info!("Signed in as {} ({})", user.email, user.role);
        self.state = SessionState::Authenticated(session);
        Ok(LoginOutcome::Success { user })
    }

    pub async fn logout(&mut self) -> DeskResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(DeskError::Internal(Box::new(e))),
        }
        if let Some(user) = self.current_user() {
            info!("Signed out {}", user.email);
        }
        self.state = SessionState::Unauthenticated;
        Ok(())
    }

    pub fn current_user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated(session) => Some(&session.user),
            _ => None,
        }
    }

    /// The signed-in user, or an authentication error.
    pub fn require_user(&self) -> DeskResult<&User> {
        self.current_user()
            .ok_or_else(|| DeskError::Authentication("Please log in first".to_string()))
    }

    /// Replaces the cached identity after the user's own record changed on the server.
    pub async fn replace_user(&mut self, mut user: User) -> DeskResult<()> {
        let SessionState::Authenticated(session) = &self.state else {
            return Err(DeskError::Authentication("Please log in first".to_string()));
        };
        user.password = None;
        let session = PersistedSession {
            user,
            ..session.clone()
        };
        self.write_file(&session).await?;
        self.state = SessionState::Authenticated(session);
        Ok(())
    }

    pub fn access_state(&self) -> AccessState {
        match &self.state {
            SessionState::Loading => AccessState::Loading,
            SessionState::Unauthenticated => AccessState::Unauthenticated,
            SessionState::Authenticated(session) => AccessState::Authenticated(session.user.role),
        }
    }

    async fn write_file(&self, session: &PersistedSession) -> DeskResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DeskError::Internal(Box::new(e)))?;
        }
        let contents = serde_json::to_string_pretty(session)
            .map_err(|e| DeskError::Internal(Box::new(e)))?;
        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|e| DeskError::Internal(Box::new(e)))
    }

    async fn remove_file(&self) {
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            if e.kind() != ErrorKind::NotFound {
                warn!("Could not remove session file {}: {}", self.path.display(), e);
            }
        }
    }
}
