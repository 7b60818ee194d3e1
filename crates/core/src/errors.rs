use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Some submissions of a fan-out batch failed; nothing was rolled back.
    #[error("{message}: {failed} of {total} submissions failed")]
    Batch {
        message: String,
        failed: usize,
        total: usize,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] eyre::Report),

    #[error("Internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl DeskError {
    /// Short, user-facing form of the error, without the category prefix.
    pub fn user_message(&self) -> String {
        match self {
            DeskError::NotFound(msg)
            | DeskError::Validation(msg)
            | DeskError::Authentication(msg)
            | DeskError::Authorization(msg) => msg.clone(),
            DeskError::Api { message, .. } | DeskError::Batch { message, .. } => message.clone(),
            DeskError::Transport(report) => report.to_string(),
            DeskError::Internal(err) => err.to_string(),
        }
    }
}

pub type DeskResult<T> = Result<T, DeskError>;
