//! # Error Handling Middleware
//!
//! Maps [`DeskError`] to HTTP status codes and a JSON body of the form `{"error": "..."}`, so
//! every endpoint of the development API fails the same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use classdesk_core::errors::DeskError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use classdesk_api::middleware::error_handling::AppError;
/// use classdesk_core::errors::DeskError;
/// use serde_json::Value;
///
/// async fn handler(found: Option<Value>) -> Result<Json<Value>, AppError> {
///     let record = found.ok_or_else(|| DeskError::NotFound("users/42 not found".to_string()))?;
///     Ok(Json(record))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub DeskError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DeskError::NotFound(_) => StatusCode::NOT_FOUND,
            DeskError::Validation(_) => StatusCode::BAD_REQUEST,
            DeskError::Authentication(_) => StatusCode::UNAUTHORIZED,
            DeskError::Authorization(_) => StatusCode::FORBIDDEN,
            DeskError::Api { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            DeskError::Batch { .. } | DeskError::Transport(_) | DeskError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }
        let body = Json(json!({ "error": self.0.user_message() }));
        (status, body).into_response()
    }
}

/// Allows `?` on `DeskResult` inside handlers.
impl From<DeskError> for AppError {
    fn from(err: DeskError) -> Self {
        AppError(err)
    }
}

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(DeskError::Transport(err))
    }
}

/// Maps a DeskError straight to an HTTP response.
pub fn map_error(err: DeskError) -> Response {
    AppError(err).into_response()
}
