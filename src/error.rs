use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session not found")]
    SessionNotFound,

    #[error("Session has expired")]
    SessionExpired,

    #[error("{0}")]
    RoundNotStarted(String),

    #[error("{0}")]
    RoundAlreadyCompleted(String),

    #[error("Time limit for this round has expired")]
    TimeExpired,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Code execution service unavailable: {0}")]
    Upstream(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Stable machine-readable code included in every error body.
    pub fn code(&self) -> &'static str {
        match self {
            Error::SessionNotFound => "session_not_found",
            Error::SessionExpired => "session_expired",
            Error::RoundNotStarted(_) => "round_not_started",
            Error::RoundAlreadyCompleted(_) => "round_already_completed",
            Error::TimeExpired => "time_expired",
            Error::InvalidInput(_) | Error::Validation(_) | Error::Json(_) => "invalid_input",
            Error::Upstream(_) | Error::Reqwest(_) => "execution_unavailable",
            Error::Unauthorized(_) => "unauthorized",
            Error::Conflict(_) => "conflict",
            Error::NotFound(_) => "not_found",
            _ => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Error::SessionNotFound | Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::SessionExpired
            | Error::RoundNotStarted(_)
            | Error::RoundAlreadyCompleted(_)
            | Error::TimeExpired => StatusCode::FORBIDDEN,
            Error::InvalidInput(_) | Error::Validation(_) | Error::Json(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::Upstream(_) | Error::Reqwest(_) => StatusCode::BAD_GATEWAY,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let code = self.code();

        // Server-side faults keep their detail in the logs only.
        let message = match &self {
            Error::Database(err) => {
                tracing::error!(error = %err, "database error");
                "An unexpected error occurred".to_string()
            }
            Error::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                "An unexpected error occurred".to_string()
            }
            Error::Io(err) => {
                tracing::error!(error = %err, "io error");
                "An unexpected error occurred".to_string()
            }
            Error::Anyhow(err) => {
                tracing::error!(error = %err, "internal error");
                "An unexpected error occurred".to_string()
            }
            Error::Config(msg) => {
                tracing::error!(error = %msg, "configuration error");
                "An unexpected error occurred".to_string()
            }
            Error::Reqwest(err) => {
                tracing::warn!(error = %err, "upstream request failed");
                "Code execution service is temporarily unavailable".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({ "error": code, "message": message }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            other => Error::Database(other),
        }
    }
}
