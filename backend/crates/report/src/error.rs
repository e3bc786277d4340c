//! Report Error Types
//!
//! This module provides report-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Report-specific result type alias
pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// No session token, or one that failed verification
    #[error("Unauthorized")]
    Unauthenticated,

    /// The session names a user that no longer exists
    #[error("User not found")]
    UserNotFound,

    /// Role or department does not allow the action
    #[error("{0}")]
    Forbidden(String),

    #[error("Report not found")]
    ReportNotFound,

    /// Leader weekly report has nowhere to go
    #[error("Leader reports are not configured")]
    RecipientNotConfigured,

    #[error("{0}")]
    EmailDelivery(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ReportError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        ReportError::Forbidden(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ReportError::Validation(_) => StatusCode::BAD_REQUEST,
            ReportError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ReportError::Forbidden(_) => StatusCode::FORBIDDEN,
            ReportError::UserNotFound | ReportError::ReportNotFound => StatusCode::NOT_FOUND,
            ReportError::RecipientNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            ReportError::EmailDelivery(_) | ReportError::Database(_) | ReportError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReportError::Validation(_) => ErrorKind::BadRequest,
            ReportError::Unauthenticated => ErrorKind::Unauthorized,
            ReportError::Forbidden(_) => ErrorKind::Forbidden,
            ReportError::UserNotFound | ReportError::ReportNotFound => ErrorKind::NotFound,
            ReportError::RecipientNotConfigured => ErrorKind::ServiceUnavailable,
            ReportError::EmailDelivery(_) | ReportError::Database(_) | ReportError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            ReportError::Unauthenticated => {
                AppError::unauthorized(self.to_string()).with_action("Sign in again")
            }
            ReportError::Database(_) => AppError::internal("Database error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            ReportError::Database(e) => {
                tracing::error!(error = %e, "Report database error");
            }
            ReportError::EmailDelivery(msg) => {
                tracing::error!(error = %msg, "Report email delivery failed");
            }
            ReportError::Internal(msg) => {
                tracing::error!(message = %msg, "Report internal error");
            }
            ReportError::Forbidden(msg) => {
                tracing::warn!(reason = %msg, "Report action forbidden");
            }
            _ => {
                tracing::debug!(error = %self, "Report error");
            }
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for ReportError {
    fn from(err: AppError) -> Self {
        if err.is_client_error() {
            ReportError::Validation(err.message().to_string())
        } else {
            ReportError::Internal(err.to_string())
        }
    }
}

impl From<platform::mail::MailError> for ReportError {
    fn from(err: platform::mail::MailError) -> Self {
        tracing::error!(error = %err, "Mail transport error");
        ReportError::EmailDelivery("Failed to send email".to_string())
    }
}
