//! Application error type shared by repositories, services and handlers.
//!
//! Every failure carries an [`ErrorKind`] from a closed set. The HTTP status and
//! the machine-readable `code` in the response body are derived from the kind,
//! so callers never have to inspect the human-readable message.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Closed set of failure kinds surfaced by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed request body (missing or ill-typed fields).
    Validation,
    InvalidUrl,
    InvalidSlugFormat,
    /// Custom slug collides with a fixed route such as `/health`.
    ReservedSlug,
    SlugTaken,
    InvalidExpiration,
    InvalidId,
    NotFound,
    Expired,
    Forbidden,
    Unauthorized,
    /// Slug generation hit its retry limit without finding a free slug.
    GenerationExhausted,
    PersistenceFailure,
    /// Any other server-side failure (e.g. the OS RNG is unavailable).
    Internal,
}

impl ErrorKind {
    /// HTTP status code returned for this kind.
    pub fn status(self) -> StatusCode {
        match self {
            Self::Validation
            | Self::InvalidUrl
            | Self::InvalidSlugFormat
            | Self::ReservedSlug
            | Self::SlugTaken
            | Self::InvalidExpiration
            | Self::InvalidId => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Expired => StatusCode::GONE,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::GenerationExhausted | Self::PersistenceFailure | Self::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable snake_case identifier used in error response bodies.
    pub fn code(self) -> &'static str {
        match self {
            Self::Validation => "validation_error",
            Self::InvalidUrl => "invalid_url",
            Self::InvalidSlugFormat => "invalid_slug_format",
            Self::ReservedSlug => "reserved_slug",
            Self::SlugTaken => "slug_taken",
            Self::InvalidExpiration => "invalid_expiration",
            Self::InvalidId => "invalid_id",
            Self::NotFound => "not_found",
            Self::Expired => "expired",
            Self::Forbidden => "forbidden",
            Self::Unauthorized => "unauthorized",
            Self::GenerationExhausted => "generation_exhausted",
            Self::PersistenceFailure | Self::Internal => "internal_error",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload: `{ code, message, details }`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Error returned by every fallible operation in the crate.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct AppError {
    kind: ErrorKind,
    message: String,
    details: Value,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, details: Value) -> Self {
        Self {
            kind,
            message: message.into(),
            details,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> &Value {
        &self.details
    }

    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::new(ErrorKind::Validation, message, details)
    }

    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::new(ErrorKind::InvalidUrl, message, details)
    }

    pub fn invalid_slug_format(details: Value) -> Self {
        Self::new(
            ErrorKind::InvalidSlugFormat,
            "Invalid slug format. Use only letters, numbers, hyphens, and underscores.",
            details,
        )
    }

    pub fn reserved_slug(details: Value) -> Self {
        Self::new(
            ErrorKind::ReservedSlug,
            "This slug is reserved. Choose another.",
            details,
        )
    }

    pub fn slug_taken(details: Value) -> Self {
        Self::new(
            ErrorKind::SlugTaken,
            "Slug already taken. Choose another.",
            details,
        )
    }

    pub fn invalid_expiration(details: Value) -> Self {
        Self::new(
            ErrorKind::InvalidExpiration,
            "Invalid expiration time. It must be a positive number.",
            details,
        )
    }

    pub fn invalid_id(details: Value) -> Self {
        Self::new(ErrorKind::InvalidId, "Invalid URL ID format.", details)
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::new(ErrorKind::NotFound, message, details)
    }

    pub fn expired(details: Value) -> Self {
        Self::new(ErrorKind::Expired, "URL has expired", details)
    }

    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::new(ErrorKind::Forbidden, message, details)
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::new(ErrorKind::Unauthorized, message, details)
    }

    pub fn persistence(message: impl Into<String>, details: Value) -> Self {
        Self::new(ErrorKind::PersistenceFailure, message, details)
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::new(ErrorKind::Internal, message, details)
    }

    /// Converts the error into its serializable body representation.
    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo {
            code: self.kind.code(),
            message: self.message.clone(),
            details: self.details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.kind.status();

        if status.is_server_error() {
            tracing::error!(kind = ?self.kind, details = %self.details, "{}", self.message);
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        if self.kind == ErrorKind::Unauthorized {
            return (
                status,
                [(header::WWW_AUTHENTICATE, "Bearer")],
                Json(body),
            )
                .into_response();
        }

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::persistence("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Request validation failed", details)
    }
}
