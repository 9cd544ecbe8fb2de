//! Error types for the fleet console and its reference backend

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes carried in every error response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthorized = 2,
    NoSuchEngine = 3,
    Duplicate = 4,
    BadValue = 5,
    StaleState = 6,
}

/// A single field-level validation message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Malformed engine data, raised synchronously before any local mutation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("duplicate engine id {0}")]
    DuplicateId(String),

    #[error("{}", format_fields(.0))]
    Fields(Vec<FieldError>),
}

fn format_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::Fields(vec![FieldError {
            field: field.into(),
            message: message.into(),
        }])
    }

    /// Per-field messages, for inline display next to form inputs
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            ValidationError::DuplicateId(id) => vec![FieldError {
                field: "id".to_string(),
                message: format!("engine {} already exists", id),
            }],
            ValidationError::Fields(fields) => fields.clone(),
        }
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = field.to_string();
                errs.iter().map(move |e| FieldError {
                    field: field.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::Fields(fields)
    }
}

/// Console-side error. Cloneable so it can sit on a pending move.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Engine {0} not found")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Record changed on server, please refresh ({0})")]
    Conflict(String),

    #[error("Not authenticated")]
    Unauthorized,

    #[error("Not allowed: {0}")]
    Forbidden(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Network(e.to_string())
    }
}

/// Result type alias for console operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Reference backend error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::Authorization(msg) => {
                (StatusCode::FORBIDDEN, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchEngine, msg.clone())
            }
            AppError::Validation(ValidationError::DuplicateId(id)) => (
                StatusCode::CONFLICT,
                ErrorCode::Duplicate,
                format!("Engine {} already exists", id),
            ),
            AppError::Validation(e) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, e.to_string())
            }
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, ErrorCode::StaleState, msg.clone())
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for backend operations
pub type AppResult<T> = Result<T, AppError>;
