use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Input error: {0}")]
    InputError(String),

    #[error("Backend unreachable: {0}")]
    BackendUnreachable(String),

    #[error("Backend HTTP error: {status} {body}")]
    BackendHttpError { status: u16, body: String },

    #[error("Backend returned a malformed response: {0}")]
    BackendMalformedResponse(String),

    #[error("Backend returned no content: {0}")]
    BackendEmptyReply(String),

    #[error("Failed to parse JSON after all repair attempts. Error: {last_error}. Raw text (first 500 chars): {sample}")]
    JsonRecoveryFailed { last_error: String, sample: String },

    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InputError(_) => "INPUT_ERROR",
            AppError::BackendUnreachable(_) => "BACKEND_UNREACHABLE",
            AppError::BackendHttpError { .. } => "BACKEND_HTTP_ERROR",
            AppError::BackendMalformedResponse(_) => "BACKEND_MALFORMED_RESPONSE",
            AppError::BackendEmptyReply(_) => "BACKEND_EMPTY_REPLY",
            AppError::JsonRecoveryFailed { .. } => "JSON_RECOVERY_FAILED",
            AppError::SchemaViolation(_) => "SCHEMA_VIOLATION",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// True for failures raised by the generative backend layer.
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            AppError::BackendUnreachable(_)
                | AppError::BackendHttpError { .. }
                | AppError::BackendMalformedResponse(_)
                | AppError::BackendEmptyReply(_)
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    pub status: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InputError(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::SchemaViolation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BackendUnreachable(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::BackendHttpError { .. }
            | AppError::BackendMalformedResponse(_)
            | AppError::BackendEmptyReply(_)
            | AppError::JsonRecoveryFailed { .. } => StatusCode::BAD_GATEWAY,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.error_code(),
            status: self.status_code().as_u16(),
        })
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}
impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::InternalError(format!("BSON serialization error: {}", err))
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
