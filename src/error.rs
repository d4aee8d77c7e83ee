//! Typed errors and HTTP mapping.

use crate::validation::FieldError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Failures raised by a product store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    /// A persistence-level constraint (check, length) rejected the row.
    #[error("constraint violated: {0}")]
    Constraint(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Unreadable or malformed request body; keeps the status of the underlying rejection.
    #[error("invalid request body ({0})")]
    InvalidBody(StatusCode),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("{message}: {source}")]
    Store {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    /// Wrap a store failure with the generic message returned to the caller.
    pub fn store(message: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::Store { message, source }
    }
}

pub const INVALID_BODY: &str = "Cuerpo de la petición no válido";

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Serialize)]
pub struct ValidationBody {
    pub errors: Vec<FieldError>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(message) => error_response(StatusCode::NOT_FOUND, message),
            AppError::BadRequest(message) => error_response(StatusCode::BAD_REQUEST, message),
            AppError::Forbidden(message) => error_response(StatusCode::FORBIDDEN, message),
            AppError::InvalidBody(status) => error_response(status, INVALID_BODY.to_string()),
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(ValidationBody { errors })).into_response()
            }
            AppError::Store { message, source } => {
                tracing::error!(error = %source, "{}", message);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
        }
    }
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorBody { error })).into_response()
}
