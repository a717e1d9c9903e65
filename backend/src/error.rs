//! Error handling for the LabStock platform
//!
//! Provides consistent error responses in English and Spanish

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String, message_es: String },

    // Authorization errors
    #[error("Forbidden: {0}")]
    Forbidden(String),

    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_es: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {message}")]
    Conflict {
        resource: String,
        message: String,
        message_es: String,
    },

    // Business logic errors
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_es: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "INVALID_CREDENTIALS".to_string(),
                    message_en: "Invalid email or password".to_string(),
                    message_es: "Correo o contraseña incorrectos".to_string(),
                    field: None,
                },
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "INVALID_TOKEN".to_string(),
                    message_en: "Invalid or expired token".to_string(),
                    message_es: "Token inválido o expirado".to_string(),
                    field: None,
                },
            ),
            AppError::Unauthorized {
                message,
                message_es,
            } => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "UNAUTHORIZED".to_string(),
                    message_en: message.clone(),
                    message_es: message_es.clone(),
                    field: None,
                },
            ),
            AppError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                ErrorDetail {
                    code: "FORBIDDEN".to_string(),
                    message_en: msg.clone(),
                    message_es: format!("No tienes permiso: {}", msg),
                    field: None,
                },
            ),
            AppError::Validation {
                field,
                message,
                message_es,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_es: message_es.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_es: format!("Datos inválidos: {}", msg),
                    field: None,
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message_en: format!("{} not found", resource),
                    message_es: format!("No se encontró {}", resource),
                    field: None,
                },
            ),
            AppError::Conflict {
                resource,
                message,
                message_es,
            } => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "CONFLICT".to_string(),
                    message_en: message.clone(),
                    message_es: message_es.clone(),
                    field: Some(resource.clone()),
                },
            ),
            AppError::InvalidStateTransition(msg) => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "INVALID_STATE_TRANSITION".to_string(),
                    message_en: msg.clone(),
                    message_es: format!("No se puede cambiar el estado: {}", msg),
                    field: None,
                },
            ),
            AppError::InsufficientStock(msg) => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "INSUFFICIENT_STOCK".to_string(),
                    message_en: msg.clone(),
                    message_es: format!("Existencias insuficientes: {}", msg),
                    field: None,
                },
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message_en: "A database error occurred".to_string(),
                    message_es: "Ocurrió un error de base de datos".to_string(),
                    field: None,
                },
            ),
            AppError::Internal(_) | AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: "An internal server error occurred".to_string(),
                    message_es: "Ocurrió un error interno del servidor".to_string(),
                    field: None,
                },
            ),
        };

        // Full detail stays server-side
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
