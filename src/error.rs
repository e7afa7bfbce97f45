//! Error handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::logic::features::UnknownCategory;
use crate::logic::model::InferenceError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    // Request errors
    #[error("{field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("{0}")]
    BadRequest(String),

    // Inference errors
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, field) = match &self {
            AppError::ValidationError { field, message } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message.clone(), Some(field.clone()))
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Inference(err) => {
                tracing::error!("Inference error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Inference failed".to_string(), None)
            }
        };

        let mut body = json!({
            "error": error_message,
            "status": status.as_u16()
        });
        if let Some(field) = field {
            body["field"] = json!(field);
        }

        (status, Json(body)).into_response()
    }
}

impl From<UnknownCategory> for AppError {
    fn from(err: UnknownCategory) -> Self {
        AppError::validation(err.field, err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
