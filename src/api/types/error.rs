//! API error mapped onto the acknowledgement envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use super::ack::AckContext;
use crate::domain::DomainError;

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
    pub payload_type: String,
    pub payload: Value,
    context: AckContext,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();

        Self {
            status,
            code: code.into(),
            payload: Value::String(message.clone()),
            message,
            payload_type: "ErrorMessage".to_string(),
            context: AckContext::default(),
        }
    }

    /// Replace the payload sent with the error
    pub fn with_payload(mut self, payload_type: impl Into<String>, payload: Value) -> Self {
        self.payload_type = payload_type.into();
        self.payload = payload;
        self
    }

    fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Attach request data to the envelope
    pub fn with_context(mut self, context: &AckContext) -> Self {
        self.context = context.clone();
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BadRequest", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NotFound", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "ServerError", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut ack = self
            .context
            .envelope(self.status, Some(self.payload_type), self.payload);
        ack.error_code = Some(self.code);
        ack.error_message = Some(self.message);

        (self.status, Json(ack)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { message } => {
                Self::new(StatusCode::NOT_FOUND, "ModelNotFound", "Model not found")
                    .with_payload("ErrorMessage", Value::String(message))
            }
            DomainError::Validation { message } => {
                Self::new(StatusCode::BAD_REQUEST, "ValidationError", message)
            }
            DomainError::Transport { message } => Self::internal(message)
                .with_code("EsError")
                .with_payload(
                    "EsError",
                    Value::String("Error communicating with database.".to_string()),
                ),
            DomainError::Mapping { message } => Self::internal(message)
                .with_code("UpsertError")
                .with_payload(
                    "ErrorMessage",
                    Value::String("there was a problem upserting the model".to_string()),
                ),
            DomainError::Store {
                message, body, ..
            } => {
                let payload = body.unwrap_or_else(|| Value::String(message.clone()));
                Self::internal(message)
                    .with_code("EsError")
                    .with_payload("EsError", payload)
            }
            DomainError::Serialization { message } => Self::internal(message)
                .with_code("EsError")
                .with_payload(
                    "EsError",
                    Value::String("Error communicating with database.".to_string()),
                ),
            DomainError::Initialization { message } | DomainError::Configuration { message } => {
                Self::internal(message)
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
