use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Mapping error: {message}")]
    Mapping { message: String },

    #[error("Store error: HTTP {status} - {message}")]
    Store {
        status: u16,
        message: String,
        body: Option<serde_json::Value>,
    },

    #[error("Initialization error: {message}")]
    Initialization { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn mapping(message: impl Into<String>) -> Self {
        Self::Mapping {
            message: message.into(),
        }
    }

    pub fn store(status: u16, message: impl Into<String>) -> Self {
        Self::Store {
            status,
            message: message.into(),
            body: None,
        }
    }

    /// Store error carrying the store's response body
    pub fn store_with_body(
        status: u16,
        message: impl Into<String>,
        body: serde_json::Value,
    ) -> Self {
        Self::Store {
            status,
            message: message.into(),
            body: Some(body),
        }
    }

    pub fn initialization(message: impl Into<String>) -> Self {
        Self::Initialization {
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("Model 'customer' not found");
        assert_eq!(error.to_string(), "Not found: Model 'customer' not found");
        assert!(error.is_not_found());
    }

    #[test]
    fn test_store_error_display() {
        let error = DomainError::store(503, "unavailable");
        assert_eq!(error.to_string(), "Store error: HTTP 503 - unavailable");
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_store_error_keeps_body() {
        let error = DomainError::store_with_body(
            409,
            "version conflict",
            serde_json::json!({"error": "conflict"}),
        );

        match error {
            DomainError::Store { status, body, .. } => {
                assert_eq!(status, 409);
                assert_eq!(body, Some(serde_json::json!({"error": "conflict"})));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_serde_error_conversion() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let domain: DomainError = err.into();
        assert!(matches!(domain, DomainError::Serialization { .. }));
    }
}
