//! Acknowledgement envelope wrapping every model API response

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack<T> {
    pub ack_uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub req_uuid: Option<String>,
    pub date_time: DateTime<Utc>,
    pub success: bool,
    pub server_code: u16,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_type: Option<String>,
    pub payload: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Per-request data copied into every envelope
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AckContext {
    pub req_uuid: Option<String>,
    pub location: String,
}

impl AckContext {
    /// Envelope carrying a typed payload
    pub fn send<T>(&self, status: StatusCode, payload_type: &str, payload: T) -> Ack<T> {
        self.envelope(status, Some(payload_type.to_string()), payload)
    }

    pub(crate) fn envelope<T>(
        &self,
        status: StatusCode,
        payload_type: Option<String>,
        payload: T,
    ) -> Ack<T> {
        Ack {
            ack_uuid: uuid::Uuid::new_v4().to_string(),
            req_uuid: self.req_uuid.clone(),
            date_time: Utc::now(),
            success: status.is_success(),
            server_code: status.as_u16(),
            location: self.location.clone(),
            payload_type,
            payload,
            error_code: None,
            error_message: None,
        }
    }
}

impl<S> FromRequestParts<S> for AckContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let req_uuid = parts
            .headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        Ok(Self {
            req_uuid,
            location: parts.uri.path().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[test]
    fn test_send_builds_success_envelope() {
        let ctx = AckContext {
            req_uuid: Some("req-1".to_string()),
            location: "/model/acme/customer".to_string(),
        };

        let ack = ctx.send(StatusCode::OK, "ModelResult", 42);

        assert!(ack.success);
        assert_eq!(ack.server_code, 200);
        assert_eq!(ack.payload_type.as_deref(), Some("ModelResult"));
        assert_eq!(ack.payload, 42);
        assert_eq!(ack.req_uuid.as_deref(), Some("req-1"));
        assert_eq!(ack.location, "/model/acme/customer");
        assert!(uuid::Uuid::parse_str(&ack.ack_uuid).is_ok());
    }

    #[test]
    fn test_non_success_status_marks_failure() {
        let ack = AckContext::default().send(StatusCode::NOT_FOUND, "SearchResults", ());
        assert!(!ack.success);
        assert_eq!(ack.server_code, 404);
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let ack = AckContext::default().send(StatusCode::OK, "EsResult", "ok");
        let json = serde_json::to_value(&ack).unwrap();

        assert!(json.get("req_uuid").is_none());
        assert!(json.get("error_code").is_none());
        assert_eq!(json["payload"], "ok");
        assert_eq!(json["success"], true);
    }

    #[tokio::test]
    async fn test_context_extraction() {
        let request = Request::builder()
            .uri("/model/acme/customer?x=1")
            .header("x-request-id", "abc")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let ctx = AckContext::from_request_parts(&mut parts, &()).await.unwrap();

        assert_eq!(ctx.req_uuid.as_deref(), Some("abc"));
        assert_eq!(ctx.location, "/model/acme/customer");
    }
}
