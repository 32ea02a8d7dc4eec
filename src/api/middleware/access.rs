//! Access mode enforcement
//!
//! Token validation and per-account authorization happen upstream. In
//! protected mode this only insists that a bearer token was presented;
//! internal mode skips the check.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::config::Mode;

/// Extractor gating model routes on the configured access mode.
///
/// Carries the presented token, or `None` in internal mode.
#[derive(Debug, Clone)]
pub struct RequireAccess(pub Option<String>);

impl FromRequestParts<AppState> for RequireAccess {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if state.mode == Mode::Internal {
            return Ok(RequireAccess(None));
        }

        let token = extract_bearer_token(&parts.headers)?;
        debug!("Bearer token present");

        Ok(RequireAccess(Some(token)))
    }
}

/// Extract a bearer token from the Authorization header
pub fn extract_bearer_token(headers: &axum::http::HeaderMap) -> Result<String, ApiError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::bad_request("Invalid Authorization header encoding"))?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            let token = token.trim();
            if !token.is_empty() {
                return Ok(token.to_string());
            }
        }
    }

    Err(ApiError::unauthorized(
        "Authentication required. Provide a token via 'Authorization: Bearer <token>' header",
    ))
}
