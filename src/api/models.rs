//! Type model endpoints
//!
//! Callers are trusted with `account`; per-account authorization is
//! enforced upstream.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde_json::Value;
use tracing::{debug, error};

use crate::api::middleware::RequireAccess;
use crate::api::state::AppState;
use crate::api::types::{Ack, AckContext, ApiError, Json};
use crate::domain::{IndexResult, Model, ModelResult};

/// Create model routes
pub fn create_models_router() -> Router<AppState> {
    Router::new()
        .route("/model/{account}/{id}", get(get_model))
        .route("/model/{account}", post(upsert_model))
        .route("/searchModels/{account}", post(search_models))
}

/// GET /model/{account}/{id}
pub async fn get_model(
    State(state): State<AppState>,
    RequireAccess(_): RequireAccess,
    ctx: AckContext,
    Path((account, id)): Path<(String, String)>,
) -> Result<Json<Ack<ModelResult>>, ApiError> {
    debug!(account = %account, id = %id, "Getting model");

    let result = state
        .model_repository
        .get_model(&account, &id)
        .await
        .map_err(|e| ApiError::from(e).with_context(&ctx))?;

    Ok(Json(ctx.send(StatusCode::OK, "ModelResult", result)))
}

/// POST /model/{account}
pub async fn upsert_model(
    State(state): State<AppState>,
    RequireAccess(_): RequireAccess,
    ctx: AckContext,
    Path(account): Path<String>,
    Json(model): Json<Model>,
) -> Result<Json<Ack<IndexResult>>, ApiError> {
    debug!(account = %account, machine_name = %model.machine_name(), "Upserting model");

    let result = state
        .model_repository
        .upsert_model(&account, model)
        .await
        .map_err(|e| {
            error!(error = %e, "Upsert failure");
            ApiError::from(e).with_context(&ctx)
        })?;

    Ok(Json(ctx.send(StatusCode::OK, "EsResult", result)))
}

/// POST /searchModels/{account}
///
/// Responds with the store's own status and body.
pub async fn search_models(
    State(state): State<AppState>,
    RequireAccess(_): RequireAccess,
    ctx: AckContext,
    Path(account): Path<String>,
    Json(query): Json<Value>,
) -> Result<(StatusCode, Json<Ack<Value>>), ApiError> {
    debug!(account = %account, "Searching models");

    let results = state
        .model_repository
        .search_models(&account, &query)
        .await
        .map_err(|e| ApiError::from(e).with_context(&ctx))?;

    let status = StatusCode::from_u16(results.status).unwrap_or(StatusCode::BAD_GATEWAY);

    Ok((status, Json(ctx.send(status, "SearchResults", results.body))))
}
