//! HTTP handlers for the action dispatch surface
//!
//! Dispatch outcomes are always returned as `ActionResult` data with HTTP 200;
//! validation, capability, and unknown-action failures never become transport
//! faults.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::state::AppState;
use crate::actions::{ActionDefinition, ActionResult};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ActionListResponse {
    pub actions: Vec<ActionDefinition>,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// List the definitions of all registered actions
pub async fn list_actions(State(state): State<Arc<AppState>>) -> Json<ActionListResponse> {
    Json(ActionListResponse {
        actions: state.registry.definitions(),
    })
}

/// Invoke a named action with a JSON argument bag
pub async fn invoke_action(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: Option<Json<Value>>,
) -> Json<ActionResult> {
    let params = body.map(|Json(value)| value).unwrap_or_else(|| json!({}));

    tracing::info!("Dispatching action: {}", name);
    let result = state.registry.execute(&name, params).await;

    Json(result)
}
