use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::models::{ContentRecord, RankedRecommendation};
use crate::services::loader;
use crate::services::snapshot::{Snapshot, SourceCounts};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct TopKQuery {
    pub k: Option<usize>,
}

/// Combined per-source recommendation lists for one identifier
#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub content_id: String,
    pub title: String,
    pub collaborative: Vec<String>,
    pub content_filtering: Vec<String>,
    pub wide_deep: Vec<RankedRecommendation>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub loaded_at: DateTime<Utc>,
    pub counts: SourceCounts,
}

impl From<&Snapshot> for StatusResponse {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            loaded_at: snapshot.loaded_at(),
            counts: snapshot.counts(),
        }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Merged identifier list with catalog titles
pub async fn get_contents(State(state): State<AppState>) -> Json<Vec<ContentRecord>> {
    let snapshot = state.snapshot().await;
    Json(snapshot.content_records())
}

/// Combined top-K lookup across every loaded source.
///
/// Unknown identifiers answer with empty lists rather than an error, so a
/// client can always render something.
pub async fn get_recommendations(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
    Query(query): Query<TopKQuery>,
) -> Json<RecommendationsResponse> {
    let k = query.k.unwrap_or(state.config().default_top_k);
    let snapshot = state.snapshot().await;

    Json(RecommendationsResponse {
        title: snapshot.title_for(&content_id).to_string(),
        collaborative: snapshot.top_k_positional(&content_id, k),
        content_filtering: snapshot.top_k_scored(&content_id, k),
        wide_deep: snapshot.top_k_pairwise(&content_id, k),
        content_id,
    })
}

/// Load timestamp and per-source row counts of the current snapshot
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let snapshot = state.snapshot().await;
    Json(StatusResponse::from(snapshot.as_ref()))
}

/// Re-runs the load event against the configured tables.
///
/// On failure the previous snapshot stays live and the load error is
/// returned to the caller.
pub async fn reload(State(state): State<AppState>) -> AppResult<Json<StatusResponse>> {
    match loader::load_snapshot(state.config()).await {
        Ok(snapshot) => {
            let response = StatusResponse::from(&snapshot);
            state.replace_snapshot(snapshot).await;
            tracing::info!("Reload complete");
            Ok(Json(response))
        }
        Err(e) => {
            tracing::error!(error = %e, "Reload failed, keeping previous snapshot");
            Err(e)
        }
    }
}
