use axum::{Json, extract::State};
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::{app_state::AppState, summarizer::ModelKind};

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    versions: Vec<String>,
}

#[derive(Serialize, ToSchema)]
pub struct VersionInfo {
    version: String,
    kind: ModelKind,
    model: String,
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Health check successful", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let versions: Vec<String> = state
        .models
        .versions()
        .into_iter()
        .map(str::to_string)
        .collect();
    debug!(models = versions.len(), "Health check passed");

    Json(HealthResponse {
        status: "OK".to_string(),
        versions,
    })
}

#[utoipa::path(
    get,
    path = "/versions",
    tag = "health",
    responses(
        (status = 200, description = "Registered summarization models", body = [VersionInfo])
    )
)]
pub async fn list_versions(State(state): State<AppState>) -> Json<Vec<VersionInfo>> {
    Json(
        state
            .models
            .backends()
            .iter()
            .map(|model| VersionInfo {
                version: model.version_id.clone(),
                kind: model.kind,
                model: model.model_id.clone(),
            })
            .collect(),
    )
}
