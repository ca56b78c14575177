use axum::{
    Json, Router,
    body::Body,
    http::{HeaderName, Request},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    api_error::ErrorResponse,
    app_state::AppState,
    feedback::{dtos::FeedbackRequest, handlers::submit_feedback},
    health::{HealthResponse, VersionInfo, health_check, list_versions},
    summarizer::ModelKind,
    summary::{
        dtos::{SummaryRequest, SummaryResponse},
        handlers::summarize,
    },
};

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::summary::handlers::summarize,
        crate::feedback::handlers::submit_feedback,
        crate::health::health_check,
        crate::health::list_versions
    ),
    components(schemas(
        SummaryRequest,
        SummaryResponse,
        FeedbackRequest,
        ErrorResponse,
        HealthResponse,
        VersionInfo,
        ModelKind
    )),
    tags(
        (name = "summary", description = "Summarize web pages and videos"),
        (name = "feedback", description = "Rate produced summaries"),
        (name = "health", description = "Liveness and registered models")
    )
)]
pub struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/summary", post(summarize))
        .route("/feedback", post(submit_feedback))
        .route("/healthz", get(health_check))
        .route("/versions", get(list_versions))
        .route("/api-docs/openapi.json", get(openapi_json))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        let request_id = request
                            .headers()
                            .get(REQUEST_ID_HEADER)
                            .and_then(|value| value.to_str().ok())
                            .unwrap_or("-");
                        tracing::info_span!(
                            "http",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = %request_id,
                        )
                    }),
                )
                .layer(PropagateRequestIdLayer::new(request_id)),
        )
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
