use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use price_insight::reference::{reference_router, ReferenceData};
use price_insight::workflows::insight::{insight_router, RegionInsightService, TextGenerator};
use price_insight::workflows::prediction::{prediction_router, PredictionService, RandomSource};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

pub(crate) fn with_service_routes<N, G>(
    prediction: Arc<PredictionService<N>>,
    insight: Arc<RegionInsightService<G>>,
    reference: Arc<ReferenceData>,
) -> Router
where
    N: RandomSource + 'static,
    G: TextGenerator + 'static,
{
    prediction_router(prediction)
        .merge(insight_router(insight))
        .merge(reference_router(reference))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Acquire);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
