use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};

use super::generator::TextGenerator;
use super::service::{InsightServiceError, RegionInsightService};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionInsightRequest {
    pub region_code: String,
}

/// Router exposing `POST /insights/region`.
pub fn insight_router<G>(service: Arc<RegionInsightService<G>>) -> Router
where
    G: TextGenerator + 'static,
{
    Router::new()
        .route("/insights/region", post(region_insight_handler::<G>))
        .with_state(service)
}

pub(crate) async fn region_insight_handler<G>(
    State(service): State<Arc<RegionInsightService<G>>>,
    payload: Result<Json<RegionInsightRequest>, JsonRejection>,
) -> Response
where
    G: TextGenerator + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "rejected malformed insight body");
            let payload = json!({ "message": "request body must contain a regionCode" });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
    };

    match service.summarize(&request.region_code) {
        Ok(insight) => (StatusCode::OK, Json(insight)).into_response(),
        Err(err @ InsightServiceError::InvalidRegion(_)) => {
            let payload = json!({ "message": err.to_string() });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(InsightServiceError::Generation(err)) => {
            error!(error = %err, "region insight generation failed");
            let payload = json!({ "message": "failed to generate region insight" });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
