use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use tracing::{error, warn};

use super::domain::PredictionSubmission;
use super::random::RandomSource;
use super::service::{PredictionService, PredictionServiceError};

/// Router exposing `POST /predict`.
pub fn prediction_router<N>(service: Arc<PredictionService<N>>) -> Router
where
    N: RandomSource + 'static,
{
    Router::new()
        .route("/predict", post(predict_handler::<N>))
        .with_state(service)
}

pub(crate) async fn predict_handler<N>(
    State(service): State<Arc<PredictionService<N>>>,
    payload: Result<Json<PredictionSubmission>, JsonRejection>,
) -> Response
where
    N: RandomSource + 'static,
{
    let Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "rejected malformed prediction body");
            let payload = json!({
                "message": "request body must be a JSON prediction request",
            });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
    };

    match service.predict(submission).await {
        Ok(prediction) => (StatusCode::OK, Json(prediction)).into_response(),
        Err(PredictionServiceError::Validation(errors)) => {
            let payload = json!({
                "message": errors.to_string(),
                "violations": errors.violations(),
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(PredictionServiceError::Generation(err)) => {
            error!(error = %err, "prediction generation failed");
            let payload = json!({
                "message": "failed to generate prediction",
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
