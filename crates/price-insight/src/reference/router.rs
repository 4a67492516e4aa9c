use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use super::{ListingFilter, ReferenceData};

/// Read-only endpoints over the reference tables.
pub fn reference_router(data: Arc<ReferenceData>) -> Router {
    Router::new()
        .route("/outcodes", get(outcodes_handler))
        .route("/outcodes/:code", get(outcode_handler))
        .route("/properties", get(properties_handler))
        .with_state(data)
}

pub(crate) async fn outcodes_handler(State(data): State<Arc<ReferenceData>>) -> Response {
    (StatusCode::OK, Json(data.outcodes())).into_response()
}

pub(crate) async fn outcode_handler(
    State(data): State<Arc<ReferenceData>>,
    Path(code): Path<String>,
) -> Response {
    match data.find_outcode(&code) {
        Some(record) => (StatusCode::OK, Json(record)).into_response(),
        None => {
            let payload = json!({
                "message": format!("unknown outcode {}", code.trim().to_ascii_uppercase()),
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn properties_handler(
    State(data): State<Arc<ReferenceData>>,
    Query(filter): Query<ListingFilter>,
) -> Response {
    let listings = data.search(&filter);
    (StatusCode::OK, Json(listings)).into_response()
}
