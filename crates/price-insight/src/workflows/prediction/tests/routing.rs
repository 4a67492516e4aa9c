use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::prediction::domain::{FormValue, PredictionResponse};
use crate::workflows::prediction::generator::PricingModel;
use crate::workflows::prediction::random::SeededRandom;
use crate::workflows::prediction::router::predict_handler;
use crate::workflows::prediction::service::{PredictionService, PredictionSettings};

fn post_json(body: Vec<u8>) -> Request<Body> {
    Request::post("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn predict_route_returns_prediction() {
    let router = router_with_service(build_service(SeededRandom::new(11)));

    let response = router
        .oneshot(post_json(serde_json::to_vec(&submission()).unwrap()))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let prediction: PredictionResponse =
        serde_json::from_value(payload).expect("body parses as prediction");
    assert_eq!(prediction.predicted_price, 757_000);
    assert_eq!(prediction.price_history_chart_data.len(), 12);
    assert_eq!(prediction.price_history_chart_data[0].month, "Jan 2025");
}

#[tokio::test]
async fn predict_route_accepts_camel_case_form_fields() {
    let router = router_with_service(build_service(FixedRandom(0.5)));
    let body = json!({
        "fullAddress": "10 Downing Street, London",
        "outcode": "SW1",
        "bedrooms": 4,
        "bathrooms": 2,
        "receptionRooms": 3,
        "area": 250.5,
        "tenure": "Leasehold",
        "propertyType": "Semi-detached",
        "currentEnergyRating": "B",
        "monthOfSale": "2025-12"
    });

    let response = router
        .oneshot(post_json(serde_json::to_vec(&body).unwrap()))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["priceHistoryChartData"][1]["month"], "Jan 2026");
    assert!(payload["averageAreaPrice"].as_u64().is_some());
    assert_eq!(payload["priceTrend"], "increasing");
}

#[tokio::test]
async fn missing_fields_are_bad_requests_with_violations() {
    let router = router_with_service(build_service(FixedRandom(0.5)));
    let body = json!({ "fullAddress": "221 Mile End Road", "bedrooms": 11 });

    let response = router
        .oneshot(post_json(serde_json::to_vec(&body).unwrap()))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["message"].as_str().is_some());
    let violations = payload["violations"].as_array().expect("violations listed");
    assert!(violations
        .iter()
        .any(|violation| violation["field"] == "bedrooms"));
    assert!(violations
        .iter()
        .any(|violation| violation["field"] == "monthOfSale"));
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let router = router_with_service(build_service(FixedRandom(0.5)));

    let response = router
        .oneshot(post_json(b"{\"bedrooms\": \"three\"".to_vec()))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["message"],
        "request body must be a JSON prediction request"
    );
}

#[tokio::test]
async fn mistyped_fields_are_listed_with_other_violations() {
    let router = router_with_service(build_service(FixedRandom(0.5)));
    let body = json!({
        "fullAddress": "221 Mile End Road, London",
        "outcode": "E1",
        "bedrooms": "3",
        "bathrooms": 1,
        "receptionRooms": 1,
        "area": -5,
        "tenure": "Freehold",
        "propertyType": "Flat",
        "currentEnergyRating": "C",
        "monthOfSale": "2024-13"
    });

    let response = router
        .oneshot(post_json(serde_json::to_vec(&body).unwrap()))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    let violations = payload["violations"].as_array().expect("violations listed");
    let fields: Vec<&str> = violations
        .iter()
        .filter_map(|violation| violation["field"].as_str())
        .collect();
    assert_eq!(fields, ["bedrooms", "area", "monthOfSale"]);
    assert_eq!(violations[0]["message"], "Bedrooms must be a number");
}

#[tokio::test]
async fn oversized_area_is_a_validation_error() {
    let router = router_with_service(build_service(FixedRandom(0.5)));
    let mut submission = submission();
    submission.area = Some(FormValue::Valid(1e17));

    let response = router
        .oneshot(post_json(serde_json::to_vec(&submission).unwrap()))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["violations"][0]["field"], "area");
}

#[tokio::test]
async fn generation_failures_hide_internal_detail() {
    let settings = PredictionSettings {
        model: PricingModel {
            per_square_meter: f64::MAX,
            ..PricingModel::default()
        },
        ..PredictionSettings::immediate()
    };
    let service = Arc::new(PredictionService::new(Arc::new(FixedRandom(0.5)), settings));

    let response =
        predict_handler::<FixedRandom>(State(service), Ok(axum::Json(submission()))).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(payload, json!({ "message": "failed to generate prediction" }));
}
