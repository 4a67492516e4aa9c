use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::reference::{EnergyRating, PropertyType, Tenure};
use crate::workflows::prediction::domain::{
    FormValue, PredictionRequest, PredictionSubmission, SaleMonth,
};
use crate::workflows::prediction::random::RandomSource;
use crate::workflows::prediction::service::{PredictionService, PredictionSettings};
use crate::workflows::prediction::{prediction_router, TrendMode};

/// Always yields the same sample.
pub(super) struct FixedRandom(pub(super) f64);

impl RandomSource for FixedRandom {
    fn next_unit(&self) -> f64 {
        self.0
    }
}

/// Cycles through a fixed list of samples.
pub(super) struct SequenceRandom {
    values: Vec<f64>,
    cursor: AtomicUsize,
}

impl SequenceRandom {
    pub(super) fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&self) -> f64 {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.values[index % self.values.len()]
    }
}

/// Sample that makes every monthly jitter exactly zero.
pub(super) const FLAT_JITTER: f64 = 0.004 / 0.015;

pub(super) fn submission() -> PredictionSubmission {
    PredictionSubmission {
        full_address: Some("221 Mile End Road, London".into()),
        outcode: Some("E1".into()),
        longitude: Some(FormValue::Valid(-0.0553)),
        latitude: Some(FormValue::Valid(51.5215)),
        bedrooms: Some(FormValue::Valid(3.0)),
        bathrooms: Some(FormValue::Valid(1.0)),
        reception_rooms: Some(FormValue::Valid(2.0)),
        area: Some(FormValue::Valid(120.0)),
        tenure: Some("Freehold".into()),
        property_type: Some("Terraced".into()),
        current_energy_rating: Some("D".into()),
        month_of_sale: Some("2025-01".into()),
    }
}

pub(super) fn request() -> PredictionRequest {
    PredictionRequest {
        full_address: "221 Mile End Road, London".to_string(),
        outcode: "E1".to_string(),
        longitude: None,
        latitude: None,
        bedrooms: 3,
        bathrooms: 1,
        reception_rooms: 2,
        area: 120.0,
        tenure: Tenure::Freehold,
        property_type: PropertyType::Terraced,
        current_energy_rating: EnergyRating::D,
        month_of_sale: SaleMonth::new(2025, 1).expect("valid month"),
    }
}

pub(super) fn settings(trend_mode: TrendMode) -> PredictionSettings {
    PredictionSettings {
        trend_mode,
        ..PredictionSettings::immediate()
    }
}

pub(super) fn build_service<N: RandomSource + 'static>(random: N) -> PredictionService<N> {
    PredictionService::new(Arc::new(random), settings(TrendMode::Derived))
}

pub(super) fn router_with_service<N: RandomSource + 'static>(
    service: PredictionService<N>,
) -> axum::Router {
    prediction_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
