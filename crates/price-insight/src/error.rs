use crate::config::ConfigError;
use crate::reference::ReferenceDataError;
use crate::telemetry::TelemetryError;
use crate::workflows::insight::InsightServiceError;
use crate::workflows::prediction::PredictionServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;
use tracing::error;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    ReferenceData(ReferenceDataError),
    Prediction(PredictionServiceError),
    Insight(InsightServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::ReferenceData(err) => write!(f, "reference data error: {}", err),
            AppError::Prediction(err) => write!(f, "prediction error: {}", err),
            AppError::Insight(err) => write!(f, "insight error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::ReferenceData(err) => Some(err),
            AppError::Prediction(err) => Some(err),
            AppError::Insight(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match &self {
            AppError::Prediction(PredictionServiceError::Validation(errors)) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "message": errors.to_string(),
                        "violations": errors.violations(),
                    })),
                )
                    .into_response();
            }
            AppError::Insight(err @ InsightServiceError::InvalidRegion(_)) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": err.to_string() })),
                )
                    .into_response();
            }
            other => {
                error!(error = %other, "request failed");
                json!({ "message": "internal server error" })
            }
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<ReferenceDataError> for AppError {
    fn from(value: ReferenceDataError) -> Self {
        Self::ReferenceData(value)
    }
}

impl From<PredictionServiceError> for AppError {
    fn from(value: PredictionServiceError) -> Self {
        Self::Prediction(value)
    }
}

impl From<InsightServiceError> for AppError {
    fn from(value: InsightServiceError) -> Self {
        Self::Insight(value)
    }
}
