//! Synthetic price prediction: schema validation of form submissions, the deterministic
//! pricing formula with injected randomness for the 12-month chart, and the service/HTTP
//! boundary that ties them together.

pub mod domain;
pub mod generator;
pub mod random;
pub mod router;
pub mod service;
mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    FormValue, PredictionRequest, PredictionResponse, PredictionSubmission, PricePoint, PriceTrend,
    SaleMonth,
};
pub use generator::{generate_prediction, GenerationError, LocationTier, PricingModel, TrendMode};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use router::prediction_router;
pub use service::{PredictionService, PredictionServiceError, PredictionSettings};
pub use validation::{FieldViolation, RequestValidator, ValidationErrors};
