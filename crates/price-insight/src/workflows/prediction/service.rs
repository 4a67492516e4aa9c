use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use super::domain::{PredictionRequest, PredictionResponse, PredictionSubmission};
use super::generator::{generate_prediction, GenerationError, PricingModel, TrendMode};
use super::random::RandomSource;
use super::validation::{RequestValidator, ValidationErrors};

const DEFAULT_SIMULATED_LATENCY: Duration = Duration::from_millis(1500);

/// Runtime knobs for the prediction service.
#[derive(Debug, Clone)]
pub struct PredictionSettings {
    pub simulated_latency: Duration,
    pub trend_mode: TrendMode,
    pub model: PricingModel,
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self {
            simulated_latency: DEFAULT_SIMULATED_LATENCY,
            trend_mode: TrendMode::default(),
            model: PricingModel::default(),
        }
    }
}

impl PredictionSettings {
    /// Settings without the artificial delay.
    pub fn immediate() -> Self {
        Self {
            simulated_latency: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Service composing validation, simulated latency, and the synthetic generator.
pub struct PredictionService<N> {
    validator: RequestValidator,
    random: Arc<N>,
    settings: PredictionSettings,
}

impl<N> PredictionService<N>
where
    N: RandomSource + 'static,
{
    pub fn new(random: Arc<N>, settings: PredictionSettings) -> Self {
        Self::with_validator(RequestValidator::default(), random, settings)
    }

    pub fn with_validator(
        validator: RequestValidator,
        random: Arc<N>,
        settings: PredictionSettings,
    ) -> Self {
        Self {
            validator,
            random,
            settings,
        }
    }

    pub fn settings(&self) -> &PredictionSettings {
        &self.settings
    }

    /// Validate a submission without generating anything.
    pub fn validate(
        &self,
        submission: PredictionSubmission,
    ) -> Result<PredictionRequest, ValidationErrors> {
        self.validator.request_from_submission(submission)
    }

    /// Validate, wait out the simulated model latency, then generate a prediction.
    pub async fn predict(
        &self,
        submission: PredictionSubmission,
    ) -> Result<PredictionResponse, PredictionServiceError> {
        let request = self.validate(submission)?;
        debug!(
            outcode = %request.outcode,
            month_of_sale = %request.month_of_sale,
            "prediction request validated"
        );

        if !self.settings.simulated_latency.is_zero() {
            tokio::time::sleep(self.settings.simulated_latency).await;
        }

        let response = self.generate(&request)?;
        info!(
            outcode = %request.outcode,
            predicted_price = response.predicted_price,
            price_trend = response.price_trend.label(),
            "prediction generated"
        );
        Ok(response)
    }

    /// Generate for an already validated request, skipping the latency simulation.
    pub fn generate(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, GenerationError> {
        generate_prediction(
            request,
            &self.settings.model,
            self.settings.trend_mode,
            self.random.as_ref(),
        )
    }
}

/// Error raised by the prediction service.
#[derive(Debug, thiserror::Error)]
pub enum PredictionServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}
