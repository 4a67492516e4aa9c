use super::prompt::{format_pounds, InsightPrompt};
use crate::reference::PriceCategory;

/// Capability interface over a text-generation backend.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &InsightPrompt) -> Result<String, TextGenerationError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextGenerationError {
    #[error("text backend unavailable: {0}")]
    Unavailable(String),
    #[error("text backend returned no content")]
    Empty,
}

/// Deterministic stand-in for a generative model. Renders a fixed template from the prompt's
/// structured context, so the same region always yields the same summary.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateTextGenerator;

impl TextGenerator for TemplateTextGenerator {
    fn generate(&self, prompt: &InsightPrompt) -> Result<String, TextGenerationError> {
        let code = prompt.region_code();
        let summary = match prompt.outcode() {
            Some(record) => format!(
                "{name} ({code}) is a {band}-priced district with an average sale price of £{price}. \
                 {description} Over the next twelve months prices are expected to {outlook}.",
                name = record.name,
                band = record.price_category,
                price = format_pounds(u64::from(record.average_price)),
                description = record.description,
                outlook = outlook(record.price_category),
            ),
            None => format!(
                "No reference data is held for {code}. Treat any forecast for this area as \
                 indicative only and compare recent sales in neighbouring districts before relying on it."
            ),
        };

        Ok(summary)
    }
}

fn outlook(category: PriceCategory) -> &'static str {
    match category {
        PriceCategory::High => {
            "hold broadly steady, with prime stock continuing to command a premium"
        }
        PriceCategory::Medium => {
            "edge upward as buyers priced out of central districts look further afield"
        }
        PriceCategory::Low => {
            "rise modestly as regeneration and transport upgrades draw in first-time buyers"
        }
    }
}
