use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::generator::{TextGenerationError, TextGenerator};
use super::prompt::InsightPrompt;
use crate::reference::ReferenceData;

const MAX_REGION_CODE_CHARS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionInsight {
    pub region_code: String,
    pub summary: String,
}

/// Builds region prompts from the reference tables and delegates to a text generator.
pub struct RegionInsightService<G> {
    generator: Arc<G>,
    reference: Arc<ReferenceData>,
}

impl<G> RegionInsightService<G>
where
    G: TextGenerator + 'static,
{
    pub fn new(generator: Arc<G>, reference: Arc<ReferenceData>) -> Self {
        Self {
            generator,
            reference,
        }
    }

    pub fn summarize(&self, region_code: &str) -> Result<RegionInsight, InsightServiceError> {
        let code = region_code.trim();
        if code.is_empty()
            || code.len() > MAX_REGION_CODE_CHARS
            || !code.chars().all(|ch| ch.is_ascii_alphanumeric())
        {
            return Err(InsightServiceError::InvalidRegion(region_code.to_string()));
        }

        let prompt = InsightPrompt::for_region(code, self.reference.find_outcode(code));
        let summary = self.generator.generate(&prompt)?;
        let summary = summary.trim();
        if summary.is_empty() {
            return Err(TextGenerationError::Empty.into());
        }

        info!(
            region_code = prompt.region_code(),
            known_region = prompt.outcode().is_some(),
            "region insight generated"
        );

        Ok(RegionInsight {
            region_code: prompt.region_code().to_string(),
            summary: summary.to_string(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InsightServiceError {
    #[error("region code {0:?} must be 1-8 letters or digits")]
    InvalidRegion(String),
    #[error(transparent)]
    Generation(#[from] TextGenerationError),
}
