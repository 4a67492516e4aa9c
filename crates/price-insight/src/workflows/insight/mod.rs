//! Region insight summaries. The text backend sits behind [`TextGenerator`]; the bundled
//! [`TemplateTextGenerator`] renders a deterministic summary from the outcode reference table in
//! place of a generative model.

mod generator;
mod prompt;
pub mod router;
mod service;

pub use generator::{TemplateTextGenerator, TextGenerationError, TextGenerator};
pub use prompt::{format_pounds, InsightPrompt};
pub use router::{insight_router, RegionInsightRequest};
pub use service::{InsightServiceError, RegionInsight, RegionInsightService};
