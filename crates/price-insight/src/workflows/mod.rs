pub mod insight;
pub mod prediction;
