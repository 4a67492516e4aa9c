//! Synthetic London house-price predictions and region insights.
//!
//! The crate bundles the immutable reference tables, the request validator, the pricing
//! generator, and the axum routers the API service mounts.

pub mod config;
pub mod error;
pub mod reference;
pub mod telemetry;
pub mod workflows;
