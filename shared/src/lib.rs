//! BMI Calculator Shared Library
//!
//! This crate contains the calculation core, the domain models and the
//! presentation helpers used by the backend and the WASM module.

pub mod errors;
pub mod health_metrics;
pub mod models;
pub mod navigation;
pub mod presenter;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use health_metrics::*;
pub use models::*;
pub use navigation::{NavEvent, View};
pub use presenter::{history_lines, present, AssetKey, DisplayPayload};
pub use units::*;
