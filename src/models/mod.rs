//! Data models for barowatch
//!
//! - Location: forecast coordinates
//! - Forecast: provider snapshot and derived trend values

pub mod forecast;
pub mod location;

// Re-export all public types for convenient access
pub use forecast::{EvaluationResult, ForecastSnapshot, TrendPoint};
pub use location::Location;
