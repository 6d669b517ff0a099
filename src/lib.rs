//! `barowatch` - barometric pressure drop detection
//!
//! Fetches an hourly pressure forecast, computes the percent change of each
//! hour against the current reading and warns when the change at the
//! lookahead hour drops below a threshold.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod monitor;
pub mod notify;
pub mod trend;
pub mod weather;

// Re-export core types for public API
pub use config::BarowatchConfig;
pub use error::BarowatchError;
pub use models::{EvaluationResult, ForecastSnapshot, Location, TrendPoint};
pub use monitor::{Notifier, PressureMonitor};
pub use notify::{NotificationSink, TopicPublisher};
pub use weather::{DarkSkyClient, ForecastSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, BarowatchError>;
