//! Error types and handling for `barowatch`

use thiserror::Error;

/// Main error type for the `barowatch` pipeline
#[derive(Error, Debug)]
pub enum BarowatchError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Provider transport errors (unreachable, non-success status)
    #[error("Network error: {message}")]
    Network { message: String },

    /// Malformed provider responses
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Arithmetic failures while building the trend
    #[error("Computation error: {message}")]
    Computation { message: String },

    /// Requested hour offset is not covered by the available data
    #[error("Hour offset {offset} is out of range: only {len} entries available")]
    OutOfRange { offset: usize, len: usize },

    /// Publishing to the notification topic failed
    #[error("Notification error: {message}")]
    Notification { message: String },
}

impl BarowatchError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new computation error
    pub fn computation<S: Into<String>>(message: S) -> Self {
        Self::Computation {
            message: message.into(),
        }
    }

    /// Create a new notification error
    pub fn notification<S: Into<String>>(message: S) -> Self {
        Self::Notification {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            BarowatchError::Config { message } => {
                format!("Configuration error: {message}. Please check your config file and environment.")
            }
            BarowatchError::Network { .. } => {
                "Unable to reach the weather provider. Please check your internet connection and API key."
                    .to_string()
            }
            BarowatchError::Parse { .. } => {
                "The weather provider returned data in an unexpected format.".to_string()
            }
            BarowatchError::Computation { message } => message.clone(),
            BarowatchError::OutOfRange { offset, len } => format!(
                "Forecast covers {len} hours but hour {offset} was requested. Lower the configured horizon."
            ),
            BarowatchError::Notification { .. } => {
                "Failed to publish the pressure warning.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = BarowatchError::config("missing API key");
        assert!(matches!(config_err, BarowatchError::Config { .. }));

        let network_err = BarowatchError::network("connection refused");
        assert!(matches!(network_err, BarowatchError::Network { .. }));

        let computation_err = BarowatchError::computation("division by zero");
        assert!(matches!(computation_err, BarowatchError::Computation { .. }));
    }

    #[test]
    fn test_out_of_range_display() {
        let err = BarowatchError::OutOfRange { offset: 6, len: 3 };
        assert_eq!(
            err.to_string(),
            "Hour offset 6 is out of range: only 3 entries available"
        );
    }

    #[test]
    fn test_user_messages() {
        let config_err = BarowatchError::config("location is required");
        assert!(config_err.user_message().contains("location is required"));

        let network_err = BarowatchError::network("test");
        assert!(network_err.user_message().contains("Unable to reach"));

        let range_err = BarowatchError::OutOfRange { offset: 30, len: 24 };
        assert!(range_err.user_message().contains("hour 30"));
    }
}
