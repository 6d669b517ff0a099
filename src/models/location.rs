//! Location model for the forecast coordinates

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::BarowatchError;

/// Location coordinates
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Location {
    /// Create a new location, rejecting out-of-range coordinates
    pub fn new(latitude: f64, longitude: f64) -> crate::Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(BarowatchError::config(format!(
                "Latitude must be between -90 and 90, got: {latitude}"
            )));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(BarowatchError::config(format!(
                "Longitude must be between -180 and 180, got: {longitude}"
            )));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl FromStr for Location {
    type Err = BarowatchError;

    /// Parse coordinates from a string like "40.7127,-74.0059" or "40.7127 -74.0059"
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = input
            .trim()
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        if parts.len() != 2 {
            return Err(BarowatchError::config(format!(
                "Location must be in format 'lat,lon', got: '{input}'"
            )));
        }

        let latitude = parts[0]
            .parse::<f64>()
            .map_err(|_| BarowatchError::config(format!("Invalid latitude: {}", parts[0])))?;
        let longitude = parts[1]
            .parse::<f64>()
            .map_err(|_| BarowatchError::config(format!("Invalid longitude: {}", parts[1])))?;

        Self::new(latitude, longitude)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}
