//! Forecast snapshot and the trend values derived from it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One provider query: current pressure plus ordered hourly readings, in hPa
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSnapshot {
    /// Current pressure in hPa
    pub current_pressure: f64,
    /// Hourly pressures in hPa, index 0 is the nearest hour
    pub hourly_pressures: Vec<f64>,
}

impl ForecastSnapshot {
    #[must_use]
    pub fn new(current_pressure: f64, hourly_pressures: Vec<f64>) -> Self {
        Self {
            current_pressure,
            hourly_pressures,
        }
    }
}

/// Pressure and change from current at one hour offset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub hour_offset: usize,
    /// Pressure in inHg
    pub converted_pressure: f64,
    /// Signed percent change relative to the current pressure
    pub percent_change: f64,
}

impl TrendPoint {
    /// Format as a single report line
    #[must_use]
    pub fn format_line(&self) -> String {
        format!(
            "{} hour pressure: {:.2}. Change from current: {:.2}%",
            self.hour_offset, self.converted_pressure, self.percent_change
        )
    }
}

/// Outcome of a single evaluation cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub evaluated_at: DateTime<Utc>,
    /// Current pressure in inHg
    pub current_pressure: f64,
    pub lookahead_hours: usize,
    pub threshold: f64,
    /// Percent change at the lookahead offset
    pub percent_change: f64,
    pub triggered: bool,
    pub points: Vec<TrendPoint>,
}

impl EvaluationResult {
    /// All trend lines, one per hour offset
    #[must_use]
    pub fn summary(&self) -> String {
        self.points
            .iter()
            .map(TrendPoint::format_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Warning line, present only when the drop threshold was crossed
    #[must_use]
    pub fn warning_message(&self) -> Option<String> {
        self.triggered.then(|| {
            format!(
                "WARNING: Large drop in pressure detected in the next {} hours! ({:.2}%)",
                self.lookahead_hours, self.percent_change
            )
        })
    }

    /// Message published to the notification topic
    #[must_use]
    pub fn notification_body(&self) -> String {
        match self.warning_message() {
            Some(warning) => format!("{warning}\n\n{}", self.summary()),
            None => self.summary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result(triggered: bool) -> EvaluationResult {
        EvaluationResult {
            evaluated_at: Utc::now(),
            current_pressure: 29.92,
            lookahead_hours: 1,
            threshold: -0.4,
            percent_change: -2.31,
            triggered,
            points: vec![
                TrendPoint {
                    hour_offset: 0,
                    converted_pressure: 29.92,
                    percent_change: 0.0,
                },
                TrendPoint {
                    hour_offset: 1,
                    converted_pressure: 29.23,
                    percent_change: -2.31,
                },
            ],
        }
    }

    #[test]
    fn test_trend_point_line() {
        let point = TrendPoint {
            hour_offset: 3,
            converted_pressure: 29.9,
            percent_change: 0.0,
        };
        assert_eq!(
            point.format_line(),
            "3 hour pressure: 29.90. Change from current: 0.00%"
        );
    }

    #[test]
    fn test_summary_keeps_offset_order() {
        let summary = sample_result(false).summary();
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("0 hour pressure"));
        assert!(lines[1].starts_with("1 hour pressure: 29.23"));
    }

    #[test]
    fn test_warning_only_when_triggered() {
        assert!(sample_result(false).warning_message().is_none());

        let warning = sample_result(true).warning_message().unwrap();
        assert_eq!(
            warning,
            "WARNING: Large drop in pressure detected in the next 1 hours! (-2.31%)"
        );
    }

    #[test]
    fn test_notification_body_contains_warning_and_summary() {
        let body = sample_result(true).notification_body();
        assert!(body.starts_with("WARNING"));
        assert!(body.contains("\n\n0 hour pressure"));
        assert!(body.ends_with("Change from current: -2.31%"));
    }

    #[test]
    fn test_json_round_trip() {
        let result = sample_result(true);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"triggered\":true"));
        assert!(json.contains("\"percent_change\":-2.31"));

        let parsed: EvaluationResult = serde_json::from_str(&json).unwrap();
        assert!(parsed.triggered);
        assert_eq!(parsed.percent_change, -2.31);
        assert_eq!(parsed.points, result.points);
        assert_eq!(parsed, result);
    }
}
