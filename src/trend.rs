//! Pressure trend evaluation
//!
//! Converts provider readings from hPa to inHg, computes the percent change
//! of each hourly reading against the current pressure and checks the
//! configured lookahead hour against the drop threshold.

use tracing::debug;

use crate::BarowatchError;
use crate::models::{ForecastSnapshot, TrendPoint};

/// Hectopascals per inch of mercury
pub const HPA_PER_INHG: f64 = 33.87;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert a pressure in hPa to inHg, rounded to two decimals
#[must_use]
pub fn hpa_to_inhg(hpa: f64) -> f64 {
    round2(hpa / HPA_PER_INHG)
}

/// Percent change from `original` to `new`, rounded to two decimals.
///
/// A drop yields a negative value. Fails when `original` is zero.
pub fn percent_change(original: f64, new: f64) -> crate::Result<f64> {
    if original == 0.0 {
        return Err(BarowatchError::computation(format!(
            "Cannot compute percent change from a zero reading (new value {new})"
        )));
    }
    Ok(round2((new - original) / original * 100.0))
}

/// Build one trend point per hour offset in `0..horizon`, in input order.
///
/// Fails with [`BarowatchError::OutOfRange`] at the first offset the
/// snapshot does not cover.
pub fn build_trend(snapshot: &ForecastSnapshot, horizon: usize) -> crate::Result<Vec<TrendPoint>> {
    let current = hpa_to_inhg(snapshot.current_pressure);
    let available = snapshot.hourly_pressures.len();

    let mut points = Vec::with_capacity(horizon);
    for hour_offset in 0..horizon {
        let raw = snapshot
            .hourly_pressures
            .get(hour_offset)
            .copied()
            .ok_or(BarowatchError::OutOfRange {
                offset: hour_offset,
                len: available,
            })?;

        let converted_pressure = hpa_to_inhg(raw);
        let point = TrendPoint {
            hour_offset,
            converted_pressure,
            percent_change: percent_change(current, converted_pressure)?,
        };
        debug!("{}", point.format_line());
        points.push(point);
    }

    Ok(points)
}

/// Result of checking the lookahead hour against the drop threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarningCheck {
    pub percent_change: f64,
    pub triggered: bool,
}

/// Check whether the change at `lookahead` is strictly below `threshold`
pub fn evaluate(points: &[TrendPoint], lookahead: usize, threshold: f64) -> crate::Result<WarningCheck> {
    let point = points.get(lookahead).ok_or(BarowatchError::OutOfRange {
        offset: lookahead,
        len: points.len(),
    })?;

    Ok(WarningCheck {
        percent_change: point.percent_change,
        triggered: point.percent_change < threshold,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn points_with_changes(changes: &[f64]) -> Vec<TrendPoint> {
        changes
            .iter()
            .enumerate()
            .map(|(hour_offset, &percent_change)| TrendPoint {
                hour_offset,
                converted_pressure: 29.92,
                percent_change,
            })
            .collect()
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(3387.0, 100.0)]
    #[case(1013.25, 29.92)]
    #[case(990.0, 29.23)]
    #[case(1013.0, 29.91)]
    #[case(-33.87, -1.0)]
    fn test_hpa_to_inhg(#[case] hpa: f64, #[case] expected: f64) {
        assert_eq!(hpa_to_inhg(hpa), expected);
    }

    #[test]
    fn test_hpa_to_inhg_rounds_to_two_decimals() {
        for hpa in [950.3, 1001.7, 1013.25, 1042.9] {
            let inhg = hpa_to_inhg(hpa);
            assert!(((inhg * 100.0).round() - inhg * 100.0).abs() < 1e-9);
        }
    }

    #[rstest]
    #[case(100.0, 100.0, 0.0)]
    #[case(100.0, 90.0, -10.0)]
    #[case(100.0, 110.0, 10.0)]
    #[case(29.92, 29.23, -2.31)]
    #[case(100.0, 99.6, -0.4)]
    fn test_percent_change(#[case] original: f64, #[case] new: f64, #[case] expected: f64) {
        assert_eq!(percent_change(original, new).unwrap(), expected);
    }

    #[rstest]
    #[case(0.0)]
    #[case(29.92)]
    #[case(-1.0)]
    fn test_percent_change_from_zero_fails(#[case] new: f64) {
        let err = percent_change(0.0, new).unwrap_err();
        assert!(matches!(err, BarowatchError::Computation { .. }));
    }

    #[test]
    fn test_build_trend_preserves_order() {
        let snapshot = ForecastSnapshot::new(1013.0, vec![1013.0, 1010.0, 1005.0]);
        let points = build_trend(&snapshot, 3).unwrap();

        assert_eq!(points.len(), 3);
        let offsets: Vec<usize> = points.iter().map(|p| p.hour_offset).collect();
        assert_eq!(offsets, vec![0, 1, 2]);

        let pressures: Vec<f64> = points.iter().map(|p| p.converted_pressure).collect();
        assert_eq!(pressures, vec![29.91, 29.82, 29.67]);

        let changes: Vec<f64> = points.iter().map(|p| p.percent_change).collect();
        assert_eq!(changes, vec![0.0, -0.3, -0.8]);
    }

    #[test]
    fn test_build_trend_uses_only_horizon() {
        let snapshot = ForecastSnapshot::new(1013.0, vec![1013.0; 48]);
        let points = build_trend(&snapshot, 24).unwrap();
        assert_eq!(points.len(), 24);
        assert_eq!(points.last().unwrap().hour_offset, 23);
    }

    #[test]
    fn test_build_trend_fails_at_first_missing_offset() {
        let snapshot = ForecastSnapshot::new(1013.0, vec![1012.0, 1011.0]);
        let err = build_trend(&snapshot, 5).unwrap_err();
        assert!(matches!(err, BarowatchError::OutOfRange { offset: 2, len: 2 }));
    }

    #[test]
    fn test_build_trend_zero_current_pressure_fails() {
        let snapshot = ForecastSnapshot::new(0.0, vec![1012.0]);
        let err = build_trend(&snapshot, 1).unwrap_err();
        assert!(matches!(err, BarowatchError::Computation { .. }));
    }

    #[test]
    fn test_evaluate_threshold_is_strict() {
        let points = points_with_changes(&[0.0, -0.4]);
        let check = evaluate(&points, 1, -0.4).unwrap();
        assert_eq!(check.percent_change, -0.4);
        assert!(!check.triggered);

        let points = points_with_changes(&[0.0, -0.41]);
        assert!(evaluate(&points, 1, -0.4).unwrap().triggered);
    }

    #[test]
    fn test_evaluate_rising_pressure_does_not_trigger() {
        let points = points_with_changes(&[0.5, 1.2]);
        assert!(!evaluate(&points, 1, -0.4).unwrap().triggered);
    }

    #[test]
    fn test_evaluate_lookahead_out_of_range() {
        let points = points_with_changes(&[0.0, -1.0, -2.0]);
        let err = evaluate(&points, 3, -0.4).unwrap_err();
        assert!(matches!(err, BarowatchError::OutOfRange { offset: 3, len: 3 }));
    }
}
