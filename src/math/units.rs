//! Temperature conversion and display rounding.
//!
//! The converter never rounds; callers decide when to apply [`round2`].

/// Convert degrees Celsius to degrees Fahrenheit.
pub fn to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Round to 2 decimal places, ties away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert and round a nullable Celsius reading.
pub fn fahrenheit_2dp(celsius: Option<f64>) -> Option<f64> {
    celsius.map(|c| round2(to_fahrenheit(c)))
}

/// Rounded midpoint of two bounds; `None` unless both are present.
pub fn mean_2dp(max: Option<f64>, min: Option<f64>) -> Option<f64> {
    match (max, min) {
        (Some(max), Some(min)) => Some(round2((max + min) / 2.0)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_points_convert_exactly() {
        assert_eq!(to_fahrenheit(0.0), 32.0);
        assert_eq!(to_fahrenheit(100.0), 212.0);
        assert_eq!(to_fahrenheit(-40.0), -40.0);
    }

    #[test]
    fn conversion_does_not_round() {
        let f = to_fahrenheit(21.111);
        assert!((f - 69.9998).abs() < 1e-9);
        assert_eq!(round2(f), 70.0);
    }

    #[test]
    fn round2_breaks_ties_away_from_zero() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(59.0), 59.0);
    }

    #[test]
    fn mean_requires_both_bounds() {
        assert_eq!(mean_2dp(Some(68.0), Some(50.0)), Some(59.0));
        assert_eq!(mean_2dp(None, Some(50.0)), None);
        assert_eq!(mean_2dp(Some(68.0), None), None);
        assert_eq!(fahrenheit_2dp(None), None);
        assert_eq!(fahrenheit_2dp(Some(22.0)), Some(71.6));
    }
}
