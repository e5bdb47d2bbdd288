//! Agronomic indices derived from daily air temperature and humidity.
//!
//! These are the upstream formulas that produce the `gdd`, `growth_potential`
//! and `dollar_spot_probability` fields the pipeline consumes. All inputs are
//! in degrees Celsius and percent relative humidity.

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// Base temperature below which no heat units accumulate.
pub const GDD_BASE_C: f64 = 10.0;

/// Temperature of peak cool-season turf growth.
pub const GROWTH_OPTIMUM_C: f64 = 20.0;

/// Spread of the growth-potential bell curve.
pub const GROWTH_SPREAD_C: f64 = 5.5;

/// Growth potential at or above this value is considered optimum.
pub const OPTIMUM_GROWTH: f64 = 0.7;

/// Dollar-spot probability thresholds.
pub const MODERATE_RISK: f64 = 0.3;
pub const HIGH_RISK: f64 = 0.7;

// Smith-Kerns logistic model coefficients.
const SK_B0: f64 = -8.37;
const SK_B1: f64 = 0.15;
const SK_B2: f64 = 0.06;

/// Daily growing degree days for a mean temperature.
pub fn growing_degree_days(avg_temp_c: f64) -> f64 {
    (avg_temp_c - GDD_BASE_C).max(0.0)
}

/// Growth potential in [0, 1]: a Gaussian centred on the growth optimum.
pub fn growth_potential(avg_temp_c: f64) -> f64 {
    let z = (avg_temp_c - GROWTH_OPTIMUM_C) / GROWTH_SPREAD_C;
    (-0.5 * z * z).exp()
}

/// Smith-Kerns dollar spot probability, clamped to [0, 1] and rounded to 2 decimals.
pub fn dollar_spot_probability(avg_temp_c: f64, rel_humidity: f64) -> f64 {
    let exponent = SK_B0 + SK_B1 * avg_temp_c + SK_B2 * rel_humidity;
    let p = exponent.exp() / (1.0 + exponent.exp());
    crate::math::round2(p.clamp(0.0, 1.0))
}

/// Qualitative dollar-spot risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn from_probability(p: f64) -> Self {
        if p >= HIGH_RISK {
            RiskLevel::High
        } else if p >= MODERATE_RISK {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }
}

/// Average hourly humidity samples per local calendar day.
///
/// Missing samples are skipped; a day with no usable samples is absent from
/// the result.
pub fn daily_humidity_means(hourly: &[(NaiveDate, Option<f64>)]) -> BTreeMap<NaiveDate, f64> {
    let mut sums: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for &(day, value) in hourly {
        let Some(v) = value else { continue };
        if !v.is_finite() {
            continue;
        }
        let entry = sums.entry(day).or_insert((0.0, 0));
        entry.0 += v;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(day, (sum, n))| (day, sum / n as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gdd_is_zero_below_base() {
        assert_eq!(growing_degree_days(5.0), 0.0);
        assert_eq!(growing_degree_days(10.0), 0.0);
        assert!((growing_degree_days(17.5) - 7.5).abs() < 1e-12);
    }

    #[test]
    fn growth_potential_peaks_at_optimum() {
        assert!((growth_potential(20.0) - 1.0).abs() < 1e-12);
        let off = growth_potential(25.5);
        assert!((off - (-0.5f64).exp()).abs() < 1e-12);
        assert!(growth_potential(14.5) < growth_potential(18.0));
    }

    #[test]
    fn dollar_spot_is_a_bounded_probability() {
        let p = dollar_spot_probability(22.0, 85.0);
        // exponent = -8.37 + 3.3 + 5.1 = 0.03 -> ~0.5075
        assert_eq!(p, 0.51);
        assert_eq!(dollar_spot_probability(-30.0, 0.0), 0.0);
        assert!(dollar_spot_probability(40.0, 100.0) <= 1.0);
    }

    #[test]
    fn risk_levels_use_inclusive_thresholds() {
        assert_eq!(RiskLevel::from_probability(0.29), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(0.3), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_probability(0.7), RiskLevel::High);
    }

    #[test]
    fn humidity_means_skip_missing_samples() {
        let d1 = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let d3 = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
        let samples = vec![
            (d1, Some(80.0)),
            (d1, None),
            (d1, Some(60.0)),
            (d2, Some(50.0)),
            (d3, None),
        ];
        let means = daily_humidity_means(&samples);
        assert_eq!(means.get(&d1), Some(&70.0));
        assert_eq!(means.get(&d2), Some(&50.0));
        assert!(!means.contains_key(&d3));
    }
}
