//! Cumulative GDD carried across the historical→forecast boundary.
//!
//! Observed days arrive with an upstream running total. Forecast days do not,
//! so the total is seeded from the last observed day and folded forward one
//! forecast day at a time. The fold is order-dependent and stays sequential.

use crate::domain::NormalizedRecord;

/// Running cumulative GDD total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CumulativeGdd {
    total: f64,
}

impl CumulativeGdd {
    /// Seed from the last historical record, or zero when there is none.
    pub fn seeded(historical: &[NormalizedRecord]) -> Self {
        let total = historical.last().map(|r| r.cumulative_gdd).unwrap_or(0.0);
        Self { total }
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// Add one day of GDD and return the new total.
    pub fn advance(&mut self, daily_gdd: f64) -> f64 {
        self.total += daily_gdd;
        self.total
    }
}

/// Assign `cumulative_gdd` to each forecast record, in forecast order.
///
/// Historical records are left as supplied.
pub fn carry_forward(
    historical: &[NormalizedRecord],
    forecast: Vec<NormalizedRecord>,
) -> Vec<NormalizedRecord> {
    let mut tracker = CumulativeGdd::seeded(historical);
    let seed = tracker.total();

    let out: Vec<NormalizedRecord> = forecast
        .into_iter()
        .map(|mut record| {
            record.cumulative_gdd = tracker.advance(record.gdd);
            record
        })
        .collect();

    tracing::debug!(seed, horizon_total = tracker.total(), days = out.len(), "carried cumulative gdd");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Origin, RawRecord};
    use crate::series::normalize::normalize;

    fn forecast_day(date: &str, gdd: f64) -> NormalizedRecord {
        let raw = RawRecord {
            date: Some(date.to_string()),
            forecast_gdd: Some(gdd),
            ..RawRecord::default()
        };
        normalize(&raw, Origin::Forecast)
    }

    fn historical_day(date: &str, cumulative: f64) -> NormalizedRecord {
        let raw = RawRecord {
            date: Some(date.to_string()),
            cumulative_gdd: Some(cumulative),
            ..RawRecord::default()
        };
        normalize(&raw, Origin::Historical)
    }

    #[test]
    fn empty_history_seeds_zero() {
        let forecast = vec![
            forecast_day("2024-05-01", 2.0),
            forecast_day("2024-05-02", 3.0),
            forecast_day("2024-05-03", 4.0),
        ];
        let out = carry_forward(&[], forecast);
        let totals: Vec<f64> = out.iter().map(|r| r.cumulative_gdd).collect();
        assert_eq!(totals, vec![2.0, 5.0, 9.0]);
    }

    #[test]
    fn seed_is_last_historical_total_not_the_max() {
        let history = vec![historical_day("2024-04-29", 12.0), historical_day("2024-04-30", 7.0)];
        let out = carry_forward(&history, vec![forecast_day("2024-05-01", 1.5)]);
        assert_eq!(out[0].cumulative_gdd, 8.5);
        assert_eq!(history[1].cumulative_gdd, 7.0);
    }

    #[test]
    fn each_forecast_total_is_seed_plus_prefix_sum() {
        let history = vec![historical_day("2024-04-30", 100.0)];
        let gdds = [0.0, 4.25, 0.5, 7.0, 1.0];
        let forecast = gdds
            .iter()
            .enumerate()
            .map(|(i, g)| forecast_day(&format!("2024-05-{:02}", i + 1), *g))
            .collect();
        let out = carry_forward(&history, forecast);
        for (i, r) in out.iter().enumerate() {
            let expected = 100.0 + gdds[..=i].iter().sum::<f64>();
            assert!((r.cumulative_gdd - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn tracker_advances_from_seed() {
        let mut t = CumulativeGdd::seeded(&[historical_day("2024-04-30", 5.0)]);
        assert_eq!(t.total(), 5.0);
        assert_eq!(t.advance(3.0), 8.0);
        assert_eq!(t.advance(0.0), 8.0);
    }
}
