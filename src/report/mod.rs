//! Reporting utilities: series summary and formatted terminal output.

use chrono::NaiveDate;

use crate::math::{OPTIMUM_GROWTH, RiskLevel};
use crate::series::MergedSeries;

pub mod format;

pub use format::*;

/// Headline numbers for one merged series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub records: usize,
    pub historical: usize,
    pub forecast: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub boundary_date: Option<NaiveDate>,
    /// Cumulative GDD of the last observed day.
    pub gdd_at_boundary: Option<f64>,
    /// Cumulative GDD of the last forecast day.
    pub gdd_at_horizon: Option<f64>,
    pub peak_risk: Option<PeakRisk>,
    /// Forecast days at or above the optimum growth threshold.
    pub optimum_growth_days: usize,
}

/// Highest dollar-spot probability on either track.
#[derive(Debug, Clone, PartialEq)]
pub struct PeakRisk {
    pub date: Option<String>,
    pub probability: f64,
    pub level: RiskLevel,
    pub forecast: bool,
}

pub fn summarize(series: &MergedSeries) -> SeriesSummary {
    let (first_date, last_date) = series.date_span().unzip();

    let gdd_at_boundary = series.iter().rev().find(|r| !r.is_forecast()).map(|r| r.cumulative_gdd);
    let gdd_at_horizon = series.iter().rev().find(|r| r.is_forecast()).map(|r| r.cumulative_gdd);

    let mut peak_risk: Option<PeakRisk> = None;
    for r in series {
        let Some(p) = r.track.value().dollar_spot_probability else {
            continue;
        };
        if peak_risk.as_ref().is_none_or(|best| p > best.probability) {
            peak_risk = Some(PeakRisk {
                date: r.date.clone(),
                probability: p,
                level: RiskLevel::from_probability(p),
                forecast: r.is_forecast(),
            });
        }
    }

    let optimum_growth_days = series
        .iter()
        .filter_map(|r| r.track.forecast().and_then(|v| v.growth_potential))
        .filter(|&g| g >= OPTIMUM_GROWTH)
        .count();

    SeriesSummary {
        records: series.len(),
        historical: series.historical_count(),
        forecast: series.forecast_count(),
        first_date,
        last_date,
        boundary_date: series.boundary_date(),
        gdd_at_boundary,
        gdd_at_horizon,
        peak_risk,
        optimum_growth_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawRecord;
    use crate::series::build_series;

    fn raw(date: &str) -> RawRecord {
        RawRecord {
            date: Some(date.to_string()),
            temp_max: Some(24.0),
            temp_min: Some(14.0),
            ..RawRecord::default()
        }
    }

    #[test]
    fn summary_reports_boundary_and_horizon_totals() {
        let mut h1 = raw("2024-06-01");
        h1.cumulative_gdd = Some(9.0);
        h1.dollar_spot_probability = Some(0.25);
        let mut h2 = raw("2024-06-02");
        h2.cumulative_gdd = Some(18.0);
        h2.dollar_spot_probability = Some(0.4);

        let mut f1 = raw("2024-06-03");
        f1.forecast_gdd = Some(9.0);
        f1.forecast_dollar_spot_probability = Some(0.75);
        f1.forecast_growth_potential = Some(0.9);
        let mut f2 = raw("2024-06-04");
        f2.forecast_gdd = Some(8.0);
        f2.forecast_growth_potential = Some(0.5);

        let summary = summarize(&build_series(&[h1, h2], &[f1, f2]));

        assert_eq!(summary.records, 4);
        assert_eq!(summary.historical, 2);
        assert_eq!(summary.forecast, 2);
        assert_eq!(summary.first_date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(summary.last_date, NaiveDate::from_ymd_opt(2024, 6, 4));
        assert_eq!(summary.boundary_date, NaiveDate::from_ymd_opt(2024, 6, 3));
        assert_eq!(summary.gdd_at_boundary, Some(18.0));
        assert_eq!(summary.gdd_at_horizon, Some(35.0));
        assert_eq!(summary.optimum_growth_days, 1);

        let peak = summary.peak_risk.unwrap();
        assert_eq!(peak.date.as_deref(), Some("2024-06-03"));
        assert_eq!(peak.level, RiskLevel::High);
        assert!(peak.forecast);
    }

    #[test]
    fn empty_series_has_no_headline_values() {
        let summary = summarize(&MergedSeries::empty());
        assert_eq!(summary.records, 0);
        assert_eq!(summary.boundary_date, None);
        assert_eq!(summary.gdd_at_horizon, None);
        assert_eq!(summary.peak_risk, None);
    }
}
