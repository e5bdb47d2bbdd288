//! Shared "merge pipeline" logic used by both CLI and TUI front-ends.
//!
//! fetch historical + fetch forecast (concurrently) -> normalize -> carry
//! cumulative GDD -> merge/sort
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::data::RecordSource;
use crate::domain::RawRecord;
use crate::error::AppError;
use crate::series::{MergedSeries, build_series};

/// All outputs of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub historical: Vec<RawRecord>,
    pub forecast: Vec<RawRecord>,
    pub series: MergedSeries,
}

/// Fetch both record sets and build the merged series.
///
/// The two fetches run concurrently; if either fails the whole run fails and
/// no partial series is produced.
pub fn run_pipeline(source: &dyn RecordSource) -> Result<PipelineOutput, AppError> {
    let (historical, forecast) = rayon::join(|| source.fetch_historical(), || source.fetch_forecast());
    let historical = historical?;
    let forecast = forecast?;

    let series = build_series(&historical, &forecast);
    tracing::info!(
        historical = historical.len(),
        forecast = forecast.len(),
        merged = series.len(),
        "built merged series"
    );

    Ok(PipelineOutput {
        historical,
        forecast,
        series,
    })
}

/// Like [`run_pipeline`], keeping only the merged series.
pub fn load_series(source: &dyn RecordSource) -> Result<MergedSeries, AppError> {
    run_pipeline(source).map(|out| out.series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    struct StubSource {
        historical: Result<Vec<RawRecord>, AppError>,
        forecast: Result<Vec<RawRecord>, AppError>,
    }

    impl RecordSource for StubSource {
        fn describe(&self) -> String {
            "stub".to_string()
        }

        fn fetch_historical(&self) -> Result<Vec<RawRecord>, AppError> {
            self.historical.clone()
        }

        fn fetch_forecast(&self) -> Result<Vec<RawRecord>, AppError> {
            self.forecast.clone()
        }
    }

    fn day(date: &str, gdd: f64) -> RawRecord {
        RawRecord {
            date: Some(date.to_string()),
            forecast_gdd: Some(gdd),
            ..RawRecord::default()
        }
    }

    #[test]
    fn cumulative_is_carried_across_sets() {
        let mut last = day("2024-05-01", 0.0);
        last.cumulative_gdd = Some(2.0);
        let source = StubSource {
            historical: Ok(vec![last]),
            forecast: Ok(vec![day("2024-05-02", 3.0), day("2024-05-03", 4.0)]),
        };

        let out = run_pipeline(&source).unwrap();
        let totals: Vec<f64> = out.series.iter().map(|r| r.cumulative_gdd).collect();
        assert_eq!(totals, vec![2.0, 5.0, 9.0]);
        assert_eq!(out.historical.len(), 1);
        assert_eq!(out.forecast.len(), 2);
    }

    #[test]
    fn a_failed_fetch_fails_the_run() {
        let source = StubSource {
            historical: Ok(vec![day("2024-05-01", 1.0)]),
            forecast: Err(AppError::transport("Failed to fetch forecast data: status 503.")),
        };
        let err = load_series(&source).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn empty_sets_give_an_empty_series() {
        let source = StubSource {
            historical: Ok(vec![]),
            forecast: Ok(vec![]),
        };
        assert!(load_series(&source).unwrap().is_empty());
    }
}
