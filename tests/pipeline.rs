use std::fs;

use turf_track::app::pipeline::{load_series, run_pipeline};
use turf_track::data::{FileSource, source_from_config};
use turf_track::domain::{SourceConfig, SourceKind};
use turf_track::error::ErrorKind;

const HISTORICAL: &str = r#"[
  {"date": "2024-05-01", "temp_max": 20.0, "temp_min": 10.0, "gdd": 5.0, "cumulative_gdd": 5.0,
   "growth_potential": 0.44, "dollar_spot_probability": 0.12},
  {"date": "2024-05-02", "temp_max": null, "temp_min": null, "cumulative_gdd": 5.0}
]"#;

const FORECAST: &str = r#"[
  {"date": "2024-05-04", "temp_max": 24.0, "temp_min": 14.0, "forecast_gdd": 9.0,
   "forecast_growth_potential": 0.9, "forecast_dollar_spot_probability": 0.35},
  {"date": "2024-05-03", "temp_max": 22.0, "temp_min": 12.0, "forecast_gdd": 7.0}
]"#;

#[test]
fn file_snapshots_merge_into_one_ordered_series() {
    let dir = tempfile::tempdir().unwrap();
    let hist = dir.path().join("historical.json");
    let fcst = dir.path().join("forecast.json");
    fs::write(&hist, HISTORICAL).unwrap();
    fs::write(&fcst, FORECAST).unwrap();

    let series = load_series(&FileSource::new(hist, fcst)).unwrap();
    let rows = series.rows();

    let dates: Vec<&str> = rows.iter().map(|r| r.date.as_deref().unwrap()).collect();
    assert_eq!(dates, vec!["2024-05-01", "2024-05-02", "2024-05-03", "2024-05-04"]);

    // Forecast totals are folded in forecast input order, then sorted.
    assert_eq!(rows[2].cumulative_gdd, 21.0);
    assert_eq!(rows[3].cumulative_gdd, 14.0);

    assert_eq!(rows[1].historical_temp_max, None);
    assert_eq!(rows[1].growth_potential, 0.0);
    assert!(rows[2].is_forecast);
    assert_eq!(rows[3].forecast_dollar_spot_probability, Some(0.35));
    assert_eq!(rows[3].forecast_growth_potential, Some(0.9));
    assert_eq!(series.boundary_index(), Some(2));
}

#[test]
fn missing_snapshot_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileSource::new(dir.path().join("nope.json"), dir.path().join("nope2.json"));
    let err = load_series(&source).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn sample_source_runs_offline_and_carries_totals() {
    let config = SourceConfig {
        kind: SourceKind::Sample,
        sample_seed: 11,
        sample_today: chrono::NaiveDate::from_ymd_opt(2024, 7, 1),
        ..SourceConfig::default()
    };
    let source = source_from_config(&config).unwrap();
    let out = run_pipeline(source.as_ref()).unwrap();

    assert_eq!(out.series.len(), 37);
    assert_eq!(out.series.historical_count(), 30);
    assert_eq!(out.series.forecast_count(), 7);
    assert_eq!(out.series.boundary_date(), chrono::NaiveDate::from_ymd_opt(2024, 7, 1));

    let totals: Vec<f64> = out.series.iter().skip(29).map(|r| r.cumulative_gdd).collect();
    assert!(totals.windows(2).all(|w| w[1] >= w[0]));
}
