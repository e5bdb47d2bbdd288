//! Shared domain types.
//!
//! Internally a record's per-origin values live in a tagged [`Track`]; the
//! flat "historical_* / forecast_*" layout that chart consumers expect only
//! exists in [`SeriesRow`], which is built at the export/render boundary.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One calendar day as delivered by the acquisition layer.
///
/// Every field is optional: upstream rows may omit keys or send `null`, and
/// normalization decides per field whether that means "no data" or "zero".
/// Temperatures are in degrees Celsius.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub date: Option<String>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub forecast_gdd: Option<f64>,
    pub growth_potential: Option<f64>,
    pub dollar_spot_probability: Option<f64>,

    /// Daily GDD as stored for observed days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gdd: Option<f64>,
    /// Running GDD total, pre-computed upstream for observed days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cumulative_gdd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_growth_potential: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_dollar_spot_probability: Option<f64>,
}

/// Which acquisition set a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Historical,
    Forecast,
}

impl Origin {
    pub fn label(self) -> &'static str {
        match self {
            Origin::Historical => "historical",
            Origin::Forecast => "forecast",
        }
    }
}

/// A value tagged with the track it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Track<T> {
    Historical(T),
    Forecast(T),
}

impl<T> Track<T> {
    pub fn new(origin: Origin, value: T) -> Self {
        match origin {
            Origin::Historical => Track::Historical(value),
            Origin::Forecast => Track::Forecast(value),
        }
    }

    pub fn origin(&self) -> Origin {
        match self {
            Track::Historical(_) => Origin::Historical,
            Track::Forecast(_) => Origin::Forecast,
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Track::Historical(v) | Track::Forecast(v) => v,
        }
    }

    pub fn historical(&self) -> Option<&T> {
        match self {
            Track::Historical(v) => Some(v),
            Track::Forecast(_) => None,
        }
    }

    pub fn forecast(&self) -> Option<&T> {
        match self {
            Track::Historical(_) => None,
            Track::Forecast(v) => Some(v),
        }
    }

    pub fn is_forecast(&self) -> bool {
        matches!(self, Track::Forecast(_))
    }
}

/// Values that are drawn on separate historical/forecast tracks.
///
/// Temperatures are Fahrenheit rounded to 2 decimals. `None` means the
/// source had no reading for this track and must stay `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackValues {
    pub temp_max: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_mean: Option<f64>,
    pub dollar_spot_probability: Option<f64>,
    /// Only materialized on the forecast track.
    pub growth_potential: Option<f64>,
}

/// One normalized day.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    /// Date string exactly as received.
    pub date: Option<String>,
    /// Parsed sort key; `None` for missing or unparseable dates.
    pub day: Option<NaiveDate>,

    /// Raw Celsius bounds, passed through untouched.
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub forecast_gdd: Option<f64>,

    /// Fahrenheit mean of the converted bounds.
    pub temp_mean: Option<f64>,
    pub gdd: f64,
    pub cumulative_gdd: f64,
    pub growth_potential: f64,

    pub track: Track<TrackValues>,
}

impl NormalizedRecord {
    pub fn origin(&self) -> Origin {
        self.track.origin()
    }

    pub fn is_forecast(&self) -> bool {
        self.track.is_forecast()
    }

    pub fn to_row(&self) -> SeriesRow {
        SeriesRow::from(self)
    }
}

/// Flat, dual-slot record shape handed to chart consumers and exports.
///
/// Every key is always present; the inactive track's keys are `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRow {
    pub date: Option<String>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub temp_mean: Option<f64>,
    pub gdd: f64,
    pub forecast_gdd: Option<f64>,
    pub historical_temp_max: Option<f64>,
    pub historical_temp_min: Option<f64>,
    pub historical_temp_mean: Option<f64>,
    pub forecast_temp_max: Option<f64>,
    pub forecast_temp_min: Option<f64>,
    pub forecast_temp_mean: Option<f64>,
    pub dollar_spot_probability: Option<f64>,
    pub forecast_dollar_spot_probability: Option<f64>,
    pub cumulative_gdd: f64,
    pub growth_potential: f64,
    pub forecast_growth_potential: Option<f64>,
    #[serde(rename = "isForecast")]
    pub is_forecast: bool,
}

impl From<&NormalizedRecord> for SeriesRow {
    fn from(r: &NormalizedRecord) -> Self {
        let hist = r.track.historical();
        let fcst = r.track.forecast();
        SeriesRow {
            date: r.date.clone(),
            temp_min: r.temp_min,
            temp_max: r.temp_max,
            temp_mean: r.temp_mean,
            gdd: r.gdd,
            forecast_gdd: r.forecast_gdd,
            historical_temp_max: hist.and_then(|v| v.temp_max),
            historical_temp_min: hist.and_then(|v| v.temp_min),
            historical_temp_mean: hist.and_then(|v| v.temp_mean),
            forecast_temp_max: fcst.and_then(|v| v.temp_max),
            forecast_temp_min: fcst.and_then(|v| v.temp_min),
            forecast_temp_mean: fcst.and_then(|v| v.temp_mean),
            dollar_spot_probability: hist.and_then(|v| v.dollar_spot_probability),
            forecast_dollar_spot_probability: fcst.and_then(|v| v.dollar_spot_probability),
            cumulative_gdd: r.cumulative_gdd,
            growth_potential: r.growth_potential,
            forecast_growth_potential: fcst.and_then(|v| v.growth_potential),
            is_forecast: r.is_forecast(),
        }
    }
}

/// Where raw records come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The turf weather HTTP API.
    Api,
    /// Two local JSON snapshot files.
    File,
    /// A seeded synthetic season (no network).
    Sample,
}

/// Acquisition settings as understood by the pipeline.
///
/// This is derived from CLI flags plus environment defaults.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub historical_path: Option<PathBuf>,
    pub forecast_path: Option<PathBuf>,
    pub sample_seed: u64,
    pub history_days: usize,
    pub forecast_days: usize,
    /// Fixed "today" for the synthetic season; defaults to the local date.
    pub sample_today: Option<NaiveDate>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Api,
            api_url: None,
            timeout_secs: None,
            historical_path: None,
            forecast_path: None,
            sample_seed: 42,
            history_days: 30,
            forecast_days: 7,
            sample_today: None,
        }
    }
}
