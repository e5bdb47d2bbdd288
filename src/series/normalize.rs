//! Raw record normalization.
//!
//! Turns one [`RawRecord`] into a [`NormalizedRecord`] for a given origin.
//! This step never fails: missing temperatures stay `None`, a missing growth
//! potential becomes `0.0`, a missing risk probability stays `None`, and a
//! missing or unparseable date yields a record without a sort key.
//!
//! The sort key is a calendar day. Datetime strings are cut down to the date
//! written in them (the local date of their offset), so two records on the
//! same day keep their concatenation order whatever their time of day.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::domain::{NormalizedRecord, Origin, RawRecord, Track, TrackValues};
use crate::math::{fahrenheit_2dp, mean_2dp};

/// Normalize every record of one acquisition set, preserving order.
pub fn normalize_all(raw: &[RawRecord], origin: Origin) -> Vec<NormalizedRecord> {
    raw.iter().map(|r| normalize(r, origin)).collect()
}

/// Normalize a single record.
pub fn normalize(raw: &RawRecord, origin: Origin) -> NormalizedRecord {
    let temp_max = fahrenheit_2dp(raw.temp_max);
    let temp_min = fahrenheit_2dp(raw.temp_min);
    let temp_mean = mean_2dp(temp_max, temp_min);

    // Observed days read their daily GDD from `forecast_gdd` too, not `gdd`.
    // Upstream cumulative totals depend on this; keep it until confirmed.
    let gdd = or_zero(raw.forecast_gdd);

    let (dollar_spot_probability, track_growth) = match origin {
        Origin::Historical => (raw.dollar_spot_probability, None),
        Origin::Forecast => (
            raw.dollar_spot_probability
                .or(raw.forecast_dollar_spot_probability),
            raw.forecast_growth_potential.or(raw.growth_potential),
        ),
    };

    let day = raw.date.as_deref().and_then(parse_day);
    if day.is_none() {
        tracing::warn!(
            origin = origin.label(),
            date = raw.date.as_deref().unwrap_or("<missing>"),
            "record has no usable date; it will sort after dated records"
        );
    }

    NormalizedRecord {
        date: raw.date.clone(),
        day,
        temp_min: raw.temp_min,
        temp_max: raw.temp_max,
        forecast_gdd: raw.forecast_gdd,
        temp_mean,
        gdd,
        cumulative_gdd: or_zero(raw.cumulative_gdd),
        growth_potential: or_zero(raw.growth_potential),
        track: Track::new(
            origin,
            TrackValues {
                temp_max,
                temp_min,
                temp_mean,
                dollar_spot_probability,
                growth_potential: track_growth,
            },
        ),
    }
}

/// Parse an ISO calendar date, tolerating a trailing time component.
///
/// The time and offset are dropped: `2024-05-01T23:30:00-05:00` is May 1,
/// not the UTC instant on May 2.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

fn or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| !v.is_nan()).unwrap_or(0.0)
}
