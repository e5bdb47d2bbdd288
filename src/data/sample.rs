//! Synthetic turf season generation.
//!
//! Produces backend-shaped raw records without any network access: observed
//! days carry `gdd`, `cumulative_gdd`, `growth_potential` and
//! `dollar_spot_probability`; forecast days carry the `forecast_*` variants.
//! Output is deterministic for a given seed and "today".

use std::collections::hash_map::DefaultHasher;
use std::f64::consts::PI;
use std::hash::{Hash, Hasher};

use chrono::{Datelike, Duration, Local, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{RawRecord, SourceConfig};
use crate::error::AppError;
use crate::math::{daily_humidity_means, dollar_spot_probability, growing_degree_days, growth_potential, round2};

/// Annual mean air temperature (°C) of the synthetic climate.
const CLIMATE_MEAN_C: f64 = 11.0;
/// Half the summer/winter swing (°C).
const CLIMATE_AMPLITUDE_C: f64 = 11.0;
/// Day of year at which the seasonal curve crosses its mean on the way up.
const SPRING_PHASE_DOY: f64 = 110.0;

/// Chance a day is missing its temperature readings.
const MISSING_TEMP_PROB: f64 = 0.03;
/// Chance a single hourly humidity sample is missing.
const MISSING_HUMIDITY_PROB: f64 = 0.05;

/// Longest season (history plus forecast) the generator will build.
pub const MAX_SEASON_DAYS: usize = 3660;

#[derive(Debug, Clone, PartialEq)]
pub struct SampleSeason {
    pub historical: Vec<RawRecord>,
    pub forecast: Vec<RawRecord>,
}

/// Generate `history_days` observed days ending yesterday and
/// `forecast_days` forecast days starting today.
pub fn generate_season(
    seed: u64,
    today: NaiveDate,
    history_days: usize,
    forecast_days: usize,
) -> Result<SampleSeason, AppError> {
    let total = history_days
        .checked_add(forecast_days)
        .filter(|&t| t <= MAX_SEASON_DAYS)
        .ok_or_else(|| AppError::config(format!("Sample season cannot exceed {MAX_SEASON_DAYS} days.")))?;

    let mut rng = StdRng::seed_from_u64(season_seed(seed, today));
    let day_noise = Normal::new(0.0, 2.5)
        .map_err(|e| AppError::config(format!("Noise distribution error: {e}")))?;
    let humidity_noise: Normal<f64> = Normal::new(70.0, 12.0)
        .map_err(|e| AppError::config(format!("Noise distribution error: {e}")))?;

    let start = shift(today, -(history_days as i64))?;

    let mut historical = Vec::with_capacity(history_days);
    let mut forecast = Vec::with_capacity(forecast_days);
    let mut cumulative = 0.0;

    for offset in 0..total {
        let day = shift(start, offset as i64)?;
        let is_forecast = offset >= history_days;

        let (temp_max, temp_min) = if rng.gen_bool(MISSING_TEMP_PROB) {
            (None, None)
        } else {
            let mean = seasonal_mean(day) + day_noise.sample(&mut rng);
            let range = rng.gen_range(6.0..12.0);
            (Some(round1(mean + range / 2.0)), Some(round1(mean - range / 2.0)))
        };

        let hourly: Vec<(NaiveDate, Option<f64>)> = (0..24)
            .map(|_| {
                let v = if rng.gen_bool(MISSING_HUMIDITY_PROB) {
                    None
                } else {
                    Some(humidity_noise.sample(&mut rng).clamp(20.0, 100.0))
                };
                (day, v)
            })
            .collect();
        let humidity = daily_humidity_means(&hourly).get(&day).copied();

        let avg = match (temp_max, temp_min) {
            (Some(max), Some(min)) => Some((max + min) / 2.0),
            _ => None,
        };
        let gdd = avg.map(|a| round2(growing_degree_days(a)));
        let growth = avg.map(|a| round2(growth_potential(a)));
        let dollar_spot = match (avg, humidity) {
            (Some(a), Some(h)) => Some(dollar_spot_probability(a, h)),
            _ => None,
        };

        let date = Some(day.format("%Y-%m-%d").to_string());
        if is_forecast {
            forecast.push(RawRecord {
                date,
                temp_max,
                temp_min,
                forecast_gdd: gdd,
                forecast_growth_potential: growth,
                forecast_dollar_spot_probability: dollar_spot,
                ..RawRecord::default()
            });
        } else {
            if let Some(g) = gdd {
                cumulative += g;
            }
            historical.push(RawRecord {
                date,
                temp_max,
                temp_min,
                gdd,
                cumulative_gdd: Some(round2(cumulative)),
                growth_potential: growth,
                dollar_spot_probability: dollar_spot,
                ..RawRecord::default()
            });
        }
    }

    Ok(SampleSeason { historical, forecast })
}

fn shift(day: NaiveDate, days: i64) -> Result<NaiveDate, AppError> {
    day.checked_add_signed(Duration::days(days))
        .ok_or_else(|| AppError::config("Sample season out of date range."))
}

fn seasonal_mean(day: NaiveDate) -> f64 {
    let doy = day.ordinal() as f64;
    CLIMATE_MEAN_C + CLIMATE_AMPLITUDE_C * (2.0 * PI * (doy - SPRING_PHASE_DOY) / 365.0).sin()
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn season_seed(seed: u64, today: NaiveDate) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    today.hash(&mut hasher);
    hasher.finish()
}

/// A record source backed by one generated season.
pub struct SampleSource {
    seed: u64,
    today: NaiveDate,
    season: SampleSeason,
}

impl SampleSource {
    pub fn from_config(config: &SourceConfig) -> Result<Self, AppError> {
        if config.history_days == 0 && config.forecast_days == 0 {
            return Err(AppError::config("Sample season needs at least one day."));
        }
        let today = config.sample_today.unwrap_or_else(|| Local::now().date_naive());
        let season = generate_season(config.sample_seed, today, config.history_days, config.forecast_days)?;
        Ok(Self {
            seed: config.sample_seed,
            today,
            season,
        })
    }
}

impl super::RecordSource for SampleSource {
    fn describe(&self) -> String {
        format!("sample seed={} today={}", self.seed, self.today)
    }

    fn fetch_historical(&self) -> Result<Vec<RawRecord>, AppError> {
        Ok(self.season.historical.clone())
    }

    fn fetch_forecast(&self) -> Result<Vec<RawRecord>, AppError> {
        Ok(self.season.forecast.clone())
    }
}
