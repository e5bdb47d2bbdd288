//! Turf weather API client.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::domain::{RawRecord, SourceConfig};
use crate::error::AppError;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DAILY_PATH: &str = "/api/daily";
const FORECAST_PATH: &str = "/api/daily-forecast";

pub struct TurfApiClient {
    client: Client,
    base_url: String,
}

impl TurfApiClient {
    /// Build a client from flags, falling back to `TURF_API_URL` and
    /// `TURF_API_TIMEOUT_SECS` (a `.env` file is honoured).
    pub fn from_config(config: &SourceConfig) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let base_url = match &config.api_url {
            Some(url) => url.clone(),
            None => std::env::var("TURF_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        };

        let timeout_secs = match config.timeout_secs {
            Some(secs) => secs,
            None => match std::env::var("TURF_API_TIMEOUT_SECS") {
                Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                    AppError::config(format!("Invalid TURF_API_TIMEOUT_SECS '{raw}'."))
                })?,
                Err(_) => DEFAULT_TIMEOUT_SECS,
            },
        };

        Self::new(&base_url, Duration::from_secs(timeout_secs))
    }

    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AppError::config(format!(
                "API base URL must start with http:// or https:// (got '{base_url}')."
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn fetch_records(&self, path: &str, what: &str) -> Result<Vec<RawRecord>, AppError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "requesting {what}");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| AppError::transport(format!("Failed to fetch {what}: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::transport(format!(
                "Failed to fetch {what}: status {}.",
                resp.status()
            )));
        }

        let records: Vec<RawRecord> = resp
            .json()
            .map_err(|e| AppError::parse(format!("Failed to parse {what}: {e}")))?;

        tracing::info!(count = records.len(), "fetched {what}");
        Ok(records)
    }
}

impl super::RecordSource for TurfApiClient {
    fn describe(&self) -> String {
        format!("api {}", self.base_url)
    }

    fn fetch_historical(&self) -> Result<Vec<RawRecord>, AppError> {
        self.fetch_records(DAILY_PATH, "daily weather data")
    }

    fn fetch_forecast(&self) -> Result<Vec<RawRecord>, AppError> {
        self.fetch_records(FORECAST_PATH, "forecast data")
    }
}
