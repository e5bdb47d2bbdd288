//! Data acquisition.
//!
//! The pipeline only sees the [`RecordSource`] trait: two calls, one per
//! record set, each returning the full set or an error. Implementations:
//!
//! - `api`: the turf weather HTTP API (`/api/daily`, `/api/daily-forecast`)
//! - `file`: two JSON snapshot files on disk
//! - `sample`: a seeded synthetic season, no network

use std::sync::Arc;

use crate::domain::{RawRecord, SourceConfig, SourceKind};
use crate::error::AppError;

pub mod api;
pub mod file;
pub mod sample;

pub use api::TurfApiClient;
pub use file::FileSource;
pub use sample::{SampleSeason, SampleSource, generate_season};

/// Supplies raw historical and forecast record sets.
///
/// Both calls fail on a non-success transport outcome; neither returns a
/// partial set.
pub trait RecordSource: Send + Sync {
    /// Short description for status lines and logs.
    fn describe(&self) -> String;

    fn fetch_historical(&self) -> Result<Vec<RawRecord>, AppError>;

    fn fetch_forecast(&self) -> Result<Vec<RawRecord>, AppError>;
}

/// Build the configured source.
pub fn source_from_config(config: &SourceConfig) -> Result<Arc<dyn RecordSource>, AppError> {
    let source: Arc<dyn RecordSource> = match config.kind {
        SourceKind::Api => Arc::new(TurfApiClient::from_config(config)?),
        SourceKind::File => Arc::new(FileSource::from_config(config)?),
        SourceKind::Sample => Arc::new(SampleSource::from_config(config)?),
    };
    tracing::info!(source = %source.describe(), "record source ready");
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn file_source_requires_both_paths() {
        let config = SourceConfig {
            kind: SourceKind::File,
            ..SourceConfig::default()
        };
        let err = source_from_config(&config).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn sample_source_builds_without_network() {
        let config = SourceConfig {
            kind: SourceKind::Sample,
            ..SourceConfig::default()
        };
        let source = source_from_config(&config).unwrap();
        assert!(source.describe().starts_with("sample"));
        assert_eq!(source.fetch_forecast().unwrap().len(), 7);
    }
}
