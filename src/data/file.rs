//! Snapshot-file record source.

use std::path::PathBuf;

use crate::domain::{RawRecord, SourceConfig};
use crate::error::AppError;
use crate::io::read_raw_records;

pub struct FileSource {
    historical: PathBuf,
    forecast: PathBuf,
}

impl FileSource {
    pub fn new(historical: PathBuf, forecast: PathBuf) -> Self {
        Self { historical, forecast }
    }

    pub fn from_config(config: &SourceConfig) -> Result<Self, AppError> {
        let historical = config
            .historical_path
            .clone()
            .ok_or_else(|| AppError::config("--source file needs --historical <JSON>."))?;
        let forecast = config
            .forecast_path
            .clone()
            .ok_or_else(|| AppError::config("--source file needs --forecast <JSON>."))?;
        Ok(Self::new(historical, forecast))
    }
}

impl super::RecordSource for FileSource {
    fn describe(&self) -> String {
        format!("file {} + {}", self.historical.display(), self.forecast.display())
    }

    fn fetch_historical(&self) -> Result<Vec<RawRecord>, AppError> {
        read_raw_records(&self.historical)
    }

    fn fetch_forecast(&self) -> Result<Vec<RawRecord>, AppError> {
        read_raw_records(&self.forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RecordSource;

    #[test]
    fn reads_each_set_from_its_own_file() {
        let dir = tempfile::tempdir().unwrap();
        let h = dir.path().join("daily.json");
        let f = dir.path().join("forecast.json");
        std::fs::write(&h, r#"[{"date":"2024-05-01","cumulative_gdd":5}]"#).unwrap();
        std::fs::write(&f, r#"[{"date":"2024-05-02","forecast_gdd":3},{"date":"2024-05-03"}]"#).unwrap();

        let source = FileSource::new(h, f);
        assert_eq!(source.fetch_historical().unwrap().len(), 1);
        assert_eq!(source.fetch_forecast().unwrap().len(), 2);
    }
}
