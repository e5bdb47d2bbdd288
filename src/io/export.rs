//! Export the merged series to CSV or JSON.
//!
//! Both formats use the flat dual-slot row shape, so a spreadsheet or a chart
//! script can split historical and forecast tracks by column.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::SeriesRow;
use crate::error::AppError;
use crate::series::MergedSeries;

const CSV_HEADER: &str = "date,isForecast,temp_min,temp_max,temp_mean,gdd,forecast_gdd,cumulative_gdd,\
historical_temp_max,historical_temp_min,historical_temp_mean,\
forecast_temp_max,forecast_temp_min,forecast_temp_mean,\
growth_potential,forecast_growth_potential,dollar_spot_probability,forecast_dollar_spot_probability";

/// Write the merged series as CSV. Absent values are empty cells.
pub fn write_series_csv(path: &Path, series: &MergedSeries) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "{CSV_HEADER}")
        .map_err(|e| AppError::io(format!("Failed to write export CSV header: {e}")))?;

    for row in series.rows() {
        writeln!(out, "{}", csv_line(&row))
            .map_err(|e| AppError::io(format!("Failed to write export CSV row: {e}")))?;
    }

    out.flush()
        .map_err(|e| AppError::io(format!("Failed to flush export CSV '{}': {e}", path.display())))?;
    tracing::info!(path = %path.display(), rows = series.len(), "wrote series CSV");
    Ok(())
}

/// Write the merged series as a JSON array; every key is present on every row.
pub fn write_series_json(path: &Path, series: &MergedSeries) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create export JSON '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, &series.rows())
        .map_err(|e| AppError::io(format!("Failed to write export JSON '{}': {e}", path.display())))?;
    out.flush()
        .map_err(|e| AppError::io(format!("Failed to flush export JSON '{}': {e}", path.display())))?;
    tracing::info!(path = %path.display(), rows = series.len(), "wrote series JSON");
    Ok(())
}

fn csv_line(row: &SeriesRow) -> String {
    let cells = [
        row.date.as_deref().map(csv_escape).unwrap_or_default(),
        row.is_forecast.to_string(),
        cell(row.temp_min),
        cell(row.temp_max),
        cell(row.temp_mean),
        row.gdd.to_string(),
        cell(row.forecast_gdd),
        row.cumulative_gdd.to_string(),
        cell(row.historical_temp_max),
        cell(row.historical_temp_min),
        cell(row.historical_temp_mean),
        cell(row.forecast_temp_max),
        cell(row.forecast_temp_min),
        cell(row.forecast_temp_mean),
        row.growth_potential.to_string(),
        cell(row.forecast_growth_potential),
        cell(row.dollar_spot_probability),
        cell(row.forecast_dollar_spot_probability),
    ];
    cells.join(",")
}

fn cell(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

fn csv_escape(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawRecord;
    use crate::series::build_series;

    fn series() -> MergedSeries {
        let historical = RawRecord {
            date: Some("2024-05-01".to_string()),
            temp_max: Some(20.0),
            temp_min: Some(10.0),
            cumulative_gdd: Some(5.0),
            ..RawRecord::default()
        };
        let forecast = RawRecord {
            date: Some("2024-05-02".to_string()),
            temp_max: Some(22.0),
            temp_min: Some(12.0),
            forecast_gdd: Some(3.0),
            ..RawRecord::default()
        };
        build_series(&[historical], &[forecast])
    }

    #[test]
    fn csv_has_header_and_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");
        write_series_csv(&path, &series()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[0].split(',').count(), lines[1].split(',').count());
        assert!(lines[1].starts_with("2024-05-01,false,10,20,59,0,,5,68,50,59,,,,"));
        assert!(lines[2].starts_with("2024-05-02,true,12,22,62.6,3,3,8,,,,71.6,53.6,62.6,"));
    }

    #[test]
    fn json_rows_keep_null_slots() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.json");
        write_series_json(&path, &series()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let rows: Vec<serde_json::Value> = serde_json::from_str(&text).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0]["forecast_temp_max"].is_null());
        assert_eq!(rows[1]["isForecast"], serde_json::Value::Bool(true));
        assert_eq!(rows[1]["cumulative_gdd"], serde_json::json!(8.0));
    }

    #[test]
    fn dates_with_commas_are_quoted() {
        assert_eq!(csv_escape("May 1, 2024"), "\"May 1, 2024\"");
        assert_eq!(csv_escape("2024-05-01"), "2024-05-01");
    }
}
