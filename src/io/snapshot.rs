//! Read/write raw record snapshot files.
//!
//! A snapshot is a JSON array of raw records exactly as the API returns them,
//! so a fetched pair can be replayed later with `--source file`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::domain::RawRecord;
use crate::error::AppError;

/// Read a raw record snapshot.
pub fn read_raw_records(path: &Path) -> Result<Vec<RawRecord>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open snapshot '{}': {e}", path.display())))?;
    let records: Vec<RawRecord> = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::parse(format!("Invalid snapshot '{}': {e}", path.display())))?;
    Ok(records)
}

/// Write a raw record snapshot.
pub fn write_raw_records(path: &Path, records: &[RawRecord]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create snapshot '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, records)
        .map_err(|e| AppError::io(format!("Failed to write snapshot '{}': {e}", path.display())))?;
    out.flush()
        .map_err(|e| AppError::io(format!("Failed to flush snapshot '{}': {e}", path.display())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn snapshot_survives_a_write_read_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daily.json");
        let records = vec![RawRecord {
            date: Some("2024-05-01".to_string()),
            temp_max: Some(20.0),
            temp_min: None,
            cumulative_gdd: Some(5.0),
            ..RawRecord::default()
        }];
        write_raw_records(&path, &records).unwrap();
        assert_eq!(read_raw_records(&path).unwrap(), records);
    }

    #[test]
    fn missing_and_invalid_files_are_classified() {
        let dir = tempfile::tempdir().unwrap();
        let missing = read_raw_records(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::Io);

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{not json").unwrap();
        assert_eq!(read_raw_records(&bad).unwrap_err().kind(), ErrorKind::Parse);
    }

    #[cfg(unix)]
    #[test]
    fn write_to_full_device_is_an_io_error() {
        let err = write_raw_records(Path::new("/dev/full"), &[RawRecord::default()]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
