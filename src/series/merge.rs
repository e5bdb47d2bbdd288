//! Chronological merge of the two normalized sets.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::domain::{NormalizedRecord, SeriesRow};

/// A merged, date-ordered series.
///
/// Records are sorted ascending by date with a stable sort, so same-day
/// records keep their concatenation order (historical before forecast).
/// Records without a usable date come last. The series is read-only once
/// built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedSeries {
    records: Vec<NormalizedRecord>,
}

/// Concatenate historical then forecast records and sort by date.
///
/// No deduplication: a date present in both sets appears twice.
pub fn merge(historical: Vec<NormalizedRecord>, forecast: Vec<NormalizedRecord>) -> MergedSeries {
    let mut records = historical;
    records.extend(forecast);
    records.sort_by(|a, b| cmp_day(a.day, b.day));
    MergedSeries { records }
}

fn cmp_day(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl MergedSeries {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[NormalizedRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NormalizedRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn historical_count(&self) -> usize {
        self.records.iter().filter(|r| !r.is_forecast()).count()
    }

    pub fn forecast_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_forecast()).count()
    }

    /// Index of the first forecast record, derived from the origin flag.
    pub fn boundary_index(&self) -> Option<usize> {
        self.records.iter().position(|r| r.is_forecast())
    }

    /// Date at which the series turns from observed to predicted.
    pub fn boundary_date(&self) -> Option<NaiveDate> {
        self.boundary_index().and_then(|i| self.records[i].day)
    }

    /// First and last parsed dates.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.iter().find_map(|r| r.day)?;
        let last = self.records.iter().rev().find_map(|r| r.day)?;
        Some((first, last))
    }

    /// Records in their external dual-slot shape.
    pub fn rows(&self) -> Vec<SeriesRow> {
        self.records.iter().map(SeriesRow::from).collect()
    }
}

impl<'a> IntoIterator for &'a MergedSeries {
    type Item = &'a NormalizedRecord;
    type IntoIter = std::slice::Iter<'a, NormalizedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
