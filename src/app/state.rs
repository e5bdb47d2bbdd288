//! Owned presentation state for front-ends that refresh in the background.
//!
//! A [`SeriesCache`] holds the last good series, whether a fetch is in
//! flight, and the last error. Renderers read a [`SeriesView`] snapshot and
//! pick exactly one display state from it via [`SeriesView::status`].

use crate::error::AppError;
use crate::series::MergedSeries;

/// Which of the mutually exclusive display states applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    Loading,
    Failed,
    Empty,
    Ready,
}

/// Read-only snapshot handed to renderers.
#[derive(Debug, Clone, Copy)]
pub struct SeriesView<'a> {
    pub series: &'a MergedSeries,
    pub loading: bool,
    pub error: Option<&'a str>,
}

impl SeriesView<'_> {
    /// Loading wins over an error, and an error wins over stale data.
    pub fn status(&self) -> ViewStatus {
        if self.loading {
            ViewStatus::Loading
        } else if self.error.is_some() {
            ViewStatus::Failed
        } else if self.series.is_empty() {
            ViewStatus::Empty
        } else {
            ViewStatus::Ready
        }
    }
}

#[derive(Debug, Default)]
pub struct SeriesCache {
    series: MergedSeries,
    loading: bool,
    error: Option<String>,
    loads: u64,
}

impl SeriesCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a fetch as started. Returns `false` if one is already in flight.
    pub fn begin_refresh(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    /// Record the outcome of the in-flight fetch.
    ///
    /// On failure the previous series is kept; the next successful load
    /// clears the error.
    pub fn complete(&mut self, result: Result<MergedSeries, AppError>) {
        self.loading = false;
        match result {
            Ok(series) => {
                self.series = series;
                self.error = None;
                self.loads += 1;
            }
            Err(err) => {
                tracing::warn!(error = %err, "refresh failed; keeping previous series");
                self.error = Some(err.message().to_string());
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Number of successful loads so far.
    pub fn loads(&self) -> u64 {
        self.loads
    }

    pub fn view(&self) -> SeriesView<'_> {
        SeriesView {
            series: &self.series,
            loading: self.loading,
            error: self.error.as_deref(),
        }
    }
}
