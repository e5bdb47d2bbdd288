//! Command-line parsing for the turf weather series tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! pipeline and presentation code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::{SourceConfig, SourceKind};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "turf", version, about = "Turf weather series: observed + forecast, merged")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch, merge, and print a summary plus the series table.
    Show(ShowArgs),
    /// Print only the ASCII temperature plot.
    Plot(PlotArgs),
    /// Write the merged series (and optionally the raw sets) to disk.
    Export(ExportArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same pipeline as `turf show` and refreshes in the
    /// background.
    Tui(TuiArgs),
}

/// Where records come from. Shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// Record source.
    #[arg(long, value_enum, default_value_t = SourceKind::Api)]
    pub source: SourceKind,

    /// API base URL (overrides TURF_API_URL).
    #[arg(long)]
    pub api_url: Option<String>,

    /// HTTP timeout in seconds (overrides TURF_API_TIMEOUT_SECS).
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Historical snapshot JSON (for `--source file`).
    #[arg(long, value_name = "JSON")]
    pub historical: Option<PathBuf>,

    /// Forecast snapshot JSON (for `--source file`).
    #[arg(long, value_name = "JSON")]
    pub forecast: Option<PathBuf>,

    /// Random seed for `--source sample`.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Observed days generated by `--source sample`.
    #[arg(long, default_value_t = 30)]
    pub days: usize,

    /// Forecast days generated by `--source sample`.
    #[arg(long, default_value_t = 7)]
    pub forecast_days: usize,

    /// Fix "today" for `--source sample` (YYYY-MM-DD).
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

impl SourceArgs {
    pub fn to_config(&self) -> SourceConfig {
        SourceConfig {
            kind: self.source,
            api_url: self.api_url.clone(),
            timeout_secs: self.timeout,
            historical_path: self.historical.clone(),
            forecast_path: self.forecast.clone(),
            sample_seed: self.seed,
            history_days: self.days,
            forecast_days: self.forecast_days,
            sample_today: self.today,
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Skip the series table.
    #[arg(long)]
    pub no_table: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Write the merged series as CSV.
    #[arg(long, value_name = "CSV")]
    pub csv: Option<PathBuf>,

    /// Write the merged series as JSON.
    #[arg(long, value_name = "JSON")]
    pub json: Option<PathBuf>,

    /// Write `historical.json` and `forecast.json` raw snapshots here.
    #[arg(long, value_name = "DIR")]
    pub raw_dir: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Log file for the TUI session.
    #[arg(long, default_value = "turf.log")]
    pub log_file: PathBuf,
}
