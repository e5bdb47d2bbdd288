//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and installs logging
//! - builds the configured record source
//! - runs the merge pipeline
//! - prints reports/plots or writes exports

use std::path::Path;

use clap::Parser;

use crate::cli::{Command, ExportArgs, PlotArgs, ShowArgs, SourceArgs, TuiArgs};
use crate::data::{RecordSource, source_from_config};
use crate::error::AppError;
use crate::logging::LogTarget;

pub mod pipeline;
pub mod state;

/// Entry point for the `turf` binary.
pub fn run() -> Result<(), AppError> {
    // Bare `turf` (or `turf --source sample`) should open the TUI. Clap needs
    // a subcommand name, so argv is rewritten before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Show(args) => handle_show(args),
        Command::Plot(args) => handle_plot(args),
        Command::Export(args) => handle_export(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn build_source(args: &SourceArgs) -> Result<std::sync::Arc<dyn RecordSource>, AppError> {
    source_from_config(&args.to_config())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    crate::logging::init(LogTarget::Stderr)?;
    let source = build_source(&args.source)?;
    let series = pipeline::load_series(source.as_ref())?;

    let summary = crate::report::summarize(&series);
    println!("{}", crate::report::format_summary(&summary, &source.describe()));

    if !args.no_table {
        println!("{}", crate::report::format_series_table(&series));
    }
    if !args.no_plot {
        println!("{}", crate::plot::render_temperature_plot(&series, args.width, args.height));
    }
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    crate::logging::init(LogTarget::Stderr)?;
    let source = build_source(&args.source)?;
    let series = pipeline::load_series(source.as_ref())?;
    println!("{}", crate::plot::render_temperature_plot(&series, args.width, args.height));
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    crate::logging::init(LogTarget::Stderr)?;
    if args.csv.is_none() && args.json.is_none() && args.raw_dir.is_none() {
        return Err(AppError::config(
            "Nothing to export. Pass --csv <FILE>, --json <FILE>, or --raw-dir <DIR>.",
        ));
    }

    let source = build_source(&args.source)?;
    let out = pipeline::run_pipeline(source.as_ref())?;

    if let Some(path) = &args.csv {
        crate::io::write_series_csv(path, &out.series)?;
    }
    if let Some(path) = &args.json {
        crate::io::write_series_json(path, &out.series)?;
    }
    if let Some(dir) = &args.raw_dir {
        write_raw_dir(dir, &out)?;
    }
    Ok(())
}

fn write_raw_dir(dir: &Path, out: &pipeline::PipelineOutput) -> Result<(), AppError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| AppError::io(format!("Failed to create directory '{}': {e}", dir.display())))?;
    crate::io::write_raw_records(&dir.join("historical.json"), &out.historical)?;
    crate::io::write_raw_records(&dir.join("forecast.json"), &out.forecast)?;
    tracing::info!(dir = %dir.display(), "wrote raw snapshots");
    Ok(())
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    crate::logging::init(LogTarget::File(args.log_file.clone()))?;
    let source = build_source(&args.source)?;
    crate::tui::run(source)
}

/// Rewrite argv so `turf` defaults to `turf tui`.
///
/// Rules:
/// - `turf`                       -> `turf tui`
/// - `turf --source sample ...`   -> `turf tui --source sample ...`
/// - `turf --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "show" | "plot" | "export" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}
