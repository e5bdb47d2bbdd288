//! Ratatui-based terminal UI.
//!
//! Three stacked panels (temperature tracks, growth potential, dollar spot)
//! over one merged series. Fetches run on a worker thread; at most one is in
//! flight and its result comes back over a channel, so the UI never blocks.

use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use plotters::style::RGBColor;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::state::{SeriesCache, SeriesView, ViewStatus};
use crate::data::RecordSource;
use crate::domain::NormalizedRecord;
use crate::error::AppError;
use crate::math::{HIGH_RISK, MODERATE_RISK, OPTIMUM_GROWTH};
use crate::series::MergedSeries;

mod plotters_chart;

use plotters_chart::{ChartLine, SeriesChart};

const HIST_MAX: RGBColor = RGBColor(255, 99, 71);
const HIST_MIN: RGBColor = RGBColor(100, 149, 237);
const HIST_MEAN: RGBColor = RGBColor(60, 179, 113);
const FCST_MAX: RGBColor = RGBColor(255, 160, 122);
const FCST_MIN: RGBColor = RGBColor(135, 206, 250);
const FCST_MEAN: RGBColor = RGBColor(144, 238, 144);
const HIST_METRIC: RGBColor = RGBColor(0, 255, 255);
const FCST_METRIC: RGBColor = RGBColor(255, 0, 255);

type FetchResult = Result<MergedSeries, AppError>;

/// Start the TUI.
pub fn run(source: Arc<dyn RecordSource>) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::terminal(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(source);
    app.request_refresh();
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::terminal(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    source: Arc<dyn RecordSource>,
    cache: SeriesCache,
    tx: Sender<FetchResult>,
    rx: Receiver<FetchResult>,
    status: String,
}

impl App {
    fn new(source: Arc<dyn RecordSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            cache: SeriesCache::new(),
            tx,
            rx,
            status: String::new(),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if self.drain_results() {
                needs_redraw = true;
            }

            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::terminal(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::terminal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::terminal(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('r') => self.request_refresh(),
            _ => {}
        }
        false
    }

    fn request_refresh(&mut self) {
        if !self.cache.begin_refresh() {
            self.status = "Refresh already in progress.".to_string();
            return;
        }
        self.status = format!("Fetching from {}...", self.source.describe());

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = crate::app::pipeline::load_series(source.as_ref());
            // The receiver is gone only if the UI already exited.
            let _ = tx.send(result);
        });
    }

    /// Apply finished fetches. Returns `true` if anything changed.
    fn drain_results(&mut self) -> bool {
        let mut changed = false;
        while let Ok(result) = self.rx.try_recv() {
            self.status = match &result {
                Ok(series) => format!("Loaded {} records.", series.len()),
                Err(err) => format!("Refresh failed: {err}"),
            };
            self.cache.complete(result);
            changed = true;
        }
        changed
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        let view = self.cache.view();
        self.draw_header(frame, chunks[0], &view);
        draw_body(frame, chunks[1], &view);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect, view: &SeriesView<'_>) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("turf", Style::default().fg(Color::Cyan)),
            Span::raw(format!(" | {}", self.source.describe())),
        ]));

        let summary = crate::report::summarize(view.series);
        lines.push(Line::from(Span::styled(
            format!(
                "n={} (obs {} / fcst {}) | forecast from {} | cum GDD {} -> {}",
                summary.records,
                summary.historical,
                summary.forecast,
                summary.boundary_date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
                summary.gdd_at_boundary.map(|v| format!("{v:.1}")).unwrap_or_else(|| "-".to_string()),
                summary.gdd_at_horizon.map(|v| format!("{v:.1}")).unwrap_or_else(|| "-".to_string()),
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "r refresh  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Render exactly one of the loading / error / empty / charts states.
fn draw_body(frame: &mut ratatui::Frame<'_>, area: Rect, view: &SeriesView<'_>) {
    let message = match view.status() {
        ViewStatus::Loading => Some(("Loading weather data...".to_string(), Color::Yellow)),
        ViewStatus::Failed => Some((
            format!("{}\n\nPress r to retry.", view.error.unwrap_or("Unknown error")),
            Color::Red,
        )),
        ViewStatus::Empty => Some(("No data available.".to_string(), Color::Gray)),
        ViewStatus::Ready => None,
    };

    if let Some((text, color)) = message {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let p = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
        frame.render_widget(p, inner);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(44), Constraint::Percentage(28), Constraint::Percentage(28)])
        .split(area);

    let series = view.series;
    let dates = x_dates(series);
    let boundary = series.boundary_index().map(|i| i as f64);

    let panels = [
        Panel {
            title: "Temperature (°F)",
            lines: temperature_lines(series),
            thresholds: vec![],
            fixed_y: None,
            fmt_y: fmt_axis_temp,
        },
        Panel {
            title: "Growth Potential",
            lines: growth_lines(series),
            thresholds: vec![OPTIMUM_GROWTH],
            fixed_y: Some([0.0, 1.0]),
            fmt_y: fmt_axis_unit,
        },
        Panel {
            title: "Dollar Spot Probability",
            lines: dollar_spot_lines(series),
            thresholds: vec![MODERATE_RISK, HIGH_RISK],
            fixed_y: Some([0.0, 1.0]),
            fmt_y: fmt_axis_unit,
        },
    ];

    for (panel, rect) in panels.iter().zip(chunks.iter()) {
        let block = Block::default().title(panel.title).borders(Borders::ALL);
        let inner = block.inner(*rect);
        frame.render_widget(block, *rect);
        frame.render_widget(Clear, inner);

        let widget = SeriesChart {
            lines: &panel.lines,
            dates: &dates,
            x_bounds: x_bounds(series),
            y_bounds: panel.fixed_y.unwrap_or_else(|| y_bounds(&panel.lines)),
            boundary,
            thresholds: &panel.thresholds,
            y_label: panel.title,
            fmt_y: panel.fmt_y,
        };
        frame.render_widget(widget, inner);
    }
}

struct Panel {
    title: &'static str,
    lines: Vec<ChartLine>,
    thresholds: Vec<f64>,
    fixed_y: Option<[f64; 2]>,
    fmt_y: fn(f64) -> String,
}

/// Split one track into runs of consecutive present values.
fn track_segments(series: &MergedSeries, value: impl Fn(&NormalizedRecord) -> Option<f64>) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for (i, r) in series.iter().enumerate() {
        match value(r).filter(|v| v.is_finite()) {
            Some(y) => current.push((i as f64, y)),
            None => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

fn temperature_lines(series: &MergedSeries) -> Vec<ChartLine> {
    let line = |color: RGBColor, value: fn(&NormalizedRecord) -> Option<f64>| ChartLine {
        segments: track_segments(series, value),
        color,
    };
    vec![
        line(HIST_MAX, |r| r.track.historical().and_then(|v| v.temp_max)),
        line(HIST_MIN, |r| r.track.historical().and_then(|v| v.temp_min)),
        line(HIST_MEAN, |r| r.track.historical().and_then(|v| v.temp_mean)),
        line(FCST_MAX, |r| r.track.forecast().and_then(|v| v.temp_max)),
        line(FCST_MIN, |r| r.track.forecast().and_then(|v| v.temp_min)),
        line(FCST_MEAN, |r| r.track.forecast().and_then(|v| v.temp_mean)),
    ]
}

fn growth_lines(series: &MergedSeries) -> Vec<ChartLine> {
    vec![
        ChartLine {
            segments: track_segments(series, |r| (!r.is_forecast()).then_some(r.growth_potential)),
            color: HIST_METRIC,
        },
        ChartLine {
            segments: track_segments(series, |r| r.track.forecast().and_then(|v| v.growth_potential)),
            color: FCST_METRIC,
        },
    ]
}

fn dollar_spot_lines(series: &MergedSeries) -> Vec<ChartLine> {
    vec![
        ChartLine {
            segments: track_segments(series, |r| r.track.historical().and_then(|v| v.dollar_spot_probability)),
            color: HIST_METRIC,
        },
        ChartLine {
            segments: track_segments(series, |r| r.track.forecast().and_then(|v| v.dollar_spot_probability)),
            color: FCST_METRIC,
        },
    ]
}

fn x_dates(series: &MergedSeries) -> Vec<String> {
    series
        .iter()
        .map(|r| r.date.clone().unwrap_or_default())
        .collect()
}

fn x_bounds(series: &MergedSeries) -> [f64; 2] {
    let last = series.len().saturating_sub(1).max(1) as f64;
    [0.0, last]
}

fn y_bounds(lines: &[ChartLine]) -> [f64; 2] {
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for line in lines.iter().filter(|l| !l.is_empty()) {
        for &(_, y) in line.segments.iter().flatten() {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }
    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        y_min = 0.0;
        y_max = 1.0;
    }
    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    [y_min - pad, y_max + pad]
}

fn fmt_axis_temp(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_unit(v: f64) -> String {
    format!("{v:.1}")
}
