//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements (x = position in the merged series, y = °F):
//! - historical mean: `-` line, forecast mean: `~` line
//! - daily max/min: `o` observed, `+` forecast
//! - forecast start: `|` column
//!
//! Missing values break a line instead of being bridged.

use crate::domain::{NormalizedRecord, Origin};
use crate::series::MergedSeries;

/// Render the temperature tracks of a merged series.
pub fn render_temperature_plot(series: &MergedSeries, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    if series.is_empty() {
        return "Plot: no data\n".to_string();
    }
    let (first, last) = match series.date_span() {
        Some((a, b)) => (a.to_string(), b.to_string()),
        None => ("-".to_string(), "-".to_string()),
    };

    let x_max = (series.len().saturating_sub(1)).max(1) as f64;
    let (y_min, y_max) = temp_range(series).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Lines first, so markers can overlay them.
    for (origin, ch) in [(Origin::Historical, '-'), (Origin::Forecast, '~')] {
        for segment in mean_segments(series, origin) {
            draw_polyline(&mut grid, &segment, x_max, y_min, y_max, ch);
        }
    }

    if let Some(b) = series.boundary_index() {
        let col = map_x(b as f64, x_max, width);
        for row in grid.iter_mut() {
            if row[col] == ' ' {
                row[col] = '|';
            }
        }
    }

    for (i, r) in series.iter().enumerate() {
        let v = r.track.value();
        let marker = if r.is_forecast() { '+' } else { 'o' };
        for y in [v.temp_max, v.temp_min].into_iter().flatten() {
            let col = map_x(i as f64, x_max, width);
            let row = map_y(y, y_min, y_max, height);
            grid[row][col] = marker;
        }
    }

    let boundary = series
        .boundary_date()
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {first}..{last} | temp=[{y_min:.2}, {y_max:.2}]F | forecast from {boundary}\n"
    ));
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
    out
}

/// Runs of consecutive records on one track that have a mean temperature.
fn mean_segments(series: &MergedSeries, origin: Origin) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    for (i, r) in series.iter().enumerate() {
        match track_mean(r, origin) {
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

fn track_mean(r: &NormalizedRecord, origin: Origin) -> Option<f64> {
    match origin {
        Origin::Historical => r.track.historical().and_then(|v| v.temp_mean),
        Origin::Forecast => r.track.forecast().and_then(|v| v.temp_mean),
    }
}

fn temp_range(series: &MergedSeries) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for r in series {
        let v = r.track.value();
        for y in [v.temp_max, v.temp_min, v.temp_mean].into_iter().flatten() {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }
    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = (x / x_max).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_polyline(grid: &mut [Vec<char>], points: &[(f64, f64)], x_max: f64, y_min: f64, y_max: f64, ch: char) {
    let height = grid.len();
    let width = grid[0].len();
    let cells: Vec<(usize, usize)> = points
        .iter()
        .map(|&(x, y)| (map_x(x, x_max, width), map_y(y, y_min, y_max, height)))
        .collect();

    if let [(x, y)] = cells.as_slice() {
        grid[*y][*x] = ch;
        return;
    }
    for pair in cells.windows(2) {
        draw_line(grid, pair[0].0, pair[0].1, pair[1].0, pair[1].1, ch);
    }
}

/// Mark blank cells along a line with `ch`.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    for_each_line_cell(x0, y0, x1, y1, |x, y| {
        if let Some(cell) = grid.get_mut(y).and_then(|row| row.get_mut(x)) {
            if *cell == ' ' {
                *cell = ch;
            }
        }
    });
}

/// Integer line walk (Bresenham-ish).
fn for_each_line_cell(x0: usize, y0: usize, x1: usize, y1: usize, mut f: impl FnMut(usize, usize)) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if x0 >= 0 && y0 >= 0 {
            f(x0 as usize, y0 as usize);
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawRecord;
    use crate::series::build_series;

    fn raw(date: &str, max: f64, min: f64) -> RawRecord {
        RawRecord {
            date: Some(date.to_string()),
            temp_max: Some(max),
            temp_min: Some(min),
            ..RawRecord::default()
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let series = build_series(
            &[raw("2024-05-01", 20.0, 10.0), raw("2024-05-02", 22.0, 12.0)],
            &[raw("2024-05-03", 24.0, 14.0), raw("2024-05-04", 26.0, 16.0)],
        );

        let txt = render_temperature_plot(&series, 10, 5);
        let expected = concat!(
            "Plot: 2024-05-01..2024-05-04 | temp=[48.56, 80.24]F | forecast from 2024-05-03\n",
            "      |  +\n",
            "   o  + ~~\n",
            "o --  ~~ +\n",
            "-- o  +\n",
            "o     |\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_series_renders_placeholder() {
        assert_eq!(render_temperature_plot(&MergedSeries::empty(), 40, 10), "Plot: no data\n");
    }

    #[test]
    fn missing_day_breaks_the_line() {
        let mut gap = raw("2024-05-02", 0.0, 0.0);
        gap.temp_max = None;
        gap.temp_min = None;
        let series = build_series(
            &[raw("2024-05-01", 20.0, 10.0), gap, raw("2024-05-03", 20.0, 10.0)],
            &[],
        );
        let segments = mean_segments(&series, Origin::Historical);
        assert_eq!(segments.len(), 2);
        assert!(mean_segments(&series, Origin::Forecast).is_empty());
    }
}
