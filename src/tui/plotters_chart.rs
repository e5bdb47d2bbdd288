//! Plotters-powered series chart widget for Ratatui.
//!
//! One widget type draws every panel (temperatures, growth potential, dollar
//! spot). Track lines arrive pre-split into segments, so a missing day shows
//! as a gap rather than a bridged line.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// One named line, possibly broken into several segments.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLine {
    pub segments: Vec<Vec<(f64, f64)>>,
    pub color: RGBColor,
}

impl ChartLine {
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.is_empty())
    }
}

/// A render-only chart description; all data prep happens before `render`.
pub struct SeriesChart<'a> {
    pub lines: &'a [ChartLine],
    /// Date label per x position.
    pub dates: &'a [String],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    /// X position of the first forecast record.
    pub boundary: Option<f64>,
    /// Horizontal reference lines (e.g. risk thresholds).
    pub thresholds: &'a [f64],
    pub y_label: &'a str,
    pub fmt_y: fn(f64) -> String,
}

impl SeriesChart<'_> {
    fn date_label(&self, x: f64) -> String {
        if x < 0.0 {
            return String::new();
        }
        self.dates
            .get(x.round() as usize)
            .map(|d| d.get(5..).unwrap_or(d).to_string())
            .unwrap_or_default()
    }
}

impl Widget for SeriesChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to lay out a chart in a tiny area; show a hint instead.
        if area.width < 20 || area.height < 6 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 2)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .y_desc(self.y_label)
                .x_labels(6)
                .y_labels(4)
                .x_label_formatter(&|v| self.date_label(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let reference = RGBColor(128, 128, 128);
            for &t in self.thresholds {
                chart.draw_series(LineSeries::new([(x0, t), (x1, t)], &reference))?;
            }
            if let Some(b) = self.boundary {
                chart.draw_series(LineSeries::new([(b, y0), (b, y1)], &YELLOW))?;
            }

            for line in self.lines {
                for segment in &line.segments {
                    if segment.len() == 1 {
                        chart.draw_series(segment.iter().map(|&p| Pixel::new(p, line.color)))?;
                    } else {
                        chart.draw_series(LineSeries::new(segment.iter().copied(), &line.color))?;
                    }
                }
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
