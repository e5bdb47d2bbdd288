//! Formatted terminal output.
//!
//! We keep formatting code in one place so output changes are localized and
//! snapshot-testable.

use crate::report::SeriesSummary;
use crate::series::MergedSeries;

/// Format the run summary (source, span, boundary, GDD totals, risk).
pub fn format_summary(summary: &SeriesSummary, source: &str) -> String {
    let mut out = String::new();

    out.push_str("=== turf - observed + forecast series ===\n");
    out.push_str(&format!("Source: {source}\n"));
    out.push_str(&format!(
        "Records: n={} | historical={} | forecast={}\n",
        summary.records, summary.historical, summary.forecast
    ));
    out.push_str(&format!(
        "Span: {} .. {}\n",
        fmt_date(summary.first_date),
        fmt_date(summary.last_date)
    ));
    out.push_str(&format!("Forecast start: {}\n", fmt_date(summary.boundary_date)));
    out.push_str(&format!(
        "Cumulative GDD: {} at boundary | {} at horizon\n",
        fmt_opt(summary.gdd_at_boundary, 2),
        fmt_opt(summary.gdd_at_horizon, 2)
    ));

    match &summary.peak_risk {
        Some(peak) => out.push_str(&format!(
            "Peak dollar spot: {:.2} ({}) on {} [{}]\n",
            peak.probability,
            peak.level.label(),
            peak.date.as_deref().unwrap_or("-"),
            if peak.forecast { "forecast" } else { "historical" },
        )),
        None => out.push_str("Peak dollar spot: -\n"),
    }
    out.push_str(&format!("Optimum growth days (forecast): {}\n", summary.optimum_growth_days));

    out
}

/// Format the merged series as a fixed-width table.
///
/// Temperatures are the Fahrenheit track values; the `src` column shows which
/// track a row belongs to.
pub fn format_series_table(series: &MergedSeries) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<12} {:<4} {:>8} {:>8} {:>8} {:>7} {:>9} {:>7} {:>7}\n",
            "date", "src", "max_f", "min_f", "mean_f", "gdd", "cum_gdd", "growth", "dspot"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<12} {:-<4} {:-<8} {:-<8} {:-<8} {:-<7} {:-<9} {:-<7} {:-<7}\n",
            "", "", "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for r in series {
        let v = r.track.value();
        let growth = if r.is_forecast() { v.growth_potential } else { Some(r.growth_potential) };
        out.push_str(
            format!(
                "{:<12} {:<4} {:>8} {:>8} {:>8} {:>7.2} {:>9.2} {:>7} {:>7}\n",
                truncate(r.date.as_deref().unwrap_or("-"), 12),
                if r.is_forecast() { "fcst" } else { "obs" },
                fmt_opt(v.temp_max, 2),
                fmt_opt(v.temp_min, 2),
                fmt_opt(v.temp_mean, 2),
                r.gdd,
                r.cumulative_gdd,
                fmt_opt(growth, 2),
                fmt_opt(v.dollar_spot_probability, 2),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn fmt_opt(v: Option<f64>, decimals: usize) -> String {
    match v {
        Some(x) => format!("{x:.decimals$}"),
        None => "-".to_string(),
    }
}

fn fmt_date(d: Option<chrono::NaiveDate>) -> String {
    d.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawRecord;
    use crate::report::summarize;
    use crate::series::build_series;

    fn series() -> MergedSeries {
        let historical = RawRecord {
            date: Some("2024-05-01".to_string()),
            temp_max: Some(20.0),
            temp_min: Some(10.0),
            cumulative_gdd: Some(5.0),
            growth_potential: Some(0.44),
            ..RawRecord::default()
        };
        let forecast = RawRecord {
            date: Some("2024-05-02".to_string()),
            temp_max: Some(22.0),
            temp_min: Some(12.0),
            forecast_gdd: Some(3.0),
            forecast_dollar_spot_probability: Some(0.31),
            ..RawRecord::default()
        };
        build_series(&[historical], &[forecast])
    }

    #[test]
    fn table_golden_snapshot() {
        let txt = format_series_table(&series());
        let expected = concat!(
            "date         src     max_f    min_f   mean_f     gdd   cum_gdd  growth   dspot\n",
            "------------ ---- -------- -------- -------- ------- --------- ------- -------\n",
            "2024-05-01   obs     68.00    50.00    59.00    0.00      5.00    0.44       -\n",
            "2024-05-02   fcst    71.60    53.60    62.60    3.00      8.00       -    0.31\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn summary_mentions_boundary_and_risk() {
        let txt = format_summary(&summarize(&series()), "sample seed=1");
        assert!(txt.contains("Source: sample seed=1\n"));
        assert!(txt.contains("Forecast start: 2024-05-02\n"));
        assert!(txt.contains("Cumulative GDD: 5.00 at boundary | 8.00 at horizon\n"));
        assert!(txt.contains("Peak dollar spot: 0.31 (moderate) on 2024-05-02 [forecast]\n"));
    }

    #[test]
    fn truncate_marks_cut_strings() {
        assert_eq!(truncate("2024-05-01T00:00:00", 12), "2024-05-01T.");
        assert_eq!(truncate("short", 12), "short");
    }
}
