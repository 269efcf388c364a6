//! The comparator: renders the two timing logs into one scaling chart.
//!
//! This is a thin visualization collaborator, not part of the benchmark's
//! core contract. Until both execution models have produced at least one
//! record, comparison is a no-op rather than an error.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::timing_log::{self, TimingRecord};

/// Fixed path of the rendered comparison chart, relative to the working
/// directory.
pub const CHART_PATH: &str = "comparison.svg";

/// Whether the comparator produced a chart.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChartOutcome {
    /// Both logs were present and non-empty; the chart was written.
    Rendered,

    /// At least one log was missing or empty; nothing was written. This is
    /// the expected state until both models have been run at least once.
    MissingInput,
}

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 500.0;
const MARGIN: f64 = 60.0;

/// Renders the scaling comparison chart from the two timing logs.
///
/// Worker count on the x-axis, elapsed seconds on the y-axis, one polyline
/// series per execution model. If either log is missing or empty this is a
/// no-op, not an error.
///
/// # Errors
///
/// Returns [`Error::MalformedRecord`][crate::Error::MalformedRecord] if a
/// log exists but contains an unparseable line, and
/// [`Error::Io`][crate::Error::Io] if the chart cannot be written.
pub fn render_comparison(
    message_passing_log: &Path,
    pooled_log: &Path,
    output: &Path,
) -> crate::Result<ChartOutcome> {
    if !message_passing_log.exists() || !pooled_log.exists() {
        return Ok(ChartOutcome::MissingInput);
    }

    let message_passing = timing_log::load(message_passing_log)?;
    let pooled = timing_log::load(pooled_log)?;

    if message_passing.is_empty() || pooled.is_empty() {
        return Ok(ChartOutcome::MissingInput);
    }

    let svg = render_svg(&[
        ("Pooled", "#1f77b4", &pooled[..]),
        ("Message passing", "#d62728", &message_passing[..]),
    ]);

    fs::write(output, svg)?;

    Ok(ChartOutcome::Rendered)
}

fn render_svg(series: &[(&str, &str, &[TimingRecord])]) -> String {
    let all_records = series.iter().flat_map(|(_, _, records)| records.iter());

    let min_workers = all_records
        .clone()
        .map(|record| record.workers)
        .min()
        .expect("caller guarantees non-empty series");
    let max_workers = all_records
        .clone()
        .map(|record| record.workers)
        .max()
        .expect("caller guarantees non-empty series");
    let max_elapsed = all_records
        .map(|record| record.elapsed.as_secs_f64())
        .fold(0.0_f64, f64::max);

    // Degenerate spans (one point, or all-zero timings) still need a finite
    // coordinate mapping.
    let worker_span = (max_workers - min_workers).max(1) as f64;
    let elapsed_span = if max_elapsed > 0.0 { max_elapsed } else { 1.0 };

    let x = |workers: usize| {
        MARGIN + (workers - min_workers) as f64 / worker_span * (WIDTH - 2.0 * MARGIN)
    };
    let y = |elapsed: f64| HEIGHT - MARGIN - elapsed / elapsed_span * (HEIGHT - 2.0 * MARGIN);

    let mut svg = String::new();

    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
    );
    let _ = writeln!(svg, r#"<rect width="{WIDTH}" height="{HEIGHT}" fill="white"/>"#);

    // Axes.
    let _ = writeln!(
        svg,
        r#"<line x1="{MARGIN}" y1="{y0}" x2="{x1}" y2="{y0}" stroke="black"/>"#,
        y0 = HEIGHT - MARGIN,
        x1 = WIDTH - MARGIN,
    );
    let _ = writeln!(
        svg,
        r#"<line x1="{MARGIN}" y1="{MARGIN}" x2="{MARGIN}" y2="{y0}" stroke="black"/>"#,
        y0 = HEIGHT - MARGIN,
    );
    let _ = writeln!(
        svg,
        r#"<text x="{cx}" y="{cy}" text-anchor="middle" font-size="16">Number of workers</text>"#,
        cx = WIDTH / 2.0,
        cy = HEIGHT - MARGIN / 4.0,
    );
    let _ = writeln!(
        svg,
        r#"<text x="{cx}" y="{cy}" text-anchor="middle" font-size="16" transform="rotate(-90 {cx} {cy})">Runtime (s)</text>"#,
        cx = MARGIN / 4.0,
        cy = HEIGHT / 2.0,
    );

    // Axis extent labels.
    let _ = writeln!(
        svg,
        r#"<text x="{MARGIN}" y="{cy}" text-anchor="middle" font-size="12">{min_workers}</text>"#,
        cy = HEIGHT - MARGIN + 20.0,
    );
    let _ = writeln!(
        svg,
        r#"<text x="{cx}" y="{cy}" text-anchor="middle" font-size="12">{max_workers}</text>"#,
        cx = WIDTH - MARGIN,
        cy = HEIGHT - MARGIN + 20.0,
    );
    let _ = writeln!(
        svg,
        r#"<text x="{cx}" y="{MARGIN}" text-anchor="end" font-size="12">{max_elapsed:.3}</text>"#,
        cx = MARGIN - 8.0,
    );

    for (index, (label, color, records)) in series.iter().enumerate() {
        let points: Vec<String> = records
            .iter()
            .map(|record| format!("{:.2},{:.2}", x(record.workers), y(record.elapsed.as_secs_f64())))
            .collect();

        let _ = writeln!(
            svg,
            r#"<polyline points="{points}" fill="none" stroke="{color}" stroke-width="2"/>"#,
            points = points.join(" "),
        );

        for record in *records {
            let _ = writeln!(
                svg,
                r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="3" fill="{color}"/>"#,
                cx = x(record.workers),
                cy = y(record.elapsed.as_secs_f64()),
            );
        }

        // Legend.
        let legend_y = MARGIN + 20.0 * index as f64;
        let _ = writeln!(
            svg,
            r#"<line x1="{x1}" y1="{legend_y}" x2="{x2}" y2="{legend_y}" stroke="{color}" stroke-width="2"/>"#,
            x1 = WIDTH - MARGIN - 160.0,
            x2 = WIDTH - MARGIN - 130.0,
        );
        let _ = writeln!(
            svg,
            r#"<text x="{cx}" y="{cy}" font-size="14">{label}</text>"#,
            cx = WIDTH - MARGIN - 122.0,
            cy = legend_y + 5.0,
        );
    }

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::timing_log::append;

    fn write_log(path: &Path, records: &[(usize, f64)]) {
        for &(workers, elapsed) in records {
            append(
                path,
                &TimingRecord::new(workers, Duration::from_secs_f64(elapsed)),
            )
            .unwrap();
        }
    }

    #[test]
    fn missing_log_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("chart.svg");

        let outcome = render_comparison(
            &dir.path().join("absent_a.txt"),
            &dir.path().join("absent_b.txt"),
            &output,
        )
        .unwrap();

        assert_eq!(outcome, ChartOutcome::MissingInput);
        assert!(!output.exists());
    }

    #[test]
    fn empty_log_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let message_passing = dir.path().join("mp.txt");
        let pooled = dir.path().join("pool.txt");

        std::fs::write(&message_passing, "").unwrap();
        write_log(&pooled, &[(2, 0.5)]);

        let outcome =
            render_comparison(&message_passing, &pooled, &dir.path().join("chart.svg")).unwrap();

        assert_eq!(outcome, ChartOutcome::MissingInput);
    }

    #[test]
    fn both_logs_render_two_series() {
        let dir = tempfile::tempdir().unwrap();
        let message_passing = dir.path().join("mp.txt");
        let pooled = dir.path().join("pool.txt");
        let output = dir.path().join("chart.svg");

        write_log(&message_passing, &[(4, 0.8)]);
        write_log(&pooled, &[(2, 1.2), (4, 0.7), (8, 0.5)]);

        let outcome = render_comparison(&message_passing, &pooled, &output).unwrap();
        assert_eq!(outcome, ChartOutcome::Rendered);

        let svg = std::fs::read_to_string(&output).unwrap();
        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert!(svg.contains("Message passing"));
        assert!(svg.contains("Pooled"));
    }
}
