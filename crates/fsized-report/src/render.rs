//! Text renderers for a [`StatsReport`].

use std::time::Duration;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::report::{OverheadEstimate, ReportRow, StatsReport};

const HEADER: [&str; 9] = [
    "#",
    "File size",
    "Files count",
    "Occupied (bytes)",
    "Occupied",
    "Avg. AU",
    "Total AU",
    "Avg. OHD",
    "Total OHD",
];

const PLACEHOLDER: &str = "--";

/// How the report is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned table with header and totals.
    #[default]
    Formatted,
    /// Tab-separated lines, one per bucket.
    Simple,
    /// Pretty-printed JSON document.
    Json,
}

impl OutputFormat {
    /// Map a command-line value. Anything unrecognized selects simple output.
    pub fn from_arg(s: &str) -> Self {
        match s {
            "formatted" => Self::Formatted,
            "json" => Self::Json,
            _ => Self::Simple,
        }
    }
}

/// Format a byte count for display (SI units).
pub fn format_bytes(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::DECIMAL)
}

fn format_avg(avg: Option<f64>) -> String {
    avg.map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{v:.2}"))
}

fn table_row(row: &ReportRow) -> Vec<String> {
    if row.is_empty() {
        let mut cells = vec![row.label.clone(), row.range.clone(), "0".to_string()];
        cells.extend(std::iter::repeat_n(PLACEHOLDER.to_string(), 6));
        return cells;
    }

    vec![
        row.label.clone(),
        row.range.clone(),
        row.count.to_string(),
        row.size.to_string(),
        format_bytes(row.size),
        format_avg(row.avg_blocks()),
        row.blocks.to_string(),
        format_avg(row.avg_overhead()),
        format_bytes(row.overhead),
    ]
}

fn rule_row(fill: char) -> Vec<String> {
    let mut cells: Vec<String> = HEADER
        .iter()
        .map(|h| fill.to_string().repeat(h.len()))
        .collect();
    cells[0] = fill.to_string();
    cells
}

/// Pad every column to its widest cell.
fn layout(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            rows.iter()
                .filter_map(|r| r.get(c))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    rows.iter()
        .map(|row| {
            row.iter()
                .zip(&widths)
                .map(|(cell, &w)| format!("{cell:<w$}"))
                .join("  ")
                .trim_end()
                .to_string()
        })
        .join("\n")
}

/// Render the aligned table: header, one row per bucket up to the highest
/// populated one, an overflow row when needed, and a totals row.
pub fn render_table(report: &StatsReport) -> String {
    let mut rows = vec![HEADER.iter().map(|h| h.to_string()).collect(), rule_row('=')];
    rows.extend(report.rows().map(table_row));
    rows.push(rule_row('-'));

    let total = &report.total;
    rows.push(vec![
        total.label.clone(),
        total.range.clone(),
        total.count.to_string(),
        total.size.to_string(),
        format_bytes(total.size),
        format!("{:.2}", total.avg_blocks().unwrap_or(0.0)),
        total.blocks.to_string(),
        format!("{:.2}", total.avg_overhead().unwrap_or(0.0)),
        format_bytes(total.overhead),
    ]);

    let mut out = layout(&rows);
    out.push('\n');
    out
}

/// Render tab-separated `index, range, count, bytes, size` lines.
///
/// Covers the same buckets as [`render_table`]; prints nothing when no file
/// was counted.
pub fn render_simple(report: &StatsReport) -> String {
    if report.total.is_empty() {
        return String::new();
    }

    report
        .rows()
        .map(|row| {
            format!(
                "{}\t{}\t{}\t{}\t{}\n",
                row.label,
                row.range,
                row.count,
                row.size,
                format_bytes(row.size)
            )
        })
        .collect()
}

/// Errors from rendering a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Render the report as pretty-printed JSON.
pub fn render_json(report: &StatsReport) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// `Scanned N files in T (avg. X files per second).`
pub fn scan_summary(files: u64, elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    let fps = if files > 0 && secs > 0.0 {
        files as f64 / secs
    } else {
        0.0
    };
    format!("Scanned {files} files in {elapsed:.2?} (avg. {fps:.2} files per second).")
}

/// One-line comparison of actual overhead against the rough estimate.
pub fn overhead_summary(estimate: &OverheadEstimate) -> String {
    format!(
        "Rough estimate of overhead per {} files using allocation units of {} bytes is {}. \
         Actual overhead of {} is {:.2}% {}.",
        estimate.files,
        estimate.block_size,
        format_bytes(estimate.estimated),
        format_bytes(estimate.actual),
        estimate.percent,
        estimate.verdict,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsized_core::StatCounter;

    fn sample_report() -> StatsReport {
        let mut stats = StatCounter::new(4096);
        stats.add_file(0);
        stats.add_file(4096);
        stats.add_file(5000);
        StatsReport::from_stats(&stats)
    }

    #[test]
    fn test_output_format_from_arg() {
        assert_eq!(OutputFormat::from_arg("formatted"), OutputFormat::Formatted);
        assert_eq!(OutputFormat::from_arg("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_arg("tab"), OutputFormat::Simple);
        assert_eq!(OutputFormat::from_arg(""), OutputFormat::Simple);
    }

    #[test]
    fn test_table_shape() {
        let table = render_table(&sample_report());
        let lines: Vec<&str> = table.lines().collect();

        // header, rule, 13 buckets, rule, totals
        assert_eq!(lines.len(), 17);
        assert!(lines[0].starts_with("#  "));
        assert!(lines[1].chars().all(|c| c == '=' || c == ' '));
        assert!(lines[15].chars().all(|c| c == '-' || c == ' '));
        assert_eq!(lines[1].split_whitespace().count(), 9);
        assert!(lines[16].starts_with("** "));
        assert!(lines[16].contains("TOTAL"));
    }

    #[test]
    fn test_table_rows() {
        let table = render_table(&sample_report());
        let lines: Vec<&str> = table.lines().collect();

        let empty: Vec<&str> = lines[2 + 5].split_whitespace().collect();
        assert_eq!(empty[0], "5");
        assert_eq!(&empty[empty.len() - 7..], ["0", "--", "--", "--", "--", "--", "--"]);

        let top: Vec<&str> = lines[2 + 12].split_whitespace().collect();
        assert_eq!(&top[..5], ["12", "4", "-", "8", "kB"]);
        assert_eq!(top[5], "2");
        assert_eq!(top[6], "9096");
        assert!(top.contains(&"2.00"));
        assert!(top.contains(&"4"));
        assert!(top.contains(&"3644.00"));
    }

    #[test]
    fn test_table_columns_aligned() {
        let table = render_table(&sample_report());
        let lines: Vec<&str> = table.lines().collect();
        let count_col = lines[0].find("Files count").unwrap();
        for line in &lines[2..15] {
            assert_ne!(line.as_bytes()[count_col], b' ', "{line}");
        }
    }

    #[test]
    fn test_table_overflow_row() {
        let mut stats = StatCounter::new(4096);
        stats.add_file(3);
        stats.add_file(1 << 41);

        let table = render_table(&StatsReport::from_stats(&stats));
        assert!(table.lines().any(|l| l.starts_with("40+") && l.contains(">= 1024 GB")));
    }

    #[test]
    fn test_empty_table() {
        let table = render_table(&StatsReport::from_stats(&StatCounter::new(4096)));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        let cells: Vec<&str> = lines[2].split_whitespace().collect();
        assert_eq!(&cells[..6], ["0", "0", "-", "1", "B", "0"]);
        assert!(lines[4].contains("0.00"));
    }

    #[test]
    fn test_simple_lines() {
        let simple = render_simple(&sample_report());
        let lines: Vec<&str> = simple.lines().collect();

        assert_eq!(lines.len(), 13);
        assert!(lines[0].starts_with("0\t0 - 1 B\t1\t0\t"));
        assert!(lines[1].starts_with("1\t2 - 3 B\t0\t0\t"));
        assert!(lines[12].starts_with("12\t4 - 8 kB\t2\t9096\t"));
    }

    #[test]
    fn test_simple_empty() {
        assert!(render_simple(&StatsReport::from_stats(&StatCounter::new(4096))).is_empty());
    }

    #[test]
    fn test_json_document() {
        let report = sample_report();
        let json = render_json(&report).unwrap();
        assert!(json.contains("\"verdict\": \"worse\""));

        let parsed: StatsReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.buckets, report.buckets);
        assert_eq!(parsed.total, report.total);
        assert!(parsed.overflow.is_none());
    }

    #[test]
    fn test_scan_summary() {
        let line = scan_summary(10, Duration::from_secs(2));
        assert!(line.starts_with("Scanned 10 files in 2.00s"));
        assert!(line.ends_with("(avg. 5.00 files per second)."));
        assert!(scan_summary(0, Duration::ZERO).contains("avg. 0.00"));
    }

    #[test]
    fn test_overhead_summary() {
        let report = sample_report();
        let line = overhead_summary(&report.estimate);
        assert!(line.starts_with("Rough estimate of overhead per 3 files using allocation units of 4096 bytes"));
        // 7288 bytes measured against 6144 expected
        assert!(line.ends_with("18.62% worse."));
    }
}
