//! Report rendering for fsized.
//!
//! Turns a finished [`StatCounter`](fsized_core::StatCounter) into a
//! [`StatsReport`] snapshot and renders it in one of three forms:
//!
//! - **Formatted** - aligned table with per-bucket averages and totals
//! - **Simple** - tab-separated lines, easy to paste into a spreadsheet
//! - **JSON** - the full snapshot via serde
//!
//! ```rust
//! use fsized_core::StatCounter;
//! use fsized_report::{StatsReport, render_table};
//!
//! let mut stats = StatCounter::new(4096);
//! stats.add_file(4096);
//!
//! let report = StatsReport::from_stats(&stats);
//! assert_eq!(report.total.blocks, 2);
//! print!("{}", render_table(&report));
//! ```

mod render;
mod report;

pub use render::{
    OutputFormat, ReportError, format_bytes, overhead_summary, render_json, render_simple,
    render_table, scan_summary,
};
pub use report::{OVERFLOW_LABEL, OverheadEstimate, ReportRow, StatsReport, Verdict};
