//! Serializable snapshot of a finished [`StatCounter`].

use serde::{Deserialize, Serialize};

use fsized_core::{BUCKET_COUNT, StatCounter, overflow_range, size_range};

/// Index column label of the overflow row.
pub const OVERFLOW_LABEL: &str = "40+";

/// One line of the report: a bucket, the overflow bucket, or the totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Index column (`"0"`..`"39"`, `"40+"`, or `"**"` for totals).
    pub label: String,
    /// Human-readable size range.
    pub range: String,
    /// Number of files.
    pub count: u64,
    /// Total logical size in bytes.
    pub size: u64,
    /// Total allocation units.
    pub blocks: u64,
    /// Total overhead in bytes.
    pub overhead: u64,
}

impl ReportRow {
    /// Average allocation units per file, `None` when the row is empty.
    pub fn avg_blocks(&self) -> Option<f64> {
        (self.count > 0).then(|| self.blocks as f64 / self.count as f64)
    }

    /// Average overhead bytes per file, `None` when the row is empty.
    pub fn avg_overhead(&self) -> Option<f64> {
        (self.count > 0).then(|| self.overhead as f64 / self.count as f64)
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Whether the measured overhead beat the half-block-per-file rule of thumb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Better,
    Worse,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Better => f.write_str("better"),
            Self::Worse => f.write_str("worse"),
        }
    }
}

/// Actual overhead compared against `files * block_size / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverheadEstimate {
    pub files: u64,
    pub block_size: u64,
    /// Expected overhead in bytes.
    pub estimated: u64,
    /// Measured overhead in bytes.
    pub actual: u64,
    /// Relative deviation from the estimate, in percent (never negative).
    pub percent: f64,
    pub verdict: Verdict,
}

impl OverheadEstimate {
    pub fn from_stats(stats: &StatCounter) -> Self {
        let estimated = stats.estimated_overhead();
        let actual = stats.total_overhead();

        // Without an estimate there is no ratio to report, only a direction.
        let ratio = if estimated > 0 {
            1.0 - actual as f64 / estimated as f64
        } else {
            0.0
        };
        let verdict = if actual > estimated {
            Verdict::Worse
        } else {
            Verdict::Better
        };

        Self {
            files: stats.total_count(),
            block_size: stats.block_size(),
            estimated,
            actual,
            percent: ratio.abs() * 100.0,
            verdict,
        }
    }
}

/// Everything the renderers need, detached from the counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    /// Allocation unit size the overhead was modeled with.
    pub block_size: u64,
    /// Buckets `0..=max_bucket`, empty ones included.
    pub buckets: Vec<ReportRow>,
    /// Files of 1 TiB and more, if any.
    pub overflow: Option<ReportRow>,
    /// Grand totals, overflow included.
    pub total: ReportRow,
    pub estimate: OverheadEstimate,
}

impl StatsReport {
    /// Snapshot a counter after the scan has finished.
    pub fn from_stats(stats: &StatCounter) -> Self {
        let buckets: Vec<ReportRow> = stats
            .buckets()
            .map(|b| ReportRow {
                label: b.index.to_string(),
                range: size_range(b.index),
                count: b.count,
                size: b.size,
                blocks: b.blocks,
                overhead: b.overhead,
            })
            .collect();

        // The counter keeps no per-unit figures for overflowed files; what
        // the tracked buckets don't account for belongs to them.
        let overflow = stats.has_overflow().then(|| {
            let (blocks, overhead) = (0..BUCKET_COUNT)
                .map(|i| stats.bucket(i))
                .fold((0u64, 0u64), |(bl, oh), b| {
                    (bl.saturating_add(b.blocks), oh.saturating_add(b.overhead))
                });
            ReportRow {
                label: OVERFLOW_LABEL.to_string(),
                range: overflow_range(),
                count: stats.overflow_count(),
                size: stats.overflow_size(),
                blocks: stats.total_blocks().saturating_sub(blocks),
                overhead: stats.total_overhead().saturating_sub(overhead),
            }
        });

        let total = ReportRow {
            label: "**".to_string(),
            range: "TOTAL".to_string(),
            count: stats.total_count(),
            size: stats.total_size(),
            blocks: stats.total_blocks(),
            overhead: stats.total_overhead(),
        };

        Self {
            block_size: stats.block_size(),
            buckets,
            overflow,
            total,
            estimate: OverheadEstimate::from_stats(stats),
        }
    }

    /// Bucket rows followed by the overflow row, if present.
    pub fn rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.buckets.iter().chain(self.overflow.as_ref())
    }
}
