//! File system scanning driver for fsized.
//!
//! Walks a directory tree with jwalk and feeds every file size into a
//! [`StatCounter`]. Directory reads happen in parallel, but entries are
//! consumed in order on the calling thread, so the counter has a single
//! writer.
//!
//! # Example
//!
//! ```rust,no_run
//! use fsized_scan::{JwalkScanner, ScanConfig, StatCounter};
//!
//! let config = ScanConfig::new("/path/to/scan");
//! let mut stats = StatCounter::new(config.block_size);
//! let summary = JwalkScanner::new().scan(&config, &mut stats).unwrap();
//!
//! println!("{} files in {:?}", stats.total_count(), summary.duration);
//! ```
//!
//! # Progress Monitoring
//!
//! [`ProgressTicker`] logs a status line every second from a tokio task,
//! reading only the counter's atomic file count:
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use fsized_scan::{JwalkScanner, ProgressTicker, ScanConfig, StatCounter};
//!
//! # async fn run() {
//! let config = ScanConfig::new("/path/to/scan");
//! let mut stats = StatCounter::new(config.block_size);
//! let ticker = ProgressTicker::spawn(stats.count_handle(), Duration::from_secs(1));
//!
//! let (stats, result) = tokio::task::spawn_blocking(move || {
//!     let result = JwalkScanner::new().scan(&config, &mut stats);
//!     (stats, result)
//! })
//! .await
//! .unwrap();
//!
//! ticker.stop();
//! # }
//! ```

mod inode;
mod progress;
mod scanner;

pub use inode::{InodeKey, InodeTracker};
pub use progress::ProgressTicker;
pub use scanner::{JwalkScanner, ScanSummary};

// Re-export core types for convenience
pub use fsized_core::{
    FileCountHandle, ScanConfig, ScanError, ScanWarning, StatCounter, WarningKind,
};
