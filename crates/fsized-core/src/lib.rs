//! Core statistics engine for fsized.
//!
//! This crate holds the pieces with actual logic in them: the logarithmic
//! bucket classifier, the allocation-unit model, and the [`StatCounter`]
//! that aggregates both over a stream of file sizes.
//!
//! ```rust
//! use fsized_core::{StatCounter, bucket_index, size_range};
//!
//! let mut stats = StatCounter::new(4096);
//! stats.add_file(4096);
//! stats.add_file(5000);
//!
//! assert_eq!(bucket_index(5000), 12);
//! assert_eq!(size_range(12), "4 - 8 kB");
//! assert_eq!(stats.total_blocks(), 4);
//! ```

mod alloc;
mod bucket;
mod config;
mod error;
mod stats;

pub use alloc::{Allocation, allocation};
pub use bucket::{BUCKET_COUNT, bucket_index, overflow_range, size_range};
pub use config::{DEFAULT_BLOCK_SIZE, ScanConfig, ScanConfigBuilder, parse_block_size};
pub use error::{BlockSizeError, ScanError, ScanWarning, WarningKind};
pub use stats::{BucketStats, FileCountHandle, StatCounter};
