//! Size-distribution accumulator.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::alloc::allocation;
use crate::bucket::{BUCKET_COUNT, bucket_index};

/// Read-only handle to a [`StatCounter`]'s running file count.
///
/// Cloned out before the counter is moved to the scanning thread so a
/// progress reporter can poll it while files are still being added.
#[derive(Debug, Clone)]
pub struct FileCountHandle(Arc<AtomicU64>);

impl FileCountHandle {
    /// Number of files counted so far.
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Totals for a single size bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketStats {
    /// Bucket index (power of two).
    pub index: usize,
    /// Number of files.
    pub count: u64,
    /// Total logical size in bytes.
    pub size: u64,
    /// Total allocation units.
    pub blocks: u64,
    /// Total overhead in bytes.
    pub overhead: u64,
}

impl BucketStats {
    /// Average allocation units per file, `None` for an empty bucket.
    pub fn avg_blocks(&self) -> Option<f64> {
        (self.count > 0).then(|| self.blocks as f64 / self.count as f64)
    }

    /// Average overhead bytes per file, `None` for an empty bucket.
    pub fn avg_overhead(&self) -> Option<f64> {
        (self.count > 0).then(|| self.overhead as f64 / self.count as f64)
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Accumulates file counts, sizes, allocation units and overhead per
/// logarithmic size bucket.
///
/// Meant for a single writer. Only the total file count is shared, through
/// [`FileCountHandle`].
#[derive(Debug)]
pub struct StatCounter {
    block_size: u64,
    total_count: Arc<AtomicU64>,
    total_size: u64,
    total_blocks: u64,
    total_overhead: u64,
    max_bucket: usize,
    count: [u64; BUCKET_COUNT],
    size: [u64; BUCKET_COUNT],
    blocks: [u64; BUCKET_COUNT],
    overhead: [u64; BUCKET_COUNT],
    overflow_count: u64,
    overflow_size: u64,
}

impl StatCounter {
    /// Create an empty counter for the given allocation unit size.
    pub fn new(block_size: u64) -> Self {
        Self {
            block_size,
            total_count: Arc::new(AtomicU64::new(0)),
            total_size: 0,
            total_blocks: 0,
            total_overhead: 0,
            max_bucket: 0,
            count: [0; BUCKET_COUNT],
            size: [0; BUCKET_COUNT],
            blocks: [0; BUCKET_COUNT],
            overhead: [0; BUCKET_COUNT],
            overflow_count: 0,
            overflow_size: 0,
        }
    }

    /// Record one file of `size` bytes.
    ///
    /// Block and overhead totals saturate at `u64::MAX`, which only happens
    /// with absurdly large block sizes.
    pub fn add_file(&mut self, size: u64) {
        let alloc = allocation(size, self.block_size);

        self.total_count.fetch_add(1, Ordering::Relaxed);
        self.total_size += size;
        self.total_blocks = self.total_blocks.saturating_add(alloc.blocks);
        self.total_overhead = self.total_overhead.saturating_add(alloc.overhead);

        let index = bucket_index(size);
        if index < BUCKET_COUNT {
            self.count[index] += 1;
            self.size[index] += size;
            self.blocks[index] = self.blocks[index].saturating_add(alloc.blocks);
            self.overhead[index] = self.overhead[index].saturating_add(alloc.overhead);
            self.max_bucket = self.max_bucket.max(index);
        } else {
            self.overflow_count += 1;
            self.overflow_size += size;
        }
    }

    /// Handle for polling the file count from another thread.
    pub fn count_handle(&self) -> FileCountHandle {
        FileCountHandle(Arc::clone(&self.total_count))
    }

    pub fn block_size(&self) -> u64 {
        self.block_size
    }

    pub fn total_count(&self) -> u64 {
        self.total_count.load(Ordering::Relaxed)
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn total_blocks(&self) -> u64 {
        self.total_blocks
    }

    pub fn total_overhead(&self) -> u64 {
        self.total_overhead
    }

    /// Highest bucket that received a file, or 0.
    pub fn max_bucket(&self) -> usize {
        self.max_bucket
    }

    pub fn overflow_count(&self) -> u64 {
        self.overflow_count
    }

    pub fn overflow_size(&self) -> u64 {
        self.overflow_size
    }

    /// Totals for one bucket. Panics if `index >= BUCKET_COUNT`.
    pub fn bucket(&self, index: usize) -> BucketStats {
        BucketStats {
            index,
            count: self.count[index],
            size: self.size[index],
            blocks: self.blocks[index],
            overhead: self.overhead[index],
        }
    }

    /// Buckets `0..=max_bucket`, including empty ones in between.
    pub fn buckets(&self) -> impl Iterator<Item = BucketStats> + '_ {
        (0..=self.max_bucket).map(|i| self.bucket(i))
    }

    /// Whether any file was too large for the tracked buckets.
    pub fn has_overflow(&self) -> bool {
        self.overflow_count > 0
    }

    /// Rough overhead expectation of half a block per file.
    pub fn estimated_overhead(&self) -> u64 {
        let estimate = u128::from(self.total_count()) * u128::from(self.block_size) / 2;
        u64::try_from(estimate).unwrap_or(u64::MAX)
    }
}

impl Default for StatCounter {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_BLOCK_SIZE)
    }
}
