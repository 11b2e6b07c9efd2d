//! Allocation-unit model.

use serde::{Deserialize, Serialize};

/// Disk space a single file is modeled to consume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Allocation units occupied.
    pub blocks: u64,
    /// Bytes left unused in the last unit.
    pub overhead: u64,
}

/// Model the allocation of a `size`-byte file on a filesystem using
/// `block_size`-byte units.
///
/// A file always consumes one unit past its whole multiples, so a file of
/// exactly one block is modeled as two blocks with a full block of overhead.
/// Empty files and a zero block size yield no blocks and no overhead.
pub fn allocation(size: u64, block_size: u64) -> Allocation {
    if size == 0 || block_size == 0 {
        return Allocation::default();
    }

    Allocation {
        blocks: size / block_size + 1,
        overhead: block_size - size % block_size,
    }
}
