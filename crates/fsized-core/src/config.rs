//! Scan configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::BlockSizeError;

/// Allocation unit size used when none is given.
pub const DEFAULT_BLOCK_SIZE: u64 = 4096;

/// Configuration for a size-distribution scan.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root path to scan.
    pub root: PathBuf,

    /// Allocation unit size in bytes (0 disables overhead modeling).
    #[builder(default = "DEFAULT_BLOCK_SIZE")]
    #[serde(default = "default_block_size")]
    pub block_size: u64,

    /// Follow symbolic links.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Include hidden files (starting with .).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_hidden: bool,

    /// Count each hardlinked inode only once.
    #[builder(default = "false")]
    #[serde(default)]
    pub dedup_hardlinks: bool,

    /// Number of threads for directory reading (0 = auto-detect).
    #[builder(default = "0")]
    #[serde(default)]
    pub threads: usize,
}

fn default_true() -> bool {
    true
}

fn default_block_size() -> u64 {
    DEFAULT_BLOCK_SIZE
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a simple config for scanning a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            block_size: DEFAULT_BLOCK_SIZE,
            follow_symlinks: false,
            include_hidden: true,
            dedup_hardlinks: false,
            threads: 0,
        }
    }

    /// Set the allocation unit size.
    pub fn with_block_size(mut self, block_size: u64) -> Self {
        self.block_size = block_size;
        self
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Parse a block size argument: digits, optionally followed by `k` for
/// kibibytes (`"512"`, `"8k"`).
pub fn parse_block_size(s: &str) -> Result<u64, BlockSizeError> {
    let (digits, multiplier) = match s.strip_suffix('k') {
        Some(rest) => (rest, 1024),
        None => (s, 1),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BlockSizeError::Malformed {
            input: s.to_string(),
        });
    }

    digits
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .ok_or_else(|| BlockSizeError::TooLarge {
            input: s.to_string(),
        })
}
