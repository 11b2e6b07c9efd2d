//! JWalk-based directory scanner feeding a [`StatCounter`].

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

use jwalk::{Parallelism, WalkDir};

use fsized_core::{ScanConfig, ScanError, ScanWarning, StatCounter, WarningKind};

use crate::inode::{InodeKey, InodeTracker};

/// Outcome of a completed traversal. The statistics themselves live in the
/// [`StatCounter`] passed to [`JwalkScanner::scan`].
#[derive(Debug, Clone)]
pub struct ScanSummary {
    /// Canonical root that was scanned.
    pub root_path: PathBuf,
    /// Wall time spent walking.
    pub duration: Duration,
    /// Directories visited, including the root.
    pub dirs_scanned: u64,
    /// Hardlinks skipped because their inode was already counted.
    pub hardlinks_skipped: u64,
    /// Entries that could not be read.
    pub warnings: Vec<ScanWarning>,
}

impl ScanSummary {
    /// Check if there were any warnings during scanning.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Directory scanner using jwalk for parallel directory reads.
///
/// Entries are consumed on the calling thread, so the [`StatCounter`] only
/// ever sees one writer. Progress is observed through
/// [`StatCounter::count_handle`].
#[derive(Debug, Default, Clone, Copy)]
pub struct JwalkScanner;

impl JwalkScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        Self
    }

    /// Walk `config.root` and add every non-directory entry to `stats`.
    /// A root that is not a directory is counted as a single file.
    ///
    /// Unreadable entries are logged and recorded as warnings. An error is
    /// returned only when the root itself cannot be scanned; whatever was
    /// counted before that stays in `stats`.
    pub fn scan(&self, config: &ScanConfig, stats: &mut StatCounter) -> Result<ScanSummary, ScanError> {
        let start = Instant::now();
        let root_path = config
            .root
            .canonicalize()
            .map_err(|e| ScanError::io(&config.root, e))?;

        tracing::debug!(root = %root_path.display(), block_size = config.block_size, "starting scan");

        let inode_tracker = InodeTracker::new();
        let mut warnings = Vec::new();
        let mut dirs_scanned = 0;
        let mut hardlinks_skipped = 0;

        for entry_result in walker(config, &root_path) {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                    if err.depth() == 0 {
                        return Err(root_error(path, err));
                    }
                    warnings.push(entry_warning(&path, &err, WarningKind::ReadError));
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                dirs_scanned += 1;
                if let Some(err) = entry.read_children_error.as_ref() {
                    let path = entry.path();
                    if entry.depth() == 0 {
                        return Err(ScanError::Other {
                            message: format!("cannot read {}: {err}", path.display()),
                        });
                    }
                    warnings.push(entry_warning(&path, err, WarningKind::ReadError));
                }
                continue;
            }

            let path = entry.path();
            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(err) => {
                    warnings.push(entry_warning(&path, &err, WarningKind::MetadataError));
                    continue;
                }
            };

            if config.dedup_hardlinks
                && get_nlink(&metadata) > 1
                && !inode_tracker.track(InodeKey::new(get_ino(&metadata), get_dev(&metadata)))
            {
                hardlinks_skipped += 1;
                continue;
            }

            stats.add_file(metadata.len());
        }

        let duration = start.elapsed();
        tracing::debug!(
            files = stats.total_count(),
            dirs = dirs_scanned,
            warnings = warnings.len(),
            "scan finished in {:?}",
            duration
        );

        Ok(ScanSummary {
            root_path,
            duration,
            dirs_scanned,
            hardlinks_skipped,
            warnings,
        })
    }
}

/// Log and record a skipped entry.
fn entry_warning(path: &Path, err: &jwalk::Error, kind: WarningKind) -> ScanWarning {
    let warning = match err.io_error() {
        Some(io) => ScanWarning::from_io(path, io, kind),
        None => ScanWarning::new(path, err.to_string(), kind),
    };
    tracing::warn!(path = %path.display(), "{}", warning.message);
    warning
}

fn root_error(path: PathBuf, err: jwalk::Error) -> ScanError {
    let message = err.to_string();
    match err.into_io_error() {
        Some(source) => ScanError::io(path, source),
        None => ScanError::Other { message },
    }
}

fn walker(config: &ScanConfig, root_path: &Path) -> WalkDir {
    let parallelism = match config.threads {
        0 => Parallelism::RayonDefaultPool {
            busy_timeout: Duration::from_millis(100),
        },
        1 => Parallelism::Serial,
        n => Parallelism::RayonNewPool(n),
    };

    WalkDir::new(root_path)
        .parallelism(parallelism)
        .skip_hidden(!config.include_hidden)
        .follow_links(config.follow_symlinks)
        .sort(true)
}

// Cross-platform metadata helpers

#[cfg(unix)]
fn get_dev(metadata: &std::fs::Metadata) -> u64 {
    metadata.dev()
}

#[cfg(not(unix))]
fn get_dev(_metadata: &std::fs::Metadata) -> u64 {
    0
}

#[cfg(unix)]
fn get_ino(metadata: &std::fs::Metadata) -> u64 {
    metadata.ino()
}

#[cfg(not(unix))]
fn get_ino(_metadata: &std::fs::Metadata) -> u64 {
    0
}

#[cfg(unix)]
fn get_nlink(metadata: &std::fs::Metadata) -> u64 {
    metadata.nlink()
}

#[cfg(not(unix))]
fn get_nlink(_metadata: &std::fs::Metadata) -> u64 {
    1 // No hardlink detection off unix
}
