//! Inode tracking for hardlink deduplication.

use dashmap::DashSet;

/// Identity of a file on disk: inode number plus device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InodeKey {
    pub inode: u64,
    pub device: u64,
}

impl InodeKey {
    pub fn new(inode: u64, device: u64) -> Self {
        Self { inode, device }
    }
}

/// Tracks seen inodes so a file reachable through several hardlinks is
/// counted once.
#[derive(Debug, Default)]
pub struct InodeTracker {
    seen: DashSet<InodeKey>,
}

impl InodeTracker {
    /// Create a new inode tracker.
    pub fn new() -> Self {
        Self {
            seen: DashSet::new(),
        }
    }

    /// Track an inode. Returns `true` if this is the first time seeing it.
    pub fn track(&self, key: InodeKey) -> bool {
        self.seen.insert(key)
    }

    /// Get the number of unique inodes tracked.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_new_inode() {
        let tracker = InodeTracker::new();
        let key = InodeKey::new(12345, 1);

        assert!(tracker.track(key));
        assert!(!tracker.track(key));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_different_devices() {
        let tracker = InodeTracker::new();

        assert!(tracker.track(InodeKey::new(12345, 1)));
        assert!(tracker.track(InodeKey::new(12345, 2)));
        assert_eq!(tracker.len(), 2);
    }
}
