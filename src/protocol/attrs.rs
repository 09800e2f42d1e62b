//! File attributes
//!
//! Filesystem metadata exposed for each entry. The store has no ownership or
//! permission data, so those are fixed.

use crate::listing::DirectoryEntry;

/// Directory type flag, as in `st_mode`
pub const S_IFDIR: u32 = 0o040000;

pub const FILE_PERMISSIONS: u32 = 0o644;
pub const DIR_PERMISSIONS: u32 = 0o755;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileAttributes {
    pub size: u64,
    pub permissions: u32,
    pub uid: u32,
    pub gid: u32,
    /// Seconds since the Unix epoch
    pub mtime: i64,
}

impl FileAttributes {
    pub fn is_dir(&self) -> bool {
        self.permissions & S_IFDIR != 0
    }
}

impl From<&DirectoryEntry> for FileAttributes {
    fn from(entry: &DirectoryEntry) -> Self {
        let permissions = if entry.is_directory {
            DIR_PERMISSIONS | S_IFDIR
        } else {
            FILE_PERMISSIONS
        };

        Self {
            size: entry.size,
            permissions,
            uid: 0,
            gid: 0,
            mtime: entry.modified_at.instant().timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::ModTime;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_object_attributes() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let entry = DirectoryEntry {
            name: "docs/a.txt".into(),
            size: 10,
            modified_at: ModTime::Known(ts),
            is_directory: false,
        };

        let attrs = FileAttributes::from(&entry);
        assert_eq!(attrs.permissions, 0o644);
        assert!(!attrs.is_dir());
        assert_eq!(attrs.size, 10);
        assert_eq!(attrs.mtime, ts.timestamp());
        assert_eq!((attrs.uid, attrs.gid), (0, 0));
    }

    #[test]
    fn test_directory_attributes() {
        let entry = DirectoryEntry::directory("docs/", "/", Utc::now());
        let attrs = FileAttributes::from(&entry);

        assert_eq!(attrs.permissions, 0o755 | S_IFDIR);
        assert!(attrs.is_dir());
        assert_eq!(attrs.size, 0);
        assert_eq!((attrs.uid, attrs.gid), (0, 0));
    }
}
