//! Directory entries
//!
//! Value types describing one node of the virtual filesystem built on top of
//! a flat key space.

use chrono::{DateTime, Utc};

use crate::storage::StoredObject;

/// Modification time of an entry.
///
/// The store only timestamps concrete objects. Synthetic directories get the
/// wall-clock time at listing, flagged as approximate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModTime {
    Known(DateTime<Utc>),
    Approximate(DateTime<Utc>),
}

impl ModTime {
    pub fn instant(&self) -> DateTime<Utc> {
        match self {
            ModTime::Known(ts) | ModTime::Approximate(ts) => *ts,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, ModTime::Known(_))
    }
}

/// One visible node: either a delimiter-grouped prefix or a concrete object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub size: u64,
    pub modified_at: ModTime,
    pub is_directory: bool,
}

impl DirectoryEntry {
    /// Entry for a common prefix. Exactly one trailing delimiter is stripped,
    /// so `a//` names the directory `a/`, distinct from its parent `a`.
    pub fn directory(prefix: &str, delimiter: &str, now: DateTime<Utc>) -> Self {
        let name = if delimiter.is_empty() {
            prefix
        } else {
            prefix.strip_suffix(delimiter).unwrap_or(prefix)
        };

        Self {
            name: name.to_string(),
            size: 0,
            modified_at: ModTime::Approximate(now),
            is_directory: true,
        }
    }

    /// Entry for a concrete object; key, size and timestamp are taken as-is.
    pub fn object(object: StoredObject) -> Self {
        Self {
            name: object.key,
            size: object.size,
            modified_at: ModTime::Known(object.last_modified),
            is_directory: false,
        }
    }
}
