//! Listing layer
//!
//! Translates delimiter-scoped object store listings into directory entries.

pub mod entry;
pub mod lister;

pub use entry::{DirectoryEntry, ModTime};
pub use lister::{DirectoryLister, ROOT_MARKER};
