//! Object store abstraction
//!
//! The listing layer only needs one capability from a store: a
//! non-recursive, delimiter-scoped listing of the keys under a prefix.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreError;

/// A normalized listing query sent to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    pub prefix: String,
    pub delimiter: String,
}

impl ListingRequest {
    pub fn new(prefix: impl Into<String>, delimiter: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            delimiter: delimiter.into(),
        }
    }
}

/// Metadata the store reports for one concrete object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
}

/// One page of a delimiter-scoped listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreResponse {
    /// Grouped key prefixes, each ending with the delimiter.
    pub common_prefixes: Vec<String>,
    pub objects: Vec<StoredObject>,
    /// Token for the next page; `None` once the listing is exhausted.
    pub next_continuation: Option<String>,
}

/// A store that can be listed by prefix and delimiter.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch a single page. `continuation` is `None` for the first page and
    /// the previous page's `next_continuation` afterwards.
    async fn list_page(
        &self,
        request: &ListingRequest,
        continuation: Option<String>,
    ) -> Result<StoreResponse, StoreError>;
}
