//! In-memory object store
//!
//! Keeps objects in a sorted map and answers delimiter-scoped listings the way
//! an S3 bucket does, including paginated responses.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use crate::error::StoreError;
use crate::storage::backend::{ListingRequest, ObjectStore, StoreResponse, StoredObject};

const DEFAULT_PAGE_SIZE: usize = 1000;

/// One item of a listing before it is split into prefixes and objects.
enum ListingItem {
    Prefix(String),
    Object(StoredObject),
}

/// Sorted in-process key space
pub struct MemoryStore {
    objects: RwLock<BTreeMap<String, StoredObject>>,
    page_size: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(BTreeMap::new()),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Limit how many items (prefixes plus objects) a single page holds.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn insert(&self, key: impl Into<String>, size: u64, last_modified: DateTime<Utc>) {
        let key = key.into();
        let object = StoredObject {
            key: key.clone(),
            size,
            last_modified,
        };
        self.objects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, object);
    }

    pub fn len(&self) -> usize {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Group every key under the prefix into prefixes and objects, in key order.
    ///
    /// A poisoned lock is recovered: every write is a single map insert, so
    /// the map is never left half-updated.
    fn collect_items(&self, request: &ListingRequest) -> Vec<ListingItem> {
        let objects = self.objects.read().unwrap_or_else(PoisonError::into_inner);

        let mut items = Vec::new();
        let mut last_prefix: Option<String> = None;

        for (key, object) in objects.range(request.prefix.clone()..) {
            let Some(rest) = key.strip_prefix(&request.prefix) else {
                break;
            };

            let grouped = if request.delimiter.is_empty() {
                None
            } else {
                rest.find(&request.delimiter).map(|idx| {
                    let end = request.prefix.len() + idx + request.delimiter.len();
                    key[..end].to_string()
                })
            };

            match grouped {
                Some(prefix) => {
                    // Keys are sorted, so equal prefixes are adjacent.
                    if last_prefix.as_deref() != Some(prefix.as_str()) {
                        last_prefix = Some(prefix.clone());
                        items.push(ListingItem::Prefix(prefix));
                    }
                }
                None => items.push(ListingItem::Object(object.clone())),
            }
        }

        items
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list_page(
        &self,
        request: &ListingRequest,
        continuation: Option<String>,
    ) -> Result<StoreResponse, StoreError> {
        let offset = match continuation {
            Some(token) => token.parse::<usize>().map_err(|_| {
                StoreError::InvalidResponse(format!("bad continuation token: {}", token))
            })?,
            None => 0,
        };

        let items = self.collect_items(request);
        let total = items.len();
        let end = (offset + self.page_size).min(total);

        let mut response = StoreResponse::default();
        for item in items.into_iter().skip(offset).take(end.saturating_sub(offset)) {
            match item {
                ListingItem::Prefix(prefix) => response.common_prefixes.push(prefix),
                ListingItem::Object(object) => response.objects.push(object),
            }
        }

        if end < total {
            response.next_continuation = Some(end.to_string());
        }

        Ok(response)
    }
}
