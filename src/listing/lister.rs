//! Directory lister
//!
//! Turns one delimiter-scoped store listing into an ordered directory
//! listing: synthetic directories first, then objects, each group in the
//! order the store returned it.

use chrono::Utc;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::StoreError;
use crate::listing::entry::DirectoryEntry;
use crate::storage::{ListingRequest, ObjectStore};

/// Path the protocol uses for the top of the tree. The store has no such key.
pub const ROOT_MARKER: &str = "/";

pub struct DirectoryLister {
    store: Arc<dyn ObjectStore>,
    delimiter: String,
}

impl DirectoryLister {
    pub fn new(store: Arc<dyn ObjectStore>, delimiter: impl Into<String>) -> Self {
        Self {
            store,
            delimiter: delimiter.into(),
        }
    }

    /// The query actually sent for `prefix`: only the root marker is rewritten.
    pub fn request_for(&self, prefix: &str) -> ListingRequest {
        let prefix = if prefix == ROOT_MARKER { "" } else { prefix };
        ListingRequest::new(prefix, self.delimiter.as_str())
    }

    /// List everything one level below `prefix`.
    ///
    /// All continuation pages are drained before returning. Any store failure
    /// aborts the listing; no partial result is produced.
    pub async fn list(&self, prefix: &str) -> Result<Vec<DirectoryEntry>, StoreError> {
        let request = self.request_for(prefix);
        let now = Utc::now();

        let mut directories = Vec::new();
        let mut seen_prefixes = HashSet::new();
        let mut objects = Vec::new();
        let mut continuation: Option<String> = None;
        let mut seen_tokens = HashSet::new();
        let mut pages = 0usize;

        loop {
            let page = self
                .store
                .list_page(&request, continuation.clone())
                .await
                .inspect_err(|e| warn!("Listing {:?} failed: {}", request.prefix, e))?;
            pages += 1;

            debug!(
                "Page {} for {:?}: {} prefixes, {} objects",
                pages,
                request.prefix,
                page.common_prefixes.len(),
                page.objects.len()
            );

            for common_prefix in page.common_prefixes {
                // S3 may repeat a prefix at a page boundary
                if seen_prefixes.insert(common_prefix.clone()) {
                    directories.push(DirectoryEntry::directory(
                        &common_prefix,
                        &request.delimiter,
                        now,
                    ));
                }
            }
            objects.extend(page.objects.into_iter().map(DirectoryEntry::object));

            match page.next_continuation {
                // Any token seen before means the store is cycling
                Some(token) if !seen_tokens.insert(token.clone()) => {
                    return Err(StoreError::InvalidResponse(format!(
                        "continuation token {:?} repeated after {} page(s)",
                        token, pages
                    )));
                }
                Some(token) => continuation = Some(token),
                None => break,
            }
        }

        info!(
            "Listed {:?}: {} directories, {} objects in {} page(s)",
            request.prefix,
            directories.len(),
            objects.len(),
            pages
        );

        directories.extend(objects);
        Ok(directories)
    }
}
