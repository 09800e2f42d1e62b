//! Bucket handler
//!
//! Read-only protocol adapter over a [`DirectoryLister`]. Only `List` does real
//! work; content access, mutation and `Stat` fail with fixed errors.

use async_trait::async_trait;
use log::{debug, info};

use crate::error::HandlerError;
use crate::listing::{DirectoryEntry, DirectoryLister};
use crate::protocol::handlers::{
    ContentReader, ContentWriter, FileCmder, FileLister, FileReader, FileWriter,
};
use crate::protocol::request::{Method, Request};

pub struct BucketHandler {
    lister: DirectoryLister,
}

impl BucketHandler {
    pub fn new(lister: DirectoryLister) -> Self {
        Self { lister }
    }
}

#[async_trait]
impl FileReader for BucketHandler {
    async fn file_read(&self, request: &Request) -> Result<ContentReader, HandlerError> {
        debug!("Rejecting read of {}", request.filepath);
        Err(HandlerError::Unsupported(format!(
            "reading {} is not supported",
            request.filepath
        )))
    }
}

#[async_trait]
impl FileWriter for BucketHandler {
    async fn file_write(&self, request: &Request) -> Result<ContentWriter, HandlerError> {
        debug!("Rejecting write of {}", request.filepath);
        Err(HandlerError::PermissionDenied(request.filepath.clone()))
    }
}

#[async_trait]
impl FileCmder for BucketHandler {
    async fn file_cmd(&self, request: &Request) -> Result<(), HandlerError> {
        debug!("Rejecting {} on {}", request.method, request.filepath);
        Err(HandlerError::Unsupported(format!(
            "{} is not supported",
            request.method
        )))
    }
}

#[async_trait]
impl FileLister for BucketHandler {
    async fn file_info(&self, request: &Request) -> Result<Vec<DirectoryEntry>, HandlerError> {
        info!("{} {}", request.method, request.filepath);

        match request.method {
            Method::List => Ok(self.lister.list(&request.filepath).await?),
            // No point lookup exists yet; a listing is not a stat result.
            Method::Stat => Err(HandlerError::StatUnavailable(request.filepath.clone())),
            _ => Err(HandlerError::Unsupported(format!(
                "{} is not an info method",
                request.method
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::storage::MemoryStore;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn handler() -> (Arc<MemoryStore>, BucketHandler) {
        let store = Arc::new(MemoryStore::new());
        let ts = Utc.with_ymd_and_hms(2024, 2, 2, 2, 2, 2).unwrap();
        store.insert("docs/a.txt", 10, ts);
        store.insert("docs/sub/b.txt", 20, ts);
        let lister = DirectoryLister::new(store.clone(), "/");
        (store, BucketHandler::new(lister))
    }

    #[tokio::test]
    async fn test_list_delegates_to_lister() {
        let (_, handler) = handler();
        let entries = handler
            .file_info(&Request::new(Method::List, "docs/"))
            .await
            .unwrap();

        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["docs/sub", "docs/a.txt"]);
    }

    #[tokio::test]
    async fn test_stat_is_unavailable() {
        let (_, handler) = handler();
        for path in ["/", "docs/a.txt", "docs/sub", "missing"] {
            let result = handler.file_info(&Request::new(Method::Stat, path)).await;
            assert!(matches!(result, Err(HandlerError::StatUnavailable(p)) if p == path));
        }
    }

    #[tokio::test]
    async fn test_other_info_methods_unsupported() {
        let (_, handler) = handler();
        let result = handler
            .file_info(&Request::new(Method::Other("Readlink".into()), "docs/"))
            .await;
        assert!(matches!(result, Err(HandlerError::Unsupported(_))));
    }

    #[tokio::test]
    async fn test_content_and_mutation_rejected_without_side_effects() {
        let (store, handler) = handler();

        let read = handler.file_read(&Request::new(Method::Get, "docs/a.txt")).await;
        assert!(matches!(read, Err(HandlerError::Unsupported(_))));

        let write = handler.file_write(&Request::new(Method::Put, "docs/new.txt")).await;
        assert!(matches!(write, Err(HandlerError::PermissionDenied(_))));

        for method in [Method::Rename, Method::Remove, Method::Mkdir, Method::Rmdir] {
            let request = Request::new(method, "docs/a.txt").with_target("docs/b.txt");
            assert!(matches!(
                handler.file_cmd(&request).await,
                Err(HandlerError::Unsupported(_))
            ));
        }

        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_list_failure_is_store_query_failed() {
        struct Down;

        #[async_trait]
        impl crate::storage::ObjectStore for Down {
            async fn list_page(
                &self,
                _request: &crate::storage::ListingRequest,
                _continuation: Option<String>,
            ) -> Result<crate::storage::StoreResponse, StoreError> {
                Err(StoreError::Query("access denied".into()))
            }
        }

        let handler = BucketHandler::new(DirectoryLister::new(Arc::new(Down), "/"));
        let result = handler.file_info(&Request::new(Method::List, "/")).await;
        assert!(matches!(
            result,
            Err(HandlerError::StoreQueryFailed(StoreError::Query(_)))
        ));
    }
}
