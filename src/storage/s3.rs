//! S3 object store
//!
//! Lists an S3 (or S3-compatible) bucket through `rust-s3`. The bucket handle
//! is built once at startup from [`StoreSettings`] and then shared read-only.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use s3::bucket::Bucket;
use s3::creds::Credentials;
use s3::region::Region;
use s3::serde_types::ListBucketResult;

use crate::config::StoreSettings;
use crate::error::StoreError;
use crate::storage::backend::{ListingRequest, ObjectStore, StoreResponse, StoredObject};

pub struct S3Store {
    bucket: Box<Bucket>,
}

impl S3Store {
    /// Build the bucket handle: region or custom endpoint, then credentials
    /// from the named profile (or the default provider chain).
    pub fn from_settings(settings: &StoreSettings) -> Result<Self, StoreError> {
        let region = match &settings.endpoint {
            Some(endpoint) => Region::Custom {
                region: settings.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => settings
                .region
                .parse::<Region>()
                .map_err(|e| StoreError::Configuration(format!("bad region: {}", e)))?,
        };

        let credentials = match &settings.profile {
            Some(profile) => Credentials::from_profile(Some(profile.as_str())),
            None => Credentials::default(),
        }
        .map_err(|e| StoreError::Configuration(format!("credentials: {}", e)))?;

        let mut bucket = Bucket::new(&settings.bucket, region, credentials)?;
        if settings.path_style {
            bucket = bucket.with_path_style();
        }

        info!(
            "Using bucket {} in region {}",
            settings.bucket, settings.region
        );

        Ok(Self { bucket })
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list_page(
        &self,
        request: &ListingRequest,
        continuation: Option<String>,
    ) -> Result<StoreResponse, StoreError> {
        let delimiter = if request.delimiter.is_empty() {
            None
        } else {
            Some(request.delimiter.clone())
        };

        let (page, status) = self
            .bucket
            .list_page(request.prefix.clone(), delimiter, continuation, None, None)
            .await?;

        debug!(
            "ListObjectsV2 prefix={:?} status={} prefixes={} objects={} truncated={}",
            request.prefix,
            status,
            page.common_prefixes.as_ref().map_or(0, Vec::len),
            page.contents.len(),
            page.is_truncated
        );

        translate_page(page)
    }
}

fn translate_page(page: ListBucketResult) -> Result<StoreResponse, StoreError> {
    let common_prefixes = page
        .common_prefixes
        .unwrap_or_default()
        .into_iter()
        .map(|p| p.prefix)
        .collect();

    let objects = page
        .contents
        .into_iter()
        .map(|object| {
            Ok(StoredObject {
                last_modified: parse_last_modified(&object.last_modified)?,
                key: object.key,
                size: object.size,
            })
        })
        .collect::<Result<Vec<_>, StoreError>>()?;

    let next_continuation = if page.is_truncated {
        page.next_continuation_token
    } else {
        None
    };

    Ok(StoreResponse {
        common_prefixes,
        objects,
        next_continuation,
    })
}

/// S3 reports `LastModified` as an ISO 8601 timestamp, e.g. `2009-10-12T17:50:30.000Z`.
fn parse_last_modified(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| StoreError::InvalidResponse(format!("LastModified {:?}: {}", raw, e)))
}
