// Copyright 2026 The Depot Authors
// SPDX-License-Identifier: Apache-2.0

//! The storage service facade.

use std::sync::Arc;

use bytes::Bytes;
use depot_core::config::MetadataBackendKind;
use depot_core::{Error, MetadataMap, ObjectInfo, Result, StorageConfig};

use crate::content::ContentStore;
use crate::listing;
use crate::locator::{FileLocator, LocatorStrategy};
use crate::metadata::{MetadataBackend, RedbMetadataStore, SidecarMetadataStore};

/// Filename of the embedded metadata database under the storage root.
const METADATA_DB_FILE: &str = "metadata.redb";

/// The storage service: bucket namespace, content store, metadata store,
/// listing, and locator resolution composed behind five operations.
///
/// Every operation is a single-shot, idempotent-or-overwrite action. The
/// facade performs existence checks before delegating and surfaces errors
/// synchronously; there is no retry or rollback. A failed metadata write
/// after a successful content write is reported but not compensated.
pub struct StorageService {
    content: ContentStore,
    metadata: Arc<dyn MetadataBackend>,
    locator: Arc<dyn LocatorStrategy>,
}

impl StorageService {
    /// Open a storage service per the given configuration, creating the
    /// root directory and the configured metadata backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be created or the
    /// metadata database cannot be opened.
    pub async fn open(config: &StorageConfig) -> Result<Self> {
        let content = ContentStore::new(config.root_dir.clone());
        content.init().await?;

        let metadata: Arc<dyn MetadataBackend> = match config.metadata_backend {
            MetadataBackendKind::Database => {
                Arc::new(RedbMetadataStore::open(&config.root_dir.join(METADATA_DB_FILE))?)
            }
            MetadataBackendKind::Sidecar => {
                Arc::new(SidecarMetadataStore::new(config.root_dir.clone()))
            }
        };

        Ok(Self::with_backend(content, metadata, Arc::new(FileLocator)))
    }

    /// Compose a service from explicit parts. The facade and its tests are
    /// backend-agnostic; backends are chosen here and nowhere else.
    #[must_use]
    pub fn with_backend(
        content: ContentStore,
        metadata: Arc<dyn MetadataBackend>,
        locator: Arc<dyn LocatorStrategy>,
    ) -> Self {
        Self { content, metadata, locator }
    }

    /// Create a bucket. Idempotent; repeated creation succeeds and leaves
    /// existing objects untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing directory cannot be created.
    pub async fn create_bucket(&self, name: &str) -> Result<()> {
        self.content.create_bucket(name).await
    }

    /// Upload an object, replacing content and metadata wholesale.
    ///
    /// The content write happens first; if it fails, the metadata write is
    /// skipped. Metadata is written only when the mapping is non-empty.
    /// The two writes are not atomic as a pair: a crash between them
    /// leaves content without metadata or vice versa.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the bucket does not exist, or an error if
    /// either write fails.
    pub async fn upload_object(
        &self,
        bucket: &str,
        name: &str,
        content: Bytes,
        metadata: MetadataMap,
    ) -> Result<()> {
        self.content.put(bucket, name, content).await?;

        if !metadata.is_empty() {
            self.metadata.put(bucket, name, metadata).await?;
        }

        Ok(())
    }

    /// Get an object's size and metadata mapping.
    ///
    /// Size comes from a filesystem stat of the content; the mapping comes
    /// from the metadata backend and defaults to empty when absent or
    /// unreadable.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the object does not exist.
    pub async fn get_object_metadata(&self, bucket: &str, name: &str) -> Result<ObjectInfo> {
        let size = self.content.size(bucket, name).await?;
        let metadata = self.metadata.get(bucket, name).await?;

        Ok(ObjectInfo::new(bucket, name, size).with_metadata(metadata))
    }

    /// List object names under a bucket, filtered by prefix, sorted
    /// lexicographically ascending. A nonexistent bucket lists as empty.
    ///
    /// # Errors
    ///
    /// Returns an error only on internal listing failure.
    pub async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<String>> {
        listing::list_objects(&self.content.bucket_path(bucket), prefix).await
    }

    /// Resolve a download locator for an object.
    ///
    /// Validates existence through the content store, then derives the
    /// locator string. No content is transferred and the locator is not
    /// validated for reachability.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the object does not exist.
    pub async fn download_locator(&self, bucket: &str, name: &str) -> Result<String> {
        if !self.content.exists(bucket, name) {
            return Err(Error::not_found_resource(
                format!("object not found: {bucket}/{name}"),
                format!("{bucket}/{name}"),
            ));
        }

        let path = self.content.object_path(bucket, name);
        Ok(self.locator.locator(bucket, name, &path))
    }

    /// Release the metadata backend's process-wide resource. Idempotent;
    /// called once on shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the final flush fails.
    pub async fn close(&self) -> Result<()> {
        self.metadata.close().await
    }
}
