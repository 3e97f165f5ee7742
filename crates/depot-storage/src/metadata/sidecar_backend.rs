// Copyright 2026 The Depot Authors
// SPDX-License-Identifier: Apache-2.0

//! Sidecar-file metadata storage backend.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use depot_core::{MetadataMap, Result};
use tokio::fs;
use tracing::debug;

use super::MetadataBackend;

/// Reserved suffix distinguishing sidecar records from object content.
///
/// The listing engine filters entries carrying this suffix so sidecars
/// never appear as objects.
pub const SIDECAR_SUFFIX: &str = ".metadata.json";

/// Sidecar-file metadata storage.
///
/// The mapping for `<root>/<bucket>/<name>` lives in
/// `<root>/<bucket>/<name>.metadata.json` as a JSON object of string
/// pairs. Writes are plain overwrites with no atomicity guarantee; a
/// concurrent reader may observe a partially written file. An empty
/// mapping writes nothing at all, so "uploaded without metadata" and
/// "never uploaded" both read back as empty.
pub struct SidecarMetadataStore {
    root: PathBuf,
}

impl SidecarMetadataStore {
    /// Creates a sidecar store over the given storage root.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The sidecar file path for an object.
    fn sidecar_path(&self, bucket: &str, name: &str) -> PathBuf {
        let mut path = self.root.join(bucket).join(name).into_os_string();
        path.push(SIDECAR_SUFFIX);
        PathBuf::from(path)
    }
}

#[async_trait]
impl MetadataBackend for SidecarMetadataStore {
    async fn put(&self, bucket: &str, name: &str, metadata: MetadataMap) -> Result<()> {
        if metadata.is_empty() {
            return Ok(());
        }

        let path = self.sidecar_path(bucket, name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let data = serde_json::to_vec(&metadata)
            .map_err(|e| depot_core::Error::Database(e.to_string()))?;
        fs::write(&path, data).await?;
        Ok(())
    }

    async fn get(&self, bucket: &str, name: &str) -> Result<MetadataMap> {
        let path = self.sidecar_path(bucket, name);

        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(_) => return Ok(MetadataMap::new()),
        };

        // Corrupt sidecars resolve to an empty mapping, same as absence
        match serde_json::from_slice(&data) {
            Ok(metadata) => Ok(metadata),
            Err(e) => {
                debug!(bucket, name, error = %e, "Sidecar unreadable, returning empty");
                Ok(MetadataMap::new())
            }
        }
    }

    async fn close(&self) -> Result<()> {
        // No process-wide resource to release
        Ok(())
    }
}

/// Returns whether a path names a sidecar record rather than content.
#[must_use]
pub(crate) fn is_sidecar(path: &Path) -> bool {
    path.to_string_lossy().ends_with(SIDECAR_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_metadata() -> MetadataMap {
        let mut meta = MetadataMap::new();
        meta.insert("type".to_string(), "binary".to_string());
        meta.insert("owner".to_string(), "jules".to_string());
        meta
    }

    fn create_test_store() -> (SidecarMetadataStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = SidecarMetadataStore::new(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let (store, _temp) = create_test_store();

        store.put("bucket", "obj", sample_metadata()).await.unwrap();
        assert_eq!(store.get("bucket", "obj").await.unwrap(), sample_metadata());
    }

    #[tokio::test]
    async fn test_empty_mapping_writes_no_file() {
        let (store, temp) = create_test_store();

        store.put("bucket", "obj", MetadataMap::new()).await.unwrap();

        let sidecar = temp.path().join("bucket").join("obj.metadata.json");
        assert!(!sidecar.exists());
        assert!(store.get("bucket", "obj").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_is_empty() {
        let (store, _temp) = create_test_store();
        assert!(store.get("bucket", "never").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_sidecar_is_empty() {
        let (store, temp) = create_test_store();

        let dir = temp.path().join("bucket");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("obj.metadata.json"), b"{not json").unwrap();

        assert!(store.get("bucket", "obj").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_nested_object_name() {
        let (store, temp) = create_test_store();

        store.put("bucket", "a/b/c.bin", sample_metadata()).await.unwrap();

        assert!(temp.path().join("bucket/a/b/c.bin.metadata.json").exists());
        assert_eq!(store.get("bucket", "a/b/c.bin").await.unwrap(), sample_metadata());
    }

    #[test]
    fn test_is_sidecar() {
        assert!(is_sidecar(Path::new("/data/b/obj.metadata.json")));
        assert!(!is_sidecar(Path::new("/data/b/obj.json")));
        assert!(!is_sidecar(Path::new("/data/b/metadata.json")));
    }
}
