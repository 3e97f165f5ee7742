// Copyright 2026 The Depot Authors
// SPDX-License-Identifier: Apache-2.0

//! Local filesystem storage for object content.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use depot_core::{Error, Result};
use tokio::fs;

/// Filesystem-backed content store.
///
/// One directory per bucket under the root; object content at
/// `<root>/<bucket>/<name>`, where the name may contain `/` and implies
/// intermediate directories. The store holds no in-memory state; every
/// operation touches the filesystem directly.
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    /// Creates a content store rooted at the given directory.
    ///
    /// The directory itself is created lazily by [`Self::init`].
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Ensures the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// The storage root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The backing directory for a bucket.
    #[must_use]
    pub fn bucket_path(&self, bucket: &str) -> PathBuf {
        self.root.join(bucket)
    }

    /// The backing file path for an object.
    #[must_use]
    pub fn object_path(&self, bucket: &str, name: &str) -> PathBuf {
        self.bucket_path(bucket).join(name)
    }

    /// Creates the bucket directory. Idempotent: creating an existing
    /// bucket succeeds and has no effect. Bucket names are not validated
    /// beyond what the filesystem itself accepts.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying directory creation fails.
    pub async fn create_bucket(&self, name: &str) -> Result<()> {
        fs::create_dir_all(self.bucket_path(name)).await?;
        Ok(())
    }

    /// Returns whether the bucket directory exists.
    #[must_use]
    pub fn bucket_exists(&self, bucket: &str) -> bool {
        self.bucket_path(bucket).exists()
    }

    /// Writes object content, fully replacing any prior content at the
    /// same (bucket, name). Intermediate directories implied by a nested
    /// name are created. A crash mid-write may leave a partial object.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the bucket does not exist, or an I/O error
    /// if the write fails.
    pub async fn put(&self, bucket: &str, name: &str, data: Bytes) -> Result<()> {
        if !self.bucket_exists(bucket) {
            return Err(Error::not_found_resource(
                format!("bucket not found: {bucket}"),
                bucket,
            ));
        }

        let path = self.object_path(bucket, name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&path, &data).await?;
        Ok(())
    }

    /// Returns the object's content size from a filesystem stat.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the object does not exist.
    pub async fn size(&self, bucket: &str, name: &str) -> Result<u64> {
        let path = self.object_path(bucket, name);
        let meta = fs::metadata(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::not_found_resource(
                    format!("object not found: {bucket}/{name}"),
                    format!("{bucket}/{name}"),
                )
            } else {
                Error::Io(e)
            }
        })?;
        Ok(meta.len())
    }

    /// Returns whether the object exists.
    #[must_use]
    pub fn exists(&self, bucket: &str, name: &str) -> bool {
        self.object_path(bucket, name).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_store() -> (ContentStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = ContentStore::new(temp_dir.path().join("data"));
        store.init().await.unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_create_bucket_is_idempotent() {
        let (store, _temp) = create_test_store().await;

        store.create_bucket("bucket").await.unwrap();
        store.create_bucket("bucket").await.unwrap();
        assert!(store.bucket_exists("bucket"));
    }

    #[tokio::test]
    async fn test_put_requires_bucket() {
        let (store, _temp) = create_test_store().await;

        let err = store.put("missing", "obj", Bytes::from_static(b"x")).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(!store.exists("missing", "obj"));
    }

    #[tokio::test]
    async fn test_put_and_stat() {
        let (store, _temp) = create_test_store().await;

        store.create_bucket("bucket").await.unwrap();
        store.put("bucket", "hello.txt", Bytes::from_static(b"Hello, World!")).await.unwrap();

        assert!(store.exists("bucket", "hello.txt"));
        assert_eq!(store.size("bucket", "hello.txt").await.unwrap(), 13);
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let (store, _temp) = create_test_store().await;

        store.create_bucket("bucket").await.unwrap();
        store.put("bucket", "obj", Bytes::from_static(b"first version")).await.unwrap();
        store.put("bucket", "obj", Bytes::from_static(b"second")).await.unwrap();

        assert_eq!(store.size("bucket", "obj").await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_nested_name_creates_directories() {
        let (store, _temp) = create_test_store().await;

        store.create_bucket("bucket").await.unwrap();
        store.put("bucket", "a/b/c.bin", Bytes::from_static(b"deep")).await.unwrap();

        assert!(store.exists("bucket", "a/b/c.bin"));
        assert_eq!(store.size("bucket", "a/b/c.bin").await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_size_of_missing_object() {
        let (store, _temp) = create_test_store().await;

        store.create_bucket("bucket").await.unwrap();
        let err = store.size("bucket", "nope").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
