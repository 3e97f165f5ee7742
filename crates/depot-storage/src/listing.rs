// Copyright 2026 The Depot Authors
// SPDX-License-Identifier: Apache-2.0

//! Recursive prefix listing over a bucket directory.

use std::path::{Path, PathBuf};

use depot_core::{Error, Result};
use walkdir::WalkDir;

use crate::metadata::is_sidecar;

/// Enumerates object names under a bucket directory, filtered by prefix.
///
/// Names are paths relative to the bucket root. An entry is included when
/// the prefix is empty or the relative name starts with it byte-wise; no
/// glob semantics. Sidecar metadata files never appear in results. The
/// returned names are sorted lexicographically ascending.
///
/// A nonexistent bucket yields an empty list, not an error; the listing
/// engine does not require bucket existence. Entries that fail to stat
/// during the walk are skipped.
///
/// # Errors
///
/// Returns an error only if the blocking walk task cannot be joined.
pub async fn list_objects(bucket_dir: &Path, prefix: &str) -> Result<Vec<String>> {
    let bucket_dir: PathBuf = bucket_dir.to_path_buf();
    let prefix = prefix.to_string();

    tokio::task::spawn_blocking(move || {
        if !bucket_dir.is_dir() {
            return Vec::new();
        }

        let mut names: Vec<String> = WalkDir::new(&bucket_dir)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| !is_sidecar(entry.path()))
            .filter_map(|entry| {
                let rel = entry.path().strip_prefix(&bucket_dir).ok()?;
                Some(rel.to_string_lossy().into_owned())
            })
            .filter(|name| prefix.is_empty() || name.starts_with(&prefix))
            .collect();

        names.sort();
        names
    })
    .await
    .map_err(|e| Error::Database(e.to_string()))
}
