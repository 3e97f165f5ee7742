// Copyright 2026 The Depot Authors
// SPDX-License-Identifier: Apache-2.0

//! Common types used throughout Depot.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Per-object key/value annotations. Insertion order is irrelevant.
pub type MetadataMap = HashMap<String, String>;

/// Descriptive information for a stored object.
///
/// Size is derived from the content bytes at read time, never stored
/// independently. The metadata mapping defaults to empty for objects that
/// were uploaded without one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Bucket the object lives in.
    pub bucket: String,
    /// Object name, relative to the bucket root. May contain `/`.
    pub name: String,
    /// Content size in bytes.
    pub size: u64,
    /// Custom user metadata.
    #[serde(default)]
    pub metadata: MetadataMap,
}

impl ObjectInfo {
    /// Creates object info with an empty metadata mapping.
    #[must_use]
    pub fn new(bucket: impl Into<String>, name: impl Into<String>, size: u64) -> Self {
        Self { bucket: bucket.into(), name: name.into(), size, metadata: MetadataMap::new() }
    }

    /// Sets the metadata mapping.
    #[must_use]
    pub fn with_metadata(mut self, metadata: MetadataMap) -> Self {
        self.metadata = metadata;
        self
    }
}
