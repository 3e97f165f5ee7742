// Copyright 2026 The Depot Authors
// SPDX-License-Identifier: Apache-2.0

//! Tool-bridge adapter.
//!
//! Translates a tool name plus a flat string key/value argument map into
//! storage operations and renders plain-text results, for callers that
//! speak a generic tool-invocation protocol rather than the typed RPC
//! surface. The bridge consumes the facade as-is and adds no semantics.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use depot_core::{Error, MetadataMap, Result};
use depot_storage::StorageService;
use tracing::info;

/// Tool-call adapter over the storage service facade.
pub struct ToolBridge {
    service: Arc<StorageService>,
}

impl ToolBridge {
    /// Creates a bridge over the given service.
    #[must_use]
    pub fn new(service: Arc<StorageService>) -> Self {
        Self { service }
    }

    /// Dispatch a tool call. Arguments arrive as a flat string map; the
    /// result is plain text for the calling agent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` for an unknown tool or a missing argument,
    /// otherwise whatever the underlying operation returns.
    pub async fn dispatch(&self, tool: &str, args: &HashMap<String, String>) -> Result<String> {
        info!(tool, "Bridge dispatch");

        match tool {
            "storage_create_bucket" => {
                let name = required(args, "name")?;
                self.service.create_bucket(name).await?;
                Ok(format!("Bucket '{name}' created successfully."))
            }
            "storage_upload" => {
                let bucket = required(args, "bucket")?;
                let name = required(args, "name")?;
                let data = required(args, "data")?;
                self.service
                    .upload_object(
                        bucket,
                        name,
                        Bytes::from(data.as_bytes().to_vec()),
                        MetadataMap::new(),
                    )
                    .await?;
                Ok(format!("Object '{name}' uploaded to bucket '{bucket}'."))
            }
            "storage_get_metadata" => {
                let bucket = required(args, "bucket")?;
                let name = required(args, "name")?;
                let info = self.service.get_object_metadata(bucket, name).await?;
                serde_json::to_string(&info).map_err(|e| Error::Database(e.to_string()))
            }
            "storage_list" => {
                let bucket = required(args, "bucket")?;
                let prefix = args.get("prefix").map(String::as_str).unwrap_or_default();
                let names = self.service.list_objects(bucket, prefix).await?;
                serde_json::to_string(&names).map_err(|e| Error::Database(e.to_string()))
            }
            "storage_download_url" => {
                let bucket = required(args, "bucket")?;
                let name = required(args, "name")?;
                self.service.download_locator(bucket, name).await
            }
            _ => Err(Error::InvalidRequest(format!("unknown tool: {tool}"))),
        }
    }
}

fn required<'a>(args: &'a HashMap<String, String>, key: &str) -> Result<&'a str> {
    args.get(key)
        .map(String::as_str)
        .ok_or_else(|| Error::InvalidRequest(format!("missing argument: {key}")))
}
