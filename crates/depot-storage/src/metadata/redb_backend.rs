// Copyright 2026 The Depot Authors
// SPDX-License-Identifier: Apache-2.0

//! redb-based metadata storage backend.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use depot_core::{Error, MetadataMap, Result};
use redb::{Database, Durability, ReadableDatabase, ReadableTable, TableDefinition};
use tracing::debug;

use super::MetadataBackend;

/// Metadata table: composite key "bucket/name" -> Vec<(String, String)> (bincode)
const METADATA: TableDefinition<'_, &str, &[u8]> = TableDefinition::new("metadata");

/// Convert any error with Display to our Error type.
fn db_err(e: impl std::fmt::Display) -> Error {
    Error::Database(e.to_string())
}

/// redb-based metadata storage.
///
/// One database file for the whole service, opened once at construction
/// and shared process-wide. Each `put` commits its own write transaction,
/// so a metadata write either fully lands or not at all under crash. This
/// does not extend to the content store: content and metadata can still
/// diverge when a crash falls between the two writes.
pub struct RedbMetadataStore {
    db: Arc<Database>,
    durability: Durability,
}

impl RedbMetadataStore {
    /// Open or create a redb database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open(path: &Path) -> Result<Self> {
        debug!(?path, "Opening redb metadata store");

        let db = Database::create(path).map_err(db_err)?;

        // Initialize the table so read transactions never observe a
        // database without it
        {
            let txn = db.begin_write().map_err(db_err)?;
            let _ = txn.open_table(METADATA).map_err(db_err)?;
            txn.commit().map_err(db_err)?;
        }

        Ok(Self { db: Arc::new(db), durability: Durability::Immediate })
    }

    /// Open an in-memory database for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let db = Database::builder()
            .create_with_backend(redb::backends::InMemoryBackend::new())
            .map_err(db_err)?;

        {
            let txn = db.begin_write().map_err(db_err)?;
            let _ = txn.open_table(METADATA).map_err(db_err)?;
            txn.commit().map_err(db_err)?;
        }

        Ok(Self { db: Arc::new(db), durability: Durability::None })
    }

    /// Create a composite key for metadata records: "bucket/name"
    fn record_key(bucket: &str, name: &str) -> String {
        format!("{bucket}/{name}")
    }
}

#[async_trait]
impl MetadataBackend for RedbMetadataStore {
    async fn put(&self, bucket: &str, name: &str, metadata: MetadataMap) -> Result<()> {
        let key = Self::record_key(bucket, name);
        let db = Arc::clone(&self.db);
        let durability = self.durability;

        tokio::task::spawn_blocking(move || {
            let pairs: Vec<(String, String)> = metadata.into_iter().collect();
            let serialized = bincode::serialize(&pairs).map_err(db_err)?;

            let mut txn = db.begin_write().map_err(db_err)?;
            {
                let mut table = txn.open_table(METADATA).map_err(db_err)?;
                table.insert(key.as_str(), serialized.as_slice()).map_err(db_err)?;
            }
            txn.set_durability(durability).map_err(db_err)?;
            txn.commit().map_err(db_err)?;

            Ok(())
        })
        .await
        .map_err(db_err)?
    }

    async fn get(&self, bucket: &str, name: &str) -> Result<MetadataMap> {
        let key = Self::record_key(bucket, name);
        let db = Arc::clone(&self.db);

        let pairs = tokio::task::spawn_blocking(move || {
            let txn = db.begin_read().map_err(db_err)?;
            let table = txn.open_table(METADATA).map_err(db_err)?;

            match table.get(key.as_str()).map_err(db_err)? {
                Some(value) => {
                    bincode::deserialize::<Vec<(String, String)>>(value.value()).map_err(db_err)
                }
                None => Ok(Vec::new()),
            }
        })
        .await
        .map_err(db_err)?;

        // Unreadable records resolve to an empty mapping, same as absence
        match pairs {
            Ok(pairs) => Ok(pairs.into_iter().collect()),
            Err(e) => {
                debug!(bucket, name, error = %e, "Metadata record unreadable, returning empty");
                Ok(MetadataMap::new())
            }
        }
    }

    async fn close(&self) -> Result<()> {
        let db = Arc::clone(&self.db);

        // An empty immediate-durability commit flushes any batched commits.
        // Safe to call more than once; the handle itself is released when
        // the last Arc drops.
        tokio::task::spawn_blocking(move || {
            let mut txn = db.begin_write().map_err(db_err)?;
            txn.set_durability(Durability::Immediate).map_err(db_err)?;
            txn.commit().map_err(db_err)?;
            Ok(())
        })
        .await
        .map_err(db_err)?
    }
}
