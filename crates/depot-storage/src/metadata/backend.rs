//! Metadata backend trait definition.

use async_trait::async_trait;
use depot_core::{MetadataMap, Result};

/// Trait for metadata persistence backends.
///
/// Implementations store one string→string mapping per (bucket, name)
/// pair, independently of the object's content bytes. A metadata write is
/// not atomic jointly with the content write; a crash between the two can
/// leave content without metadata or vice versa.
///
/// All operations are async to support both blocking backends (via
/// `spawn_blocking`) and truly async ones.
#[async_trait]
pub trait MetadataBackend: Send + Sync + 'static {
    /// Store the mapping for an object, replacing any prior mapping
    /// wholesale.
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping cannot be persisted.
    async fn put(&self, bucket: &str, name: &str, metadata: MetadataMap) -> Result<()>;

    /// Get the mapping for an object.
    ///
    /// Returns an empty mapping when no metadata was ever written for the
    /// pair, and also when the stored record cannot be read or decoded.
    /// Absence of metadata is not a failure condition.
    ///
    /// # Errors
    ///
    /// Never errors on missing or unreadable metadata; an error here means
    /// the backend itself could not be consulted at all.
    async fn get(&self, bucket: &str, name: &str) -> Result<MetadataMap>;

    /// Release or flush the backend's process-wide resource.
    ///
    /// Idempotent; called once on shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the final flush fails.
    async fn close(&self) -> Result<()>;
}
