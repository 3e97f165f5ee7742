//! Metadata persistence backends.
//!
//! This module provides the [`MetadataBackend`] trait and two
//! implementations with the same contract but different durability:
//! - [`RedbMetadataStore`]: one embedded database at the storage root,
//!   each write committed atomically (default)
//! - [`SidecarMetadataStore`]: a `.metadata.json` file next to each
//!   object's content, plain overwrite
//!
//! Reads never fail on absent or unreadable metadata; both backends
//! resolve those cases to an empty mapping. Metadata is best-effort
//! annotation, never load-bearing for existence checks.

mod backend;
mod redb_backend;
mod sidecar_backend;

pub use backend::MetadataBackend;
pub use redb_backend::RedbMetadataStore;
pub use sidecar_backend::{SidecarMetadataStore, SIDECAR_SUFFIX};

pub(crate) use sidecar_backend::is_sidecar;
