//! Core types and utilities for Depot object storage.
//!
//! This crate provides the fundamental building blocks used across all Depot
//! components:
//! - Configuration management
//! - Error types shared by the storage engine and the RPC layer
//! - Common data types (object info, metadata mappings)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, LogFormat, MetadataBackendKind, StorageConfig};
pub use error::{Error, Result};
pub use types::{MetadataMap, ObjectInfo};
