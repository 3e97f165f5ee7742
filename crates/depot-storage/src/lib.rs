// Copyright 2026 The Depot Authors
// SPDX-License-Identifier: Apache-2.0

//! Storage engine for Depot object storage.
//!
//! This crate provides:
//! - Local filesystem storage for object content
//! - Metadata persistence behind a uniform backend trait (embedded
//!   database or per-object sidecar files)
//! - Recursive prefix listing
//! - Download locator resolution
//! - The [`StorageService`] facade composing the above

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod content;
pub mod listing;
pub mod locator;
pub mod metadata;
pub mod service;

pub use content::ContentStore;
pub use locator::{FileLocator, LocatorStrategy};
pub use metadata::{MetadataBackend, RedbMetadataStore, SidecarMetadataStore};
pub use service::StorageService;
