// Copyright 2026 The Depot Authors
// SPDX-License-Identifier: Apache-2.0

//! gRPC transport for Depot object storage.
//!
//! This crate maps the five storage operations onto wire calls, assigns
//! transport-level status codes to the NotFound/Internal error taxonomy,
//! serves a health probe, and hosts the tool-bridge adapter. It adds no
//! semantics of its own; all behavior lives in [`depot_storage`].

#![deny(unsafe_code)]

pub mod bridge;
pub mod service;

/// Generated gRPC client and server code.
pub mod proto {
    tonic::include_proto!("depot.storage.v1");
}

pub use bridge::ToolBridge;
pub use service::StorageRpc;
