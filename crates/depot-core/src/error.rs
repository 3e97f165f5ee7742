// Copyright 2026 The Depot Authors
// SPDX-License-Identifier: Apache-2.0

//! Error types for Depot.
//!
//! The storage engine distinguishes exactly two caller-visible failure
//! classes: the addressed bucket or object does not exist (`NotFound`), and
//! everything else (I/O, database, configuration), which the transport layer
//! reports as an internal error. Neither class is retried anywhere in the
//! engine.

use thiserror::Error;

/// A specialized `Result` type for Depot operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during Depot operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The addressed bucket or object does not exist.
    #[error("not found: {message}")]
    NotFound {
        /// A human-readable error message.
        message: String,
        /// The resource that was addressed (bucket name, object name).
        resource: Option<String>,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Metadata database error.
    #[error("database error: {0}")]
    Database(String),

    /// Invalid request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound { message: message.into(), resource: None }
    }

    /// Creates a new `NotFound` error naming the missing resource.
    #[must_use]
    pub fn not_found_resource(message: impl Into<String>, resource: impl Into<String>) -> Self {
        Self::NotFound { message: message.into(), resource: Some(resource.into()) }
    }

    /// Returns whether this error is a `NotFound`.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
