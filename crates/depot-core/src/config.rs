//! Configuration management for Depot.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Main configuration for the Depot server.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(crate::Error::Io)?;
        toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string cannot be parsed.
    pub fn parse(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Load configuration from an optional file path, falling back to
    /// defaults when no path is given.
    ///
    /// # Errors
    ///
    /// Returns an error if a path is given but cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind the gRPC server to.
    pub bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: "127.0.0.1:8091".parse().expect("valid default address") }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Root directory under which bucket directories are created.
    pub root_dir: PathBuf,
    /// Which metadata persistence backend to use.
    pub metadata_backend: MetadataBackendKind,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { root_dir: PathBuf::from("./depot-data"), metadata_backend: MetadataBackendKind::Database }
    }
}

/// Metadata persistence backend selection.
///
/// Both backends satisfy the same contract; they differ in durability under
/// crash. The embedded database commits each metadata write atomically,
/// sidecar files are plain overwrites next to the object content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MetadataBackendKind {
    /// Embedded transactional key-value store at the storage root.
    #[default]
    Database,
    /// Per-object `.metadata.json` sidecar files.
    Sidecar,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g. `info`, `depot_storage=debug`).
    pub level: String,
    /// Log output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: LogFormat::Pretty }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output.
    #[default]
    Pretty,
    /// Newline-delimited JSON.
    Json,
}
