//! Error types for the load/save boundary and configuration.
//!
//! The engine core (projection, layout, hit-testing) never fails; only
//! reading data from outside the process can.

use std::path::PathBuf;

/// Failure while obtaining a hierarchy from the host.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read outline {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed outline {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("hierarchy source has no root node")]
    EmptyDocument,
}

/// Failure while reading a [`ViewConfig`](crate::config::ViewConfig) file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure while writing node positions for the host.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("failed to write positions to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode positions: {0}")]
    Encode(#[from] serde_json::Error),
}
