// SPDX-License-Identifier: GPL-3.0-only

use thiserror::Error;

/// Error types for topology queries
#[derive(Error, Debug)]
pub enum TopologyError {
    /// The provider could not produce a tree at all
    #[error("Topology unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed GEOM tree: {0}")]
    Xml(String),

    #[error("Invalid snapshot: {0}")]
    Snapshot(String),

    /// A partition attribute was absent or unparseable; callers substitute a default
    #[error("Malformed attribute {key}={value:?} on {partition}")]
    MalformedAttribute {
        partition: String,
        key: String,
        value: Option<String>,
    },
}

/// Result type alias for topology operations
pub type Result<T> = std::result::Result<T, TopologyError>;
