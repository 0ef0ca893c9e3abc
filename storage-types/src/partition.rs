// SPDX-License-Identifier: GPL-3.0-only

//! Partition data models

use serde::{Deserialize, Serialize};

/// Raw partition metadata as reported by a topology provider
///
/// `config` holds the provider's key/value configuration entries verbatim,
/// in the order they were reported (e.g. `("start", "40")`, `("type", "freebsd-ufs")`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartitionRecord {
    /// Provider name (e.g. "da0p1")
    pub name: String,

    /// Media size in bytes
    pub size: u64,

    /// Configuration entries
    pub config: Vec<(String, String)>,
}

impl PartitionRecord {
    /// Value of the configuration entry named `key`; a later duplicate overrides an earlier one
    pub fn config_value(&self, key: &str) -> Option<&str> {
        self.config
            .iter()
            .rev()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

/// A typed byte range on a disk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Partition {
    /// Device name (e.g. "da0p1")
    pub name: String,

    /// Partition label, if the scheme carries one
    pub label: Option<String>,

    /// Partition type tag (e.g. "freebsd-ufs")
    pub partition_type: Option<String>,

    /// Size in bytes
    pub size: u64,

    /// First sector
    pub start: i64,

    /// Last sector
    pub end: i64,
}

impl Partition {
    /// Sector span between start and end offsets, never negative
    pub fn sectors(&self) -> i64 {
        self.end.saturating_sub(self.start).max(0)
    }
}
