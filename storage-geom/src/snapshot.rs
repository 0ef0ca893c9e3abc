// SPDX-License-Identifier: GPL-3.0-only

//! Snapshot adapter
//!
//! Serves a topology captured in a TOML or JSON document:
//!
//! ```toml
//! [[disks]]
//! name = "da0"
//! size = 500000000000
//! sector_size = 512
//!
//! [[disks.partitions]]
//! name = "da0p1"
//! size = 512000000
//! config = { label = "root", type = "freebsd-ufs", start = 40, end = "0xF4240" }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use storage_types::{DiskRecord, PartitionRecord};

use crate::{Result, TopologyError, TopologyProvider};

#[derive(Debug, Deserialize)]
struct SnapshotDocument {
    #[serde(default)]
    disks: Vec<SnapshotDisk>,
}

#[derive(Debug, Deserialize)]
struct SnapshotDisk {
    name: String,
    size: u64,
    #[serde(default = "default_sector_size")]
    sector_size: u64,
    #[serde(default)]
    partitions: Vec<SnapshotPartition>,
}

#[derive(Debug, Deserialize)]
struct SnapshotPartition {
    name: String,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    config: BTreeMap<String, ConfigValue>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ConfigValue {
    Integer(i64),
    Text(String),
}

impl std::fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

fn default_sector_size() -> u64 {
    512
}

/// Topology provider serving a fixed, in-memory topology
#[derive(Debug, Clone, Default)]
pub struct SnapshotTopology {
    disks: Vec<(DiskRecord, Vec<PartitionRecord>)>,
}

impl SnapshotTopology {
    pub fn new(disks: Vec<(DiskRecord, Vec<PartitionRecord>)>) -> Self {
        Self { disks }
    }

    /// Load a snapshot file; `.json` files are parsed as JSON, everything else as TOML
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            TopologyError::Unavailable(format!("cannot read snapshot {}: {}", path.display(), e))
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            _ => Self::from_toml_str(&contents),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let document: SnapshotDocument =
            toml::from_str(contents).map_err(|e| TopologyError::Snapshot(e.to_string()))?;
        Ok(Self::from_document(document))
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        let document: SnapshotDocument =
            serde_json::from_str(contents).map_err(|e| TopologyError::Snapshot(e.to_string()))?;
        Ok(Self::from_document(document))
    }

    fn from_document(document: SnapshotDocument) -> Self {
        let disks = document
            .disks
            .into_iter()
            .map(|disk| {
                let partitions = disk
                    .partitions
                    .into_iter()
                    .map(|partition| PartitionRecord {
                        name: partition.name,
                        size: partition.size,
                        config: partition
                            .config
                            .into_iter()
                            .map(|(key, value)| (key, value.to_string()))
                            .collect(),
                    })
                    .collect();
                let record = DiskRecord {
                    name: disk.name,
                    size: disk.size,
                    sector_size: disk.sector_size,
                };
                (record, partitions)
            })
            .collect();

        Self { disks }
    }
}

impl TopologyProvider for SnapshotTopology {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn list_disks(&self) -> Result<Vec<DiskRecord>> {
        Ok(self.disks.iter().map(|(disk, _)| disk.clone()).collect())
    }

    fn list_partitions(&self, disk: &str) -> Result<Vec<PartitionRecord>> {
        Ok(self
            .disks
            .iter()
            .filter(|(record, _)| record.name == disk)
            .flat_map(|(_, partitions)| partitions.iter().cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_toml_with_mixed_config_values() {
        let snapshot = SnapshotTopology::from_toml_str(
            r#"
            [[disks]]
            name = "da0"
            size = 500000000000

            [[disks.partitions]]
            name = "da0p1"
            size = 1024
            config = { label = "root", start = 40, end = "0xF4240" }

            [[disks]]
            name = "da1"
            size = 1000000000000
            sector_size = 4096
            "#,
        )
        .unwrap();

        let disks = snapshot.list_disks().unwrap();
        assert_eq!(disks.len(), 2);
        assert_eq!(disks[0].sector_size, 512);
        assert_eq!(disks[1].sector_size, 4096);

        let partitions = snapshot.list_partitions("da0").unwrap();
        assert_eq!(partitions[0].config_value("start"), Some("40"));
        assert_eq!(partitions[0].config_value("end"), Some("0xF4240"));
        assert_eq!(partitions[0].config_value("label"), Some("root"));
        assert!(snapshot.list_partitions("da1").unwrap().is_empty());
    }

    #[test]
    fn parses_json() {
        let snapshot = SnapshotTopology::from_json_str(
            r#"{"disks":[{"name":"nvme0n1","size":2048,"partitions":[{"name":"nvme0n1p1","config":{"type":"efi"}}]}]}"#,
        )
        .unwrap();

        let partitions = snapshot.list_partitions("nvme0n1").unwrap();
        assert_eq!(partitions[0].size, 0);
        assert_eq!(partitions[0].config_value("type"), Some("efi"));
    }

    #[test]
    fn rejects_documents_missing_required_fields() {
        assert!(matches!(
            SnapshotTopology::from_toml_str("[[disks]]\nname = \"da0\"\n"),
            Err(TopologyError::Snapshot(_))
        ));
    }

    #[test]
    fn missing_file_is_unavailable() {
        assert!(matches!(
            SnapshotTopology::load(Path::new("/nonexistent/gerome-snapshot.toml")),
            Err(TopologyError::Unavailable(_))
        ));
    }
}
