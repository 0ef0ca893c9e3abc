// SPDX-License-Identifier: GPL-3.0-only

//! Linux sysfs adapter
//!
//! Disks are the entries of `/sys/block`; partitions are the sub-directories
//! carrying a `partition` file. sysfs reports sizes and offsets in 512-byte
//! units regardless of the device's logical block size, so offsets are
//! rescaled to logical sectors to match what GEOM reports. Labels and type
//! tags come from the udev database when it has seen the device.

use std::fs;
use std::path::{Path, PathBuf};

use storage_types::{DiskRecord, PartitionRecord};

use crate::{Result, TopologyError, TopologyProvider};

const SYSFS_UNIT: u64 = 512;
const UDEV_LABEL: &str = "E:ID_PART_ENTRY_NAME=";
const UDEV_TYPE: &str = "E:ID_PART_ENTRY_TYPE=";

/// Topology provider backed by sysfs and the udev database
#[derive(Debug, Clone)]
pub struct SysfsTopology {
    root: PathBuf,
    udev_data: PathBuf,
}

impl Default for SysfsTopology {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ROOT, Self::DEFAULT_UDEV_DATA)
    }
}

impl SysfsTopology {
    pub const DEFAULT_ROOT: &'static str = "/sys";
    pub const DEFAULT_UDEV_DATA: &'static str = "/run/udev/data";

    pub fn new(root: impl Into<PathBuf>, udev_data: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            udev_data: udev_data.into(),
        }
    }

    fn block_dir(&self) -> PathBuf {
        self.root.join("block")
    }

    fn udev_entries(&self, device_dir: &Path) -> Vec<String> {
        let Some(dev) = read_trimmed(&device_dir.join("dev")) else {
            return Vec::new();
        };

        match fs::read_to_string(self.udev_data.join(format!("b{dev}"))) {
            Ok(contents) => contents.lines().map(str::to_string).collect(),
            Err(e) => {
                tracing::trace!("No udev data for {}: {}", dev, e);
                Vec::new()
            }
        }
    }
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|contents| contents.trim().to_string())
}

fn read_u64(path: &Path) -> Option<u64> {
    read_trimmed(path)?.parse().ok()
}

/// Convert a sysfs count of 512-byte units to bytes; overflowing values are dropped
fn units_to_bytes(path: &Path) -> Option<u64> {
    let units = read_u64(path)?;
    let bytes = units.checked_mul(SYSFS_UNIT);
    if bytes.is_none() {
        tracing::debug!("Ignoring out of range value {} in {}", units, path.display());
    }
    bytes
}

fn sorted_entries(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        entries.push((entry.file_name().to_string_lossy().into_owned(), entry.path()));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}

impl TopologyProvider for SysfsTopology {
    fn name(&self) -> &'static str {
        "sysfs"
    }

    fn list_disks(&self) -> Result<Vec<DiskRecord>> {
        let block_dir = self.block_dir();
        let entries = sorted_entries(&block_dir).map_err(|e| {
            TopologyError::Unavailable(format!("cannot read {}: {}", block_dir.display(), e))
        })?;

        let mut disks = Vec::new();
        for (name, path) in entries {
            let size = units_to_bytes(&path.join("size")).unwrap_or(0);
            if size == 0 {
                tracing::trace!("Skipping empty block device {}", name);
                continue;
            }

            let sector_size = read_u64(&path.join("queue").join("logical_block_size"))
                .filter(|size| *size > 0)
                .unwrap_or(SYSFS_UNIT);

            disks.push(DiskRecord {
                name,
                size,
                sector_size,
            });
        }

        Ok(disks)
    }

    fn list_partitions(&self, disk: &str) -> Result<Vec<PartitionRecord>> {
        let disk_dir = self.block_dir().join(disk);
        if !disk_dir.is_dir() {
            return Ok(Vec::new());
        }

        let sector_size = read_u64(&disk_dir.join("queue").join("logical_block_size"))
            .filter(|size| *size > 0)
            .unwrap_or(SYSFS_UNIT);

        let mut partitions = Vec::new();
        for (name, path) in sorted_entries(&disk_dir)? {
            let Some(number) = read_u64(&path.join("partition")) else {
                continue;
            };

            let mut config = Vec::new();
            let size = units_to_bytes(&path.join("size"));
            if let Some(start) = units_to_bytes(&path.join("start")) {
                let start = start / sector_size;
                let sectors = size.unwrap_or(0) / sector_size;
                match start.checked_add(sectors.saturating_sub(1)) {
                    Some(end) => {
                        config.push(("start".to_string(), start.to_string()));
                        config.push(("end".to_string(), end.to_string()));
                    }
                    None => tracing::debug!("Partition {} ends past the addressable range", name),
                }
            }
            config.push(("index".to_string(), number.to_string()));

            for line in self.udev_entries(&path) {
                if let Some(label) = line.strip_prefix(UDEV_LABEL) {
                    config.push(("label".to_string(), label.to_string()));
                } else if let Some(kind) = line.strip_prefix(UDEV_TYPE) {
                    config.push(("type".to_string(), kind.to_string()));
                }
            }

            partitions.push((
                number,
                PartitionRecord {
                    name,
                    size: size.unwrap_or(0),
                    config,
                },
            ));
        }

        partitions.sort_by_key(|(number, _)| *number);
        Ok(partitions.into_iter().map(|(_, record)| record).collect())
    }
}
