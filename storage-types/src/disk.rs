// SPDX-License-Identifier: GPL-3.0-only

//! Disk data models
//!
//! A [`DiskCollection`] owns its [`Disk`]s and every disk owns its
//! [`Partition`]s. Dropping or releasing the collection tears the whole tree
//! down; there is no shared ownership anywhere in the model.

use serde::{Deserialize, Serialize};

use crate::Partition;

/// Raw disk metadata as reported by a topology provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiskRecord {
    /// Provider name (e.g. "da0", "nvme0n1")
    pub name: String,

    /// Media size in bytes
    pub size: u64,

    /// Logical sector size in bytes
    pub sector_size: u64,
}

/// A block device and the partitions found on it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Disk {
    /// Device name (e.g. "da0")
    pub name: String,

    /// Total size in bytes
    pub size: u64,

    /// Sector size in bytes
    pub sector_size: u64,

    /// Partitions in provider enumeration order
    pub partitions: Vec<Partition>,
}

impl Disk {
    pub fn new(record: DiskRecord, partitions: Vec<Partition>) -> Self {
        Self {
            name: record.name,
            size: record.size,
            sector_size: record.sector_size,
            partitions,
        }
    }

    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }
}

/// Ordered set of disks, in the order the provider enumerated them
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiskCollection {
    disks: Vec<Disk>,
}

impl DiskCollection {
    pub fn new(disks: Vec<Disk>) -> Self {
        Self { disks }
    }

    /// Number of disks. Always equal to the length of [`Self::iter`].
    pub fn count(&self) -> usize {
        self.disks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Disk> {
        self.disks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Disk> {
        self.disks.iter()
    }

    /// Drop every disk and partition. Releasing an empty collection is a no-op.
    pub fn release(&mut self) {
        self.disks.clear();
        self.disks.shrink_to_fit();
    }
}

impl<'a> IntoIterator for &'a DiskCollection {
    type Item = &'a Disk;
    type IntoIter = std::slice::Iter<'a, Disk>;

    fn into_iter(self) -> Self::IntoIter {
        self.disks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disk(name: &str, partitions: usize) -> Disk {
        let record = DiskRecord {
            name: name.to_string(),
            size: 500_000_000_000,
            sector_size: 512,
        };
        let partitions = (0..partitions)
            .map(|i| Partition {
                name: format!("{name}p{}", i + 1),
                label: None,
                partition_type: None,
                size: 1024,
                start: 0,
                end: 0,
            })
            .collect();
        Disk::new(record, partitions)
    }

    #[test]
    fn count_tracks_contents() {
        let collection = DiskCollection::new(vec![disk("da0", 2), disk("da1", 0)]);

        assert_eq!(collection.count(), 2);
        assert_eq!(collection.iter().count(), collection.count());
        assert_eq!(collection.get(0).map(Disk::partition_count), Some(2));
        assert_eq!(collection.get(1).map(Disk::partition_count), Some(0));
        assert!(collection.get(2).is_none());
    }

    #[test]
    fn release_is_idempotent() {
        let mut collection = DiskCollection::new(vec![disk("da0", 3)]);

        collection.release();
        assert_eq!(collection.count(), 0);
        assert!(collection.is_empty());

        collection.release();
        assert_eq!(collection.count(), 0);
    }

    #[test]
    fn release_on_default_collection_is_noop() {
        let mut collection = DiskCollection::default();
        collection.release();
        assert!(collection.is_empty());
    }
}
