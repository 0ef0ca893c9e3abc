// SPDX-License-Identifier: GPL-3.0-only

use storage_types::{DiskRecord, PartitionRecord};

use crate::Result;

/// Source of disk and partition metadata
///
/// Implementations return snapshots; the topology model queries each one
/// exactly once at startup and never re-queries mid-frame.
pub trait TopologyProvider {
    /// Short identifier used in logs ("geom", "sysfs", ...)
    fn name(&self) -> &'static str;

    /// Every disk in enumeration order
    fn list_disks(&self) -> Result<Vec<DiskRecord>>;

    /// Partitions of `disk` in enumeration order; empty when the disk is not partitioned
    fn list_partitions(&self, disk: &str) -> Result<Vec<PartitionRecord>>;
}

impl<P: TopologyProvider + ?Sized> TopologyProvider for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn list_disks(&self) -> Result<Vec<DiskRecord>> {
        (**self).list_disks()
    }

    fn list_partitions(&self, disk: &str) -> Result<Vec<PartitionRecord>> {
        (**self).list_partitions(disk)
    }
}
