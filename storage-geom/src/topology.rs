// SPDX-License-Identifier: GPL-3.0-only

//! Topology model construction
//!
//! Resolves every disk a provider reports together with its partitions.
//! Either the whole tree resolves or the build fails; a failed build is
//! surfaced to callers alongside an empty collection so the UI can still run.

use storage_types::{Disk, DiskCollection, Partition, PartitionRecord, parse_integer};

use crate::{Result, TopologyError, TopologyProvider};

/// Query `provider` for all disks and their partitions
pub fn build(provider: &dyn TopologyProvider) -> Result<DiskCollection> {
    let records = provider.list_disks()?;

    let mut disks = Vec::with_capacity(records.len());
    for record in records {
        let partitions = provider
            .list_partitions(&record.name)?
            .into_iter()
            .map(partition_from_record)
            .collect::<Vec<_>>();
        tracing::debug!(
            disk = %record.name,
            partitions = partitions.len(),
            "Resolved disk"
        );
        disks.push(Disk::new(record, partitions));
    }

    tracing::info!(
        provider = provider.name(),
        disks = disks.len(),
        "Built disk topology"
    );

    Ok(DiskCollection::new(disks))
}

/// Like [`build`], but substitutes an empty collection on failure
pub fn build_or_empty(provider: &dyn TopologyProvider) -> (DiskCollection, Option<TopologyError>) {
    match build(provider) {
        Ok(disks) => (disks, None),
        Err(e) => {
            tracing::warn!(provider = provider.name(), "Topology query failed: {}", e);
            (DiskCollection::default(), Some(e))
        }
    }
}

/// Resolve label, type and offsets from a partition's configuration entries
///
/// Missing label or type stay `None`; missing or unparseable offsets become 0.
pub fn partition_from_record(record: PartitionRecord) -> Partition {
    let label = record.config_value("label").map(str::to_string);
    let partition_type = record.config_value("type").map(str::to_string);
    let start = offset(&record, "start");
    let end = offset(&record, "end");

    Partition {
        name: record.name,
        label,
        partition_type,
        size: record.size,
        start,
        end,
    }
}

fn offset(record: &PartitionRecord, key: &str) -> i64 {
    let value = record.config_value(key);
    match value.and_then(parse_integer) {
        Some(offset) => offset,
        None => {
            let error = TopologyError::MalformedAttribute {
                partition: record.name.clone(),
                key: key.to_string(),
                value: value.map(str::to_string),
            };
            tracing::debug!("{}, using 0", error);
            0
        }
    }
}
