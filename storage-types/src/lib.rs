// SPDX-License-Identifier: GPL-3.0-only

//! Canonical domain models for the gerome disk browser
//!
//! These types are shared by the topology adapters (`storage-geom`) and the
//! terminal dashboard (`gerome`):
//!
//! - `DiskRecord` / `PartitionRecord` → raw provider output
//! - `Disk` / `Partition` → resolved model, owned by a `DiskCollection`
//!
//! Formatting helpers for sizes and provider integers live in [`common`].

pub mod common;
pub mod disk;
pub mod partition;

pub use common::{group_digits, humanize_bytes, parse_integer};
pub use disk::{Disk, DiskCollection, DiskRecord};
pub use partition::{Partition, PartitionRecord};
