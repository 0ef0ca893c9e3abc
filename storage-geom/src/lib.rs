// SPDX-License-Identifier: GPL-3.0-only

//! Disk topology adapters
//!
//! This crate turns an OS-level view of block devices into the
//! `storage_types` model:
//!
//! - [`GeomTopology`]: FreeBSD GEOM mesh (`kern.geom.confxml`)
//! - [`SysfsTopology`]: Linux `/sys/block` plus the udev database
//! - [`SnapshotTopology`]: a captured topology from a TOML or JSON file
//!
//! All adapters implement [`TopologyProvider`]; [`build`] resolves a
//! provider into a `DiskCollection`.

pub mod error;
pub mod geom;
pub mod provider;
pub mod snapshot;
pub mod sysfs;
pub mod topology;

pub use error::{Result, TopologyError};
pub use geom::{GeomTopology, GeomTree};
pub use provider::TopologyProvider;
pub use snapshot::SnapshotTopology;
pub use sysfs::SysfsTopology;
pub use topology::{build, build_or_empty, partition_from_record};
