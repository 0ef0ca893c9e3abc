// SPDX-License-Identifier: GPL-3.0-only

use storage_geom::{
    GeomTopology, SnapshotTopology, SysfsTopology, TopologyError, TopologyProvider,
};

use crate::config::{Config, ProviderKind};

/// Construct the topology provider selected by `config`
pub fn open(config: &Config) -> storage_geom::Result<Box<dyn TopologyProvider>> {
    let provider: Box<dyn TopologyProvider> = match config.resolved_provider() {
        ProviderKind::Geom => Box::new(GeomTopology::new()),
        ProviderKind::Sysfs | ProviderKind::Auto => Box::new(SysfsTopology::new(
            config.sysfs_root.clone(),
            config.udev_data.clone(),
        )),
        ProviderKind::Snapshot => {
            let path = config.snapshot.as_deref().ok_or_else(|| {
                TopologyError::Unavailable("no snapshot file configured".to_string())
            })?;
            Box::new(SnapshotTopology::load(path)?)
        }
    };

    tracing::info!(provider = provider.name(), "Using topology provider");
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn snapshot_without_path_is_unavailable() {
        let config = Config {
            provider: ProviderKind::Snapshot,
            ..Config::default()
        };

        assert!(matches!(open(&config), Err(TopologyError::Unavailable(_))));
    }

    #[test]
    fn opens_configured_provider() {
        let config = Config {
            provider: ProviderKind::Sysfs,
            sysfs_root: PathBuf::from("/nonexistent"),
            ..Config::default()
        };

        assert_eq!(open(&config).unwrap().name(), "sysfs");
    }
}
