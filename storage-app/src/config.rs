// SPDX-License-Identifier: GPL-3.0-only

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use storage_geom::SysfsTopology;

const CONFIG_DIR: &str = "gerome";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Eq, PartialEq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LoggingLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LoggingLevel {
    pub fn as_directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Where disk and partition metadata comes from
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Eq, PartialEq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// GEOM on FreeBSD, sysfs elsewhere
    #[default]
    Auto,
    /// FreeBSD GEOM mesh
    Geom,
    /// Linux sysfs and udev database
    Sysfs,
    /// Captured topology file
    Snapshot,
}

/// Browse disks and partitions in the terminal
#[derive(Parser, Debug, Default)]
#[command(name = "gerome")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file [default: $XDG_CONFIG_HOME/gerome/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Topology source
    #[arg(long, value_enum)]
    pub provider: Option<ProviderKind>,

    /// Snapshot file (TOML or JSON) to browse instead of the live system
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// sysfs mount point
    #[arg(long)]
    pub sysfs_root: Option<PathBuf>,

    /// udev database directory
    #[arg(long)]
    pub udev_data: Option<PathBuf>,

    /// Disable colours even when the terminal supports them
    #[arg(long)]
    pub monochrome: bool,

    /// Exit with an error instead of showing an empty list when disks cannot be read
    #[arg(long)]
    pub strict: bool,

    /// Log verbosity
    #[arg(long, value_enum)]
    pub log_level: Option<LoggingLevel>,

    /// Do not write a log file
    #[arg(long)]
    pub no_log_file: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub provider: ProviderKind,
    pub snapshot: Option<PathBuf>,
    pub sysfs_root: PathBuf,
    pub udev_data: PathBuf,
    pub monochrome: bool,
    pub strict: bool,
    pub log_level: LoggingLevel,
    pub log_to_disk: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Auto,
            snapshot: None,
            sysfs_root: PathBuf::from(SysfsTopology::DEFAULT_ROOT),
            udev_data: PathBuf::from(SysfsTopology::DEFAULT_UDEV_DATA),
            monochrome: false,
            strict: false,
            log_level: LoggingLevel::Info,
            log_to_disk: true,
        }
    }
}

impl Config {
    /// Load the config file (explicit or default location) and apply command-line overrides
    ///
    /// A missing default file is not an error; a missing explicit file is.
    pub fn load(args: &Args) -> anyhow::Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_args(args);
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(provider) = args.provider {
            self.provider = provider;
        }
        if let Some(snapshot) = &args.snapshot {
            self.snapshot = Some(snapshot.clone());
        }
        if let Some(root) = &args.sysfs_root {
            self.sysfs_root = root.clone();
        }
        if let Some(udev_data) = &args.udev_data {
            self.udev_data = udev_data.clone();
        }
        if let Some(level) = args.log_level {
            self.log_level = level;
        }
        self.monochrome |= args.monochrome;
        self.strict |= args.strict;
        if args.no_log_file {
            self.log_to_disk = false;
        }
    }

    /// The concrete provider to use, never [`ProviderKind::Auto`]
    pub fn resolved_provider(&self) -> ProviderKind {
        match self.provider {
            ProviderKind::Auto if self.snapshot.is_some() => ProviderKind::Snapshot,
            ProviderKind::Auto if cfg!(target_os = "freebsd") => ProviderKind::Geom,
            ProviderKind::Auto => ProviderKind::Sysfs,
            other => other,
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(config_home).join(CONFIG_DIR).join(CONFIG_FILE));
    }

    std::env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join(CONFIG_DIR)
            .join(CONFIG_FILE)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn parses_all_keys() {
        let config = Config::from_toml_str(
            r#"
            provider = "snapshot"
            snapshot = "/tmp/disks.toml"
            sysfs_root = "/host/sys"
            udev_data = "/host/udev"
            monochrome = true
            strict = true
            log_level = "debug"
            log_to_disk = false
            "#,
        )
        .unwrap();

        assert_eq!(config.provider, ProviderKind::Snapshot);
        assert_eq!(config.snapshot, Some(PathBuf::from("/tmp/disks.toml")));
        assert_eq!(config.sysfs_root, PathBuf::from("/host/sys"));
        assert!(config.monochrome);
        assert!(config.strict);
        assert_eq!(config.log_level, LoggingLevel::Debug);
        assert!(!config.log_to_disk);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_toml_str("colour = true").is_err());
    }

    #[test]
    fn arguments_override_file_values() {
        let mut config = Config::from_toml_str("provider = \"sysfs\"\nlog_level = \"warn\"").unwrap();
        let args = Args::parse_from([
            "gerome",
            "--provider",
            "geom",
            "--log-level",
            "trace",
            "--no-log-file",
            "--monochrome",
        ]);

        config.apply_args(&args);

        assert_eq!(config.provider, ProviderKind::Geom);
        assert_eq!(config.log_level, LoggingLevel::Trace);
        assert!(!config.log_to_disk);
        assert!(config.monochrome);
        assert!(!config.strict);
    }

    #[test]
    fn snapshot_implies_snapshot_provider() {
        let mut config = Config::default();
        config.apply_args(&Args::parse_from(["gerome", "--snapshot", "disks.json"]));

        assert_eq!(config.resolved_provider(), ProviderKind::Snapshot);

        config.provider = ProviderKind::Sysfs;
        assert_eq!(config.resolved_provider(), ProviderKind::Sysfs);
    }

    #[test]
    fn explicit_missing_config_file_is_an_error() {
        let args = Args::parse_from(["gerome", "--config", "/nonexistent/gerome.toml"]);
        assert!(Config::load(&args).is_err());
    }
}
