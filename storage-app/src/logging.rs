// SPDX-License-Identifier: GPL-3.0-only

//! File logging
//!
//! The terminal belongs to the dashboard while it runs, so logs only ever go
//! to a daily rolling file.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::{Duration, SystemTime};

use anyhow::Context;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::Config;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const DEFAULT_LOG_PREFIX: &str = "gerome.log";
const KEEP_DAYS: u64 = 7;

/// Install the file subscriber unless `log_to_disk` is off
///
/// Failures are reported on stderr before the terminal is taken over; the
/// dashboard runs without logs rather than refusing to start.
pub fn init(config: &Config) {
    if !config.log_to_disk {
        return;
    }

    if let Err(e) = try_init(config) {
        eprintln!("gerome: file logging disabled: {e:#}");
    }
}

fn try_init(config: &Config) -> anyhow::Result<()> {
    let level = config.log_level.as_directive();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gerome={level},storage_geom={level},warn")));

    let (writer, guard) = file_writer()?;
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .context("a global subscriber is already set")?;

    // The guard flushes pending lines when dropped.
    let _ = LOG_GUARD.set(guard);
    Ok(())
}

/// Where the rolling appender writes: a directory and a file name prefix
#[derive(Debug, Clone, PartialEq, Eq)]
struct LogLocation {
    dir: PathBuf,
    prefix: OsString,
}

impl LogLocation {
    fn resolve() -> Self {
        let default_prefix = || OsString::from(DEFAULT_LOG_PREFIX);

        if let Some(file) = std::env::var_os("GEROME_LOG_FILE").map(PathBuf::from) {
            return Self {
                dir: match file.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                    _ => state_dir(),
                },
                prefix: file.file_name().map_or_else(default_prefix, OsString::from),
            };
        }

        let dir = std::env::var_os("GEROME_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(state_dir);
        Self {
            dir,
            prefix: default_prefix(),
        }
    }
}

fn file_writer() -> anyhow::Result<(NonBlocking, WorkerGuard)> {
    let LogLocation { dir, prefix } = LogLocation::resolve();

    fs::create_dir_all(&dir)
        .with_context(|| format!("cannot create log directory {}", dir.display()))?;
    cleanup_old_logs(&dir, &prefix);

    Ok(tracing_appender::non_blocking(
        tracing_appender::rolling::daily(&dir, &prefix),
    ))
}

/// `$XDG_STATE_HOME/gerome/logs`, falling back to `~/.local/state` and then `/tmp`
fn state_dir() -> PathBuf {
    let base = std::env::var_os("XDG_STATE_HOME")
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local/state"))
        })
        .unwrap_or_else(|| PathBuf::from("/tmp"));

    base.join("gerome").join("logs")
}

/// Remove our own rotated files last modified more than [`KEEP_DAYS`] ago
fn cleanup_old_logs(dir: &Path, prefix: &OsStr) {
    let Some(cutoff) = SystemTime::now().checked_sub(Duration::from_secs(KEEP_DAYS * 86_400))
    else {
        return;
    };
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    let prefix = prefix.to_string_lossy();
    let expired = entries
        .flatten()
        .filter(|entry| is_rotated_log(&entry.file_name().to_string_lossy(), &prefix))
        .filter(|entry| {
            entry
                .metadata()
                .is_ok_and(|meta| meta.is_file() && meta.modified().is_ok_and(|at| at < cutoff))
        });

    for entry in expired {
        if let Err(e) = fs::remove_file(entry.path()) {
            eprintln!("gerome: cannot remove old log {}: {e}", entry.path().display());
        }
    }
}

/// Whether `name` is `<prefix>.<YYYY-MM-DD>`, the daily appender's naming
fn is_rotated_log(name: &str, prefix: &str) -> bool {
    let Some(date) = name
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('.'))
    else {
        return false;
    };

    date.len() == 10
        && date.char_indices().all(|(i, c)| match i {
            4 | 7 => c == '-',
            _ => c.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleanup_keeps_recent_and_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("gerome.log.2026-10-16"), "recent").unwrap();
        fs::write(dir.path().join("other.log"), "foreign").unwrap();

        cleanup_old_logs(dir.path(), OsStr::new(DEFAULT_LOG_PREFIX));

        assert!(dir.path().join("gerome.log.2026-10-16").exists());
        assert!(dir.path().join("other.log").exists());
    }

    #[test]
    fn cleanup_only_removes_dated_rotations() {
        let dir = tempfile::tempdir().unwrap();
        let old = SystemTime::now() - Duration::from_secs(30 * 86_400);
        for name in ["gerome.log", "gerome.log.2026-01-01", "gerome.log.bak"] {
            let file = fs::File::create(dir.path().join(name)).unwrap();
            file.set_modified(old).unwrap();
        }

        cleanup_old_logs(dir.path(), OsStr::new(DEFAULT_LOG_PREFIX));

        assert!(dir.path().join("gerome.log").exists());
        assert!(dir.path().join("gerome.log.bak").exists());
        assert!(!dir.path().join("gerome.log.2026-01-01").exists());
    }

    #[test]
    fn rotated_names_carry_a_date_suffix() {
        assert!(is_rotated_log("gerome.log.2026-10-16", "gerome.log"));
        assert!(is_rotated_log("custom.txt.2025-02-28", "custom.txt"));
        assert!(!is_rotated_log("gerome.log", "gerome.log"));
        assert!(!is_rotated_log("gerome.log.old", "gerome.log"));
        assert!(!is_rotated_log("gerome.log.2026-10-16.gz", "gerome.log"));
        assert!(!is_rotated_log("other.log.2026-10-16", "gerome.log"));
    }
}
