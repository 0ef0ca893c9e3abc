// SPDX-License-Identifier: GPL-3.0-only

//! Gerome - browse disks and partitions in the terminal

use anyhow::Result;
use clap::Parser;
use gerome::app::{self, AppModel};
use gerome::config::{Args, Config};
use gerome::layout::Viewport;
use gerome::terminal::{self, TerminalSession};
use gerome::{logging, provider};
use storage_geom::build_or_empty;
use storage_types::DiskCollection;

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(&args)?;
    logging::init(&config);

    tracing::info!("Starting gerome v{}", env!("CARGO_PKG_VERSION"));

    let (disks, load_error) = load_disks(&config);
    if let Some(e) = load_error.as_deref().filter(|_| config.strict) {
        anyhow::bail!("failed to get disks: {e}");
    }

    let monochrome = config.monochrome || !terminal::supports_color();

    let mut session = TerminalSession::start()?;
    let size = session.terminal().size()?;
    let viewport = Viewport::of_terminal(size.width, size.height);
    tracing::debug!(disks = disks.count(), monochrome, "Entering event loop");

    let mut model = AppModel::new(disks, load_error, viewport, monochrome);
    let result = app::run(session.terminal(), &mut model, crossterm::event::read);
    session.restore()?;

    model.disks.release();
    tracing::info!("Exiting");

    Ok(result?)
}

fn load_disks(config: &Config) -> (DiskCollection, Option<String>) {
    match provider::open(config) {
        Ok(provider) => {
            let (disks, error) = build_or_empty(provider.as_ref());
            (disks, error.map(|e| e.to_string()))
        }
        Err(e) => {
            tracing::warn!("Failed to open topology provider: {}", e);
            (DiskCollection::default(), Some(e.to_string()))
        }
    }
}
