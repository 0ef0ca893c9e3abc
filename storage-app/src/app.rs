// SPDX-License-Identifier: GPL-3.0-only

use std::io;

use crossterm::event::Event;
use ratatui::Terminal;
use ratatui::backend::Backend;
use storage_types::{Disk, DiskCollection};

use crate::layout::Viewport;
use crate::navigation::{Input, NavigationState, transition};
use crate::ui;

/// Everything one frame needs: the topology and where the user is in it
#[derive(Debug)]
pub struct AppModel {
    pub disks: DiskCollection,
    pub state: NavigationState,
    /// Why the topology is empty, when building it failed
    pub load_error: Option<String>,
}

impl AppModel {
    pub fn new(
        disks: DiskCollection,
        load_error: Option<String>,
        viewport: Viewport,
        monochrome: bool,
    ) -> Self {
        Self {
            disks,
            state: NavigationState::new(viewport, monochrome),
            load_error,
        }
    }

    pub fn selected_disk(&self) -> Option<&Disk> {
        self.disks.get(self.state.selected_disk)
    }

    pub fn handle(&mut self, input: Input) {
        self.state = transition(self.state, input, self.disks.count());
    }

    pub fn should_quit(&self) -> bool {
        self.state.exit
    }
}

/// Render, block on one event, update; until the user quits
pub fn run<B, F>(terminal: &mut Terminal<B>, app: &mut AppModel, mut next_event: F) -> io::Result<()>
where
    B: Backend,
    F: FnMut() -> io::Result<Event>,
{
    while !app.should_quit() {
        terminal.draw(|frame| ui::render(frame, app))?;

        let input = Input::from_event(&next_event()?);
        if let Input::Resize(viewport) = input {
            tracing::trace!(rows = viewport.rows, cols = viewport.cols, "Window resized");
            terminal.autoresize()?;
            terminal.clear()?;
        }
        app.handle(input);
    }

    Ok(())
}
