// SPDX-License-Identifier: GPL-3.0-only

//! Frame rendering
//!
//! The window is inset from the terminal edge and holds two panes: the disk
//! list on the left, the selected disk's partitions on the right.

mod disks;
mod partitions;
pub mod surface;
pub mod theme;

use ratatui::Frame;

use crate::app::AppModel;
use crate::layout::{self, Viewport};
use surface::Surface;
use theme::Theme;

const TITLE: &str = "GEROME";
const LOAD_ERROR: &str = "failed to get disks";
const TOO_SMALL: &str = "Terminal too small";

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &AppModel) {
    let screen = frame.area();
    let theme = Theme::new(app.state.monochrome);
    let buf = frame.buffer_mut();

    buf.set_style(screen, theme.background);

    if app.load_error.is_some() {
        Surface::new(buf, screen).text(0, layout::WINDOW_MARGIN_COLS, LOAD_ERROR, theme.background);
    }

    let window = layout::window_area(screen);
    let mut surface = Surface::new(buf, window);
    draw_window(&mut surface, app, &theme);
}

fn draw_window(surface: &mut Surface, app: &AppModel, theme: &Theme) {
    let (rows, cols) = (surface.rows(), surface.cols());
    if rows == 0 || cols == 0 {
        return;
    }

    surface.fill(0, 0, rows, cols, theme.window);
    surface.boxed(0, 0, rows, cols, theme.window);
    surface.text(0, 3, TITLE, theme.window);
    draw_legend(surface, rows - 1, theme);

    if !Viewport::new(rows, cols).fits_panes() {
        let width = TOO_SMALL.len() as u16;
        surface.text(rows / 2, cols.saturating_sub(width) / 2, TOO_SMALL, theme.window);
        return;
    }

    disks::draw(surface, app, theme);
    if let Some(disk) = app.selected_disk() {
        partitions::draw(surface, disk, theme);
    }
}

fn draw_legend(surface: &mut Surface, row: u16, theme: &Theme) {
    surface.text(row, 3, " Q - Quit ", theme.window);
    surface.text(row, 16, " ↑ - Up ", theme.window);
    surface.text(row, 27, " ↓ - Down ", theme.window);
}
