// SPDX-License-Identifier: GPL-3.0-only

use ratatui::style::Modifier;
use storage_types::{Disk, humanize_bytes};

use super::surface::Surface;
use super::theme::Theme;
use crate::app::AppModel;
use crate::layout::{DISK_ENTRY_HEIGHT, disks_pane_width, visible_disk_count};

pub(super) fn draw(surface: &mut Surface, app: &AppModel, theme: &Theme) {
    let rows = surface.rows();
    let width = disks_pane_width(surface.cols() - 2);

    surface.boxed(1, 1, rows - 2, width, theme.window);
    surface.text(1, 4, "DISKS", theme.window);

    if app.disks.is_empty() {
        surface.text(3, 4, "No disks found", theme.window);
        return;
    }

    let state = &app.state;
    let entries = app
        .disks
        .iter()
        .enumerate()
        .skip(state.scrolled_disks)
        .take(visible_disk_count(rows));

    for (slot, (index, disk)) in entries.enumerate() {
        let row = 2 + slot as u16 * DISK_ENTRY_HEIGHT;
        draw_entry(
            surface,
            disk,
            row,
            width - 2,
            index == state.selected_disk,
            theme,
        );
    }

    tracing::trace!(
        scrolled = state.scrolled_disks,
        visible = visible_disk_count(rows),
        "Drew disks pane"
    );
}

fn draw_entry(
    surface: &mut Surface,
    disk: &Disk,
    row: u16,
    width: u16,
    selected: bool,
    theme: &Theme,
) {
    const COL: u16 = 2;

    let style = if selected {
        surface.fill(row, COL, DISK_ENTRY_HEIGHT, width, theme.selected);
        surface.boxed(row, COL, DISK_ENTRY_HEIGHT, width, theme.selected);
        theme.selected
    } else {
        theme.window
    };

    let text_width = width.saturating_sub(2);
    surface.text_within(
        row + 1,
        COL + 1,
        text_width,
        &disk.name,
        style.add_modifier(Modifier::UNDERLINED),
    );
    surface.text_within(
        row + 2,
        COL + 1,
        text_width,
        &format!("Size: {}", humanize_bytes(disk.size)),
        style,
    );
    surface.text_within(
        row + 3,
        COL + 1,
        text_width,
        &format!("{} sector size", humanize_bytes(disk.sector_size)),
        style,
    );
}
