// SPDX-License-Identifier: GPL-3.0-only

use ratatui::style::Modifier;
use ratatui::symbols::line;
use storage_types::{Disk, Partition, group_digits, humanize_bytes};

use super::surface::Surface;
use super::theme::Theme;
use crate::layout::{PARTITION_ENTRY_HEIGHT, disks_pane_width, max_visible_partitions};

pub(super) fn draw(surface: &mut Surface, disk: &Disk, theme: &Theme) {
    let (rows, cols) = (surface.rows(), surface.cols());
    let disks_width = disks_pane_width(cols - 2);
    let width = cols - disks_width - 2;
    let style = theme.window;

    surface.boxed(1, disks_width, rows - 2, cols - disks_width - 1, style);
    surface.glyph(1, disks_width, line::HORIZONTAL_DOWN, style);
    surface.glyph(rows - 2, disks_width, line::HORIZONTAL_UP, style);
    surface.text(1, disks_width + 3, "PARTITIONS", style);

    if disk.partitions.is_empty() {
        surface.text(3, disks_width + 3, "No partitions found", style);
        return;
    }

    let capacity = max_visible_partitions(rows);
    let column_width = (width / 2).saturating_sub(2);
    for (index, partition) in disk.partitions.iter().take(capacity).enumerate() {
        let row = 3 + (index / 2) as u16 * PARTITION_ENTRY_HEIGHT;
        let col = disks_width + 3 + (index % 2) as u16 * (width / 2);
        draw_entry(surface, partition, row, col, column_width, theme);
    }

    if disk.partition_count() > capacity {
        surface.text(
            rows - 2,
            disks_width + 3,
            "Window too small to show all partitions",
            style,
        );
    }
}

fn draw_entry(
    surface: &mut Surface,
    partition: &Partition,
    row: u16,
    col: u16,
    width: u16,
    theme: &Theme,
) {
    let style = theme.window;
    let lines = [
        (1, format!("Label: {}", partition.label.as_deref().unwrap_or_default())),
        (
            2,
            format!(
                "Type: {}",
                partition.partition_type.as_deref().unwrap_or_default()
            ),
        ),
        (3, format!("Size: {}", humanize_bytes(partition.size))),
        (5, format!("{} sectors", group_digits(partition.sectors()))),
        (6, format!("Start: {}", partition.start)),
        (7, format!("End: {}", partition.end)),
    ];

    surface.text_within(
        row,
        col,
        width,
        &partition.name,
        style.add_modifier(Modifier::UNDERLINED),
    );
    for (offset, line) in &lines {
        surface.text_within(row + offset, col, width, line, style);
    }
}
