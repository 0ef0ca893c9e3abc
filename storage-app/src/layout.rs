// SPDX-License-Identifier: GPL-3.0-only

//! Pane geometry
//!
//! Pure functions of the window size. The window is the terminal minus a
//! fixed margin; every count below is measured against the window.
//!
//! ```text
//! ┌─GEROME──────────────────────────────────────────────────┐
//! │┌──DISKS──────────────┬──PARTITIONS─────────────────────┐│
//! ││┌───────────────────┐│  da0p1            da0p2         ││
//! │││da0                ││  Label: root      Label: swap   ││
//! │││Size: 466G         ││  Type: ...        Type: ...     ││
//! │││512B sector size   ││  Size: 488M       Size: 4.0G    ││
//! ││└───────────────────┘│                                 ││
//! ││ da1                 │  999,960 sectors  ...           ││
//! ││ ...                 │  ...                            ││
//! │└─────────────────────┴─────────────────────────────────┘│
//! └─ Q - Quit ─── ↑ - Up ─── ↓ - Down ──────────────────────┘
//! ```

use ratatui::layout::Rect;

pub const DISK_PANE_MIN_WIDTH: u16 = 23;
pub const DISK_ENTRY_HEIGHT: u16 = 5;
pub const PARTITION_ENTRY_HEIGHT: u16 = 10;

/// Rows taken by the window and pane borders plus the pane headers
pub const RESERVED_ROWS: u16 = 4;

pub const WINDOW_MARGIN_ROWS: u16 = 2;
pub const WINDOW_MARGIN_COLS: u16 = 5;

pub const MIN_PARTITION_PANE_WIDTH: u16 = 12;

/// Smallest window that still fits one disk entry
pub const MIN_WINDOW_ROWS: u16 = RESERVED_ROWS + DISK_ENTRY_HEIGHT;

/// Smallest window that fits the disk pane next to a usable partitions pane
pub const MIN_WINDOW_COLS: u16 = DISK_PANE_MIN_WIDTH + 2 + MIN_PARTITION_PANE_WIDTH;

/// Drawable size of the window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub rows: u16,
    pub cols: u16,
}

impl Viewport {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }

    /// Window size for a terminal of `cols` x `rows` cells
    pub fn of_terminal(cols: u16, rows: u16) -> Self {
        let window = window_area(Rect::new(0, 0, cols, rows));
        Self::new(window.height, window.width)
    }

    /// Whether both panes can be drawn without clipping their first entry
    pub fn fits_panes(&self) -> bool {
        self.rows >= MIN_WINDOW_ROWS && self.cols >= MIN_WINDOW_COLS
    }
}

/// The window inside the terminal area
pub fn window_area(terminal: Rect) -> Rect {
    Rect::new(
        terminal.x.saturating_add(WINDOW_MARGIN_COLS),
        terminal.y.saturating_add(WINDOW_MARGIN_ROWS),
        terminal.width.saturating_sub(2 * WINDOW_MARGIN_COLS),
        terminal.height.saturating_sub(2 * WINDOW_MARGIN_ROWS),
    )
}

pub fn disks_pane_width(total_cols: u16) -> u16 {
    DISK_PANE_MIN_WIDTH.max(total_cols / 3)
}

pub fn visible_disk_count(total_rows: u16) -> usize {
    usize::from(total_rows.saturating_sub(RESERVED_ROWS) / DISK_ENTRY_HEIGHT)
}

pub fn visible_partition_count(total_rows: u16) -> usize {
    usize::from(total_rows.saturating_sub(RESERVED_ROWS) / PARTITION_ENTRY_HEIGHT)
}

/// Partitions are laid out two per row block
pub fn max_visible_partitions(total_rows: u16) -> usize {
    2 * visible_partition_count(total_rows)
}
