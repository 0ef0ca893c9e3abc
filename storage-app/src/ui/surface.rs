// SPDX-License-Identifier: GPL-3.0-only

//! Positioned drawing primitives
//!
//! Every call names its own `(row, col)`, relative to the top-left corner of
//! the surface. Anything that falls outside the surface is clipped, so
//! callers never have to bounds-check.

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::symbols::line;

pub struct Surface<'a> {
    buf: &'a mut Buffer,
    area: Rect,
}

impl<'a> Surface<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        let area = area.intersection(buf.area);
        Self { buf, area }
    }

    pub fn rows(&self) -> u16 {
        self.area.height
    }

    pub fn cols(&self) -> u16 {
        self.area.width
    }

    fn position(&self, row: u16, col: u16) -> Option<Position> {
        if row >= self.area.height || col >= self.area.width {
            return None;
        }
        Some(Position::new(self.area.x + col, self.area.y + row))
    }

    /// Draw `text` starting at `(row, col)`
    pub fn text(&mut self, row: u16, col: u16, text: &str, style: Style) {
        self.text_within(row, col, u16::MAX, text, style);
    }

    /// Draw at most `width` columns of `text` starting at `(row, col)`
    pub fn text_within(&mut self, row: u16, col: u16, width: u16, text: &str, style: Style) {
        let Some(position) = self.position(row, col) else {
            return;
        };
        let width = width.min(self.area.width - col);
        self.buf
            .set_stringn(position.x, position.y, text, usize::from(width), style);
    }

    /// Draw a single-cell symbol at `(row, col)`
    pub fn glyph(&mut self, row: u16, col: u16, symbol: &str, style: Style) {
        let Some(position) = self.position(row, col) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut(position) {
            cell.set_symbol(symbol).set_style(style);
        }
    }

    /// Apply `style` to a `rows` x `cols` block
    pub fn fill(&mut self, row: u16, col: u16, rows: u16, cols: u16, style: Style) {
        let Some(position) = self.position(row, col) else {
            return;
        };
        let block = Rect::new(position.x, position.y, cols, rows).intersection(self.area);
        self.buf.set_style(block, style);
    }

    /// Outline a `rows` x `cols` box whose top-left corner is `(row, col)`
    pub fn boxed(&mut self, row: u16, col: u16, rows: u16, cols: u16, style: Style) {
        if rows < 2 || cols < 2 {
            return;
        }
        let bottom = row.saturating_add(rows - 1);
        let right = col.saturating_add(cols - 1);

        for c in col + 1..right {
            self.glyph(row, c, line::HORIZONTAL, style);
            self.glyph(bottom, c, line::HORIZONTAL, style);
        }
        for r in row + 1..bottom {
            self.glyph(r, col, line::VERTICAL, style);
            self.glyph(r, right, line::VERTICAL, style);
        }

        self.glyph(row, col, line::TOP_LEFT, style);
        self.glyph(row, right, line::TOP_RIGHT, style);
        self.glyph(bottom, col, line::BOTTOM_LEFT, style);
        self.glyph(bottom, right, line::BOTTOM_RIGHT, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_of(buf: &Buffer) -> Vec<String> {
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn draws_relative_to_surface_origin() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 8, 4));
        let mut surface = Surface::new(&mut buf, Rect::new(2, 1, 6, 3));

        surface.boxed(0, 0, 3, 4, Style::default());
        surface.text(1, 1, "ab", Style::default());

        assert_eq!(
            rows_of(&buf),
            ["        ", "  ┌──┐  ", "  │ab│  ", "  └──┘  "]
        );
    }

    #[test]
    fn clips_everything_outside_the_surface() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 2));
        let mut surface = Surface::new(&mut buf, Rect::new(0, 0, 4, 2));

        surface.text(0, 2, "overflow", Style::default());
        surface.text(5, 0, "gone", Style::default());
        surface.boxed(1, 1, 10, 10, Style::default());
        surface.fill(0, 0, 50, 50, Style::default());

        assert_eq!(rows_of(&buf), ["  ov  ", " ┌──  "]);
    }

    #[test]
    fn surface_larger_than_buffer_is_clamped() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 3, 1));
        let surface = Surface::new(&mut buf, Rect::new(1, 0, 10, 10));

        assert_eq!((surface.rows(), surface.cols()), (1, 2));
    }
}
