// SPDX-License-Identifier: GPL-3.0-only

use ratatui::style::{Color, Modifier, Style};

/// Styles for the three layers of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Terminal area around the window
    pub background: Style,
    /// Window and panes
    pub window: Style,
    /// Highlighted disk entry
    pub selected: Style,
}

impl Theme {
    pub fn new(monochrome: bool) -> Self {
        if monochrome {
            Self {
                background: Style::default(),
                window: Style::default(),
                selected: Style::default().add_modifier(Modifier::REVERSED),
            }
        } else {
            Self {
                background: Style::default().fg(Color::Black).bg(Color::Blue),
                window: Style::default().fg(Color::Black).bg(Color::White),
                selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            }
        }
    }
}
