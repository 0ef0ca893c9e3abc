// SPDX-License-Identifier: GPL-3.0-only

//! Disk selection and scrolling
//!
//! [`transition`] is the only way the state changes. It performs no I/O, so
//! every input sequence can be replayed without a terminal.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::layout::{Viewport, visible_disk_count};

/// An input event, already decoded from the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Quit,
    MoveUp,
    MoveDown,
    /// The terminal changed size; carries the new window size
    Resize(Viewport),
    Other,
}

impl Input {
    pub fn from_event(event: &Event) -> Self {
        match event {
            Event::Key(key) => Self::from_key(key),
            Event::Resize(cols, rows) => Self::Resize(Viewport::of_terminal(*cols, *rows)),
            _ => Self::Other,
        }
    }

    fn from_key(key: &KeyEvent) -> Self {
        if key.kind != KeyEventKind::Press {
            return Self::Other;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Self::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Self::Quit,
            KeyCode::Up | KeyCode::Char('k') => Self::MoveUp,
            KeyCode::Down | KeyCode::Char('j') => Self::MoveDown,
            _ => Self::Other,
        }
    }
}

/// Selection, scroll offset and the window they were computed against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    /// Index of the highlighted disk; 0 when there are no disks
    pub selected_disk: usize,

    /// Index of the first disk drawn in the disks pane
    pub scrolled_disks: usize,

    pub exit: bool,

    /// Fixed at startup from the terminal's colour support
    pub monochrome: bool,

    /// Last known window size
    pub viewport: Viewport,
}

impl NavigationState {
    pub fn new(viewport: Viewport, monochrome: bool) -> Self {
        Self {
            selected_disk: 0,
            scrolled_disks: 0,
            exit: false,
            monochrome,
            viewport,
        }
    }

    pub fn visible_disks(&self) -> usize {
        visible_disk_count(self.viewport.rows)
    }
}

/// Compute the state after `input`, given how many disks exist
pub fn transition(state: NavigationState, input: Input, disk_count: usize) -> NavigationState {
    if state.exit {
        return state;
    }

    let mut next = state;
    match input {
        Input::Quit => next.exit = true,
        Input::MoveUp => {
            if next.selected_disk > 0 {
                let previous = next.selected_disk;
                next.selected_disk -= 1;
                // Scroll up when the selection leaves the top edge.
                if next.scrolled_disks > 0 && next.scrolled_disks == previous {
                    next.scrolled_disks -= 1;
                }
            }
        }
        Input::MoveDown => {
            if next.selected_disk + 1 < disk_count {
                next.selected_disk += 1;
                let visible = next.visible_disks();
                if visible <= disk_count - next.scrolled_disks
                    && visible == next.selected_disk.saturating_sub(next.scrolled_disks)
                {
                    next.scrolled_disks += 1;
                }
            }
        }
        Input::Resize(viewport) => {
            next.viewport = viewport;
            let visible = next.visible_disks();
            if visible >= disk_count {
                next.scrolled_disks = 0;
            } else if visible == 0 {
                // Nothing is drawn; keep the offset until the window grows again.
            } else if visible >= next.scrolled_disks {
                // Anchor the selection to the bottom of the window.
                next.scrolled_disks = (next.selected_disk + 1).saturating_sub(visible);
            } else if next.selected_disk >= next.scrolled_disks + visible {
                next.scrolled_disks = next.selected_disk + 1 - visible;
            }
        }
        Input::Other => {}
    }

    if next != state {
        tracing::debug!(
            ?input,
            selected = next.selected_disk,
            scrolled = next.scrolled_disks,
            "Navigation changed"
        );
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Window with room for exactly `disks` disk entries
    fn rows_for(disks: u16) -> Viewport {
        Viewport::new(4 + 5 * disks, 80)
    }

    fn run(state: NavigationState, inputs: &[Input], disk_count: usize) -> NavigationState {
        inputs
            .iter()
            .fold(state, |state, input| transition(state, *input, disk_count))
    }

    #[test]
    fn quit_is_terminal() {
        let state = transition(NavigationState::new(rows_for(3), false), Input::Quit, 5);
        assert!(state.exit);

        let after = transition(state, Input::MoveDown, 5);
        assert_eq!(after, state);
    }

    #[test]
    fn move_down_scrolls_one_entry_past_bottom() {
        let state = NavigationState::new(rows_for(3), false);

        let state = run(state, &[Input::MoveDown, Input::MoveDown], 6);
        assert_eq!((state.selected_disk, state.scrolled_disks), (2, 0));

        let state = transition(state, Input::MoveDown, 6);
        assert_eq!((state.selected_disk, state.scrolled_disks), (3, 1));

        let state = run(state, &[Input::MoveDown; 5], 6);
        assert_eq!((state.selected_disk, state.scrolled_disks), (5, 3));
    }

    #[test]
    fn move_up_scrolls_when_leaving_top_edge() {
        let state = run(
            NavigationState::new(rows_for(3), false),
            &[Input::MoveDown; 5],
            6,
        );
        assert_eq!((state.selected_disk, state.scrolled_disks), (5, 3));

        let state = run(state, &[Input::MoveUp, Input::MoveUp], 6);
        assert_eq!((state.selected_disk, state.scrolled_disks), (3, 3));

        let state = transition(state, Input::MoveUp, 6);
        assert_eq!((state.selected_disk, state.scrolled_disks), (2, 2));

        let state = run(state, &[Input::MoveUp; 4], 6);
        assert_eq!((state.selected_disk, state.scrolled_disks), (0, 0));
    }

    #[test]
    fn empty_collection_ignores_movement() {
        let state = NavigationState::new(rows_for(3), false);
        let after = run(state, &[Input::MoveDown, Input::MoveUp, Input::MoveDown], 0);

        assert_eq!(after, state);
    }

    #[test]
    fn move_down_disk_count_times_reaches_last_disk() {
        for disk_count in 1..12 {
            let state = run(
                NavigationState::new(rows_for(3), false),
                &vec![Input::MoveDown; disk_count],
                disk_count,
            );
            assert_eq!(state.selected_disk, disk_count - 1);
        }
    }

    #[test]
    fn resize_to_fit_everything_resets_scroll() {
        let state = run(
            NavigationState::new(rows_for(2), false),
            &[Input::MoveDown; 4],
            5,
        );
        assert_eq!(state.scrolled_disks, 3);

        let state = transition(state, Input::Resize(rows_for(5)), 5);
        assert_eq!((state.selected_disk, state.scrolled_disks), (4, 0));
    }

    #[test]
    fn resize_anchors_selection_to_bottom() {
        let state = run(
            NavigationState::new(rows_for(4), false),
            &[Input::MoveDown; 6],
            10,
        );
        assert_eq!((state.selected_disk, state.scrolled_disks), (6, 3));

        let state = transition(state, Input::Resize(rows_for(3)), 10);
        assert_eq!((state.selected_disk, state.scrolled_disks), (6, 4));
    }

    #[test]
    fn resize_near_top_does_not_underflow() {
        let state = NavigationState::new(rows_for(2), false);
        let state = transition(state, Input::Resize(rows_for(4)), 10);

        assert_eq!((state.selected_disk, state.scrolled_disks), (0, 0));
    }

    #[test]
    fn resize_below_scroll_offset_keeps_selection_visible() {
        let state = run(
            NavigationState::new(rows_for(4), false),
            &[Input::MoveDown; 9],
            10,
        );
        assert_eq!((state.selected_disk, state.scrolled_disks), (9, 6));

        let state = transition(state, Input::Resize(rows_for(1)), 10);
        assert_eq!((state.selected_disk, state.scrolled_disks), (9, 9));
    }

    #[test]
    fn resize_to_zero_slots_keeps_scroll_within_selection() {
        let state = transition(
            NavigationState::new(Viewport::new(44, 80), false),
            Input::MoveDown,
            5,
        );
        assert_eq!((state.selected_disk, state.scrolled_disks), (1, 0));

        let state = transition(state, Input::Resize(Viewport::new(8, 80)), 5);
        assert_eq!(state.visible_disks(), 0);
        assert_eq!((state.selected_disk, state.scrolled_disks), (1, 0));

        let state = run(state, &[Input::MoveUp, Input::MoveDown], 5);
        assert_eq!((state.selected_disk, state.scrolled_disks), (1, 0));

        let state = transition(state, Input::Resize(rows_for(1)), 5);
        assert_eq!((state.selected_disk, state.scrolled_disks), (1, 1));
    }

    #[test]
    fn single_disk_in_empty_window_stays_consistent() {
        let state = NavigationState::new(Viewport::new(0, 80), false);
        let state = run(
            state,
            &[
                Input::Resize(Viewport::new(0, 80)),
                Input::MoveDown,
                Input::MoveUp,
            ],
            1,
        );

        assert_eq!((state.selected_disk, state.scrolled_disks), (0, 0));
    }

    #[test]
    fn decodes_keys_and_resizes() {
        let key = |code| Event::Key(KeyEvent::new(code, KeyModifiers::NONE));

        assert_eq!(Input::from_event(&key(KeyCode::Char('q'))), Input::Quit);
        assert_eq!(Input::from_event(&key(KeyCode::Esc)), Input::Quit);
        assert_eq!(Input::from_event(&key(KeyCode::Up)), Input::MoveUp);
        assert_eq!(Input::from_event(&key(KeyCode::Char('j'))), Input::MoveDown);
        assert_eq!(Input::from_event(&key(KeyCode::Char('x'))), Input::Other);
        assert_eq!(
            Input::from_event(&Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            ))),
            Input::Quit
        );
        assert_eq!(
            Input::from_event(&Event::Resize(80, 24)),
            Input::Resize(Viewport::new(20, 70))
        );
        assert_eq!(Input::from_event(&Event::FocusGained), Input::Other);
    }

    #[test]
    fn key_releases_are_ignored() {
        let mut release = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;

        assert_eq!(Input::from_event(&Event::Key(release)), Input::Other);
    }

    fn input_strategy() -> impl Strategy<Value = Input> {
        prop_oneof![
            4 => Just(Input::MoveDown),
            3 => Just(Input::MoveUp),
            1 => (0u16..80).prop_map(|rows| Input::Resize(Viewport::new(rows, 80))),
            1 => Just(Input::Other),
        ]
    }

    proptest! {
        #[test]
        fn navigation_invariants_hold(
            disk_count in 0usize..30,
            initial_rows in 0u16..80,
            inputs in proptest::collection::vec(input_strategy(), 0..200),
        ) {
            let mut state = NavigationState::new(Viewport::new(initial_rows, 80), false);
            for input in inputs {
                state = transition(state, input, disk_count);

                prop_assert!(state.scrolled_disks <= state.selected_disk);
                prop_assert!(state.selected_disk <= disk_count.saturating_sub(1));

                let visible = state.visible_disks();
                if visible > 0 {
                    prop_assert!(state.selected_disk < state.scrolled_disks + visible);
                }
            }
        }

        #[test]
        fn resize_that_fits_all_resets_scroll(
            disk_count in 0usize..10,
            moves in 0usize..20,
        ) {
            let state = (0..moves).fold(
                NavigationState::new(Viewport::new(9, 80), false),
                |state, _| transition(state, Input::MoveDown, disk_count),
            );
            let rows = 4 + 5 * disk_count as u16;
            let state = transition(state, Input::Resize(Viewport::new(rows, 80)), disk_count);

            prop_assert_eq!(state.scrolled_disks, 0);
        }
    }
}
