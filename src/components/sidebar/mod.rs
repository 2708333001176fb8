// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Scope list state.
//!
//! The sidebar lists "All Songs" followed by every user playlist, in creation
//! order. Entry `0` is always the library-wide scope.

mod render;

use botify::{Library, Scope};
use crossterm::event::{Event, KeyCode};
use ratatui::widgets::ListState;

use crate::components::{wrap_next, wrap_previous};

pub(crate) struct Sidebar {
    pub(crate) list_state: ListState,
}

impl Sidebar {
    pub(crate) fn new() -> Self {
        Self {
            list_state: ListState::default().with_selected(Some(0)),
        }
    }

    fn scopes(library: &Library) -> Vec<Scope> {
        std::iter::once(Scope::All)
            .chain(library.playlists().iter().map(|p| Scope::Playlist(p.id())))
            .collect()
    }

    pub(crate) fn selected_scope(&self, library: &Library) -> Option<Scope> {
        let index = self.list_state.selected()?;
        Self::scopes(library).get(index).copied()
    }

    /// Moves the cursor onto `scope`, if it is listed.
    pub(crate) fn focus_scope(&mut self, library: &Library, scope: Scope) {
        if let Some(index) = Self::scopes(library).iter().position(|s| *s == scope) {
            self.list_state.select(Some(index));
        }
    }

    /// Handles navigation keys, returning the scope to switch to when one is
    /// chosen.
    pub(crate) fn process_event(&mut self, event: &Event, library: &Library) -> Option<Scope> {
        let Event::Key(key_event) = event else {
            return None;
        };

        let len = Self::scopes(library).len();

        match key_event.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.list_state.select(wrap_next(self.list_state.selected(), len));
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.list_state.select(wrap_previous(self.list_state.selected(), len));
                None
            }
            KeyCode::Enter => self.selected_scope(library),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn enter_chooses_highlighted_playlist() {
        let mut library = Library::new();
        let chill = library.create_playlist("Chill").unwrap();
        library.create_playlist("Gym").unwrap();

        let mut sidebar = Sidebar::new();
        assert_eq!(sidebar.process_event(&key(KeyCode::Down), &library), None);
        assert_eq!(
            sidebar.process_event(&key(KeyCode::Enter), &library),
            Some(Scope::Playlist(chill))
        );
    }

    #[test]
    fn cursor_wraps_around_to_all_songs() {
        let mut library = Library::new();
        library.create_playlist("Chill").unwrap();

        let mut sidebar = Sidebar::new();
        sidebar.process_event(&key(KeyCode::Char('j')), &library);
        sidebar.process_event(&key(KeyCode::Char('j')), &library);

        assert_eq!(sidebar.selected_scope(&library), Some(Scope::All));
    }
}
