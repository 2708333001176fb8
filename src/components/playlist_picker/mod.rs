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

//! Playlist membership popup.
//!
//! Opened for a single song, the picker lists every playlist with a mark
//! against those the song already belongs to. Choosing a playlist toggles
//! membership, the song is added if it is missing and removed if present.

mod render;

use botify::{Library, PlaylistId, SongId};
use crossterm::event::{Event, KeyCode};
use ratatui::widgets::ListState;

use crate::components::{wrap_next, wrap_previous};

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum PickerAction {
    /// Add the song to the playlist, or remove it if already a member.
    Toggle(SongId, PlaylistId),
}

#[derive(Default)]
pub(crate) struct PlaylistPicker {
    song: Option<SongId>,
    list_state: ListState,
}

impl PlaylistPicker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_open(&self) -> bool {
        self.song.is_some()
    }

    pub(crate) fn open(&mut self, song: SongId) {
        self.song = Some(song);
        self.list_state.select(Some(0));
    }

    pub(crate) fn close(&mut self) {
        self.song = None;
    }

    /// Handles a key while the picker is open. Every key is consumed, the
    /// picker is modal.
    pub(crate) fn process_event(
        &mut self,
        event: &Event,
        library: &Library,
    ) -> Option<PickerAction> {
        let song = self.song?;
        let Event::Key(key_event) = event else {
            return None;
        };

        let playlists = library.playlists();

        match key_event.code {
            KeyCode::Esc | KeyCode::Char('q') => self.close(),
            KeyCode::Char('j') | KeyCode::Down => {
                self.list_state.select(wrap_next(self.list_state.selected(), playlists.len()));
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.list_state.select(wrap_previous(self.list_state.selected(), playlists.len()));
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                return self
                    .list_state
                    .selected()
                    .and_then(|i| playlists.get(i))
                    .map(|playlist| PickerAction::Toggle(song, playlist.id()));
            }
            _ => {}
        }

        None
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
    fn enter_toggles_highlighted_playlist() {
        let mut library = Library::new();
        let song = library.add_song("/m/a.mp3");
        library.create_playlist("Chill").unwrap();
        let gym = library.create_playlist("Gym").unwrap();

        let mut picker = PlaylistPicker::new();
        picker.open(song);
        picker.process_event(&key(KeyCode::Char('j')), &library);

        assert_eq!(
            picker.process_event(&key(KeyCode::Enter), &library),
            Some(PickerAction::Toggle(song, gym))
        );
        assert!(picker.is_open());
    }

    #[test]
    fn no_playlists_means_nothing_to_toggle() {
        let mut library = Library::new();
        let song = library.add_song("/m/a.mp3");

        let mut picker = PlaylistPicker::new();
        picker.open(song);

        assert_eq!(picker.process_event(&key(KeyCode::Enter), &library), None);

        picker.process_event(&key(KeyCode::Esc), &library);
        assert!(!picker.is_open());
    }
}
