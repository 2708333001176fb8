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

//! Interactive song table widget and state management.
//!
//! This module provides the table of songs in the selected scope. It
//! separates persistent state (`SongTableState`) from the transient widget
//! view (`SongTable`), which borrows the resolved songs for the duration of
//! a single draw or key press.

mod event;
mod render;

use botify::Song;
use ratatui::widgets::TableState;

use crate::components::{wrap_next, wrap_previous};

/// An action the table asks the application to carry out.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SongTableAction {
    /// Play the song at this index of the scope.
    Play(usize),
}

pub(crate) struct SongTableState {
    pub(crate) table_state: TableState,
}

impl SongTableState {
    pub(crate) fn new() -> Self {
        Self {
            table_state: TableState::default(),
        }
    }

    pub(crate) fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }

    /// Puts the cursor back on the first row, as when the scope changes.
    pub(crate) fn reset_selection(&mut self, len: usize) {
        self.table_state.select((len > 0).then_some(0));
        *self.table_state.offset_mut() = 0;
    }

    pub(crate) fn as_widget<'a>(
        &'a mut self,
        title: &'a str,
        songs: &'a [&'a Song],
        playing: Option<usize>,
        focused: bool,
    ) -> SongTable<'a> {
        SongTable {
            title,
            songs,
            playing,
            focused,
            table_state: &mut self.table_state,
        }
    }
}

pub(crate) struct SongTable<'a> {
    title: &'a str,
    songs: &'a [&'a Song],
    playing: Option<usize>,
    focused: bool,
    table_state: &'a mut TableState,
}

impl SongTable<'_> {
    fn goto_next(&mut self) {
        let i = wrap_next(self.table_state.selected(), self.songs.len());
        self.table_state.select(i);
    }

    fn goto_previous(&mut self) {
        let i = wrap_previous(self.table_state.selected(), self.songs.len());
        self.table_state.select(i);
    }

    fn goto_first(&mut self) {
        if !self.songs.is_empty() {
            self.table_state.select(Some(0));
        }
    }

    fn goto_last(&mut self) {
        if let Some(last) = self.songs.len().checked_sub(1) {
            self.table_state.select(Some(last));
        }
    }

    fn goto_playing(&mut self) {
        if let Some(index) = self.playing.filter(|i| *i < self.songs.len()) {
            self.table_state.select(Some(index));
        }
    }
}
