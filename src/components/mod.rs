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

//! Interactive widgets and their state.
//!
//! Each component keeps only view state (cursor positions and the like). The
//! data it shows is borrowed from the session when it is drawn or handles an
//! event, so a component can never go stale against the library.

mod playlist_picker;
mod sidebar;
mod song_table;

pub(crate) use playlist_picker::{PickerAction, PlaylistPicker};
pub(crate) use sidebar::Sidebar;
pub(crate) use song_table::{SongTableAction, SongTableState};

/// The index after `selected`, wrapping to the first entry.
pub(crate) fn wrap_next(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }

    Some(match selected {
        Some(i) if i + 1 < len => i + 1,
        Some(_) => 0,
        None => 0,
    })
}

/// The index before `selected`, wrapping to the last entry.
pub(crate) fn wrap_previous(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }

    Some(match selected {
        Some(0) => len - 1,
        Some(i) => (i - 1).min(len - 1),
        None => 0,
    })
}
