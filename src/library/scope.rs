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

//! Playlist scope resolution.
//!
//! A [`Scope`] names the list currently being browsed and played from. It is
//! resolved against the library on demand, producing the concrete ordered
//! sequence that playback indices point into.

use std::collections::HashMap;

use crate::{
    library::Library,
    model::{PlaylistId, Song, SongId},
};

/// The list being browsed: every song, or one user playlist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Scope {
    #[default]
    All,
    Playlist(PlaylistId),
}

impl Scope {
    pub fn playlist_id(self) -> Option<PlaylistId> {
        match self {
            Scope::All => None,
            Scope::Playlist(id) => Some(id),
        }
    }
}

/// Resolves a scope to an ordered list of songs.
///
/// * [`Scope::All`] yields every song in library insertion order.
/// * A user playlist yields its members in playlist order, skipping ids that
///   no longer reference a song.
/// * An unknown playlist yields nothing.
pub fn resolve(library: &Library, scope: Scope) -> Vec<&Song> {
    match scope {
        Scope::All => library.songs().iter().collect(),
        Scope::Playlist(id) => {
            let Some(playlist) = library.playlist(id) else {
                return Vec::new();
            };

            let by_id: HashMap<SongId, &Song> =
                library.songs().iter().map(|song| (song.id(), song)).collect();

            playlist
                .song_ids()
                .iter()
                .filter_map(|id| by_id.get(id).copied())
                .collect()
        }
    }
}

/// Display name of a scope, as shown in the sidebar.
pub fn scope_name(library: &Library, scope: Scope) -> Option<&str> {
    match scope {
        Scope::All => Some("All Songs"),
        Scope::Playlist(id) => library.playlist(id).map(|playlist| playlist.name()),
    }
}
