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

//! Domain models and core data structures.
//!
//! This module defines the two records the library is made of, songs and
//! playlists, along with their identifiers. Constructors enforce the record
//! invariants so that an invalid song or playlist can never be built.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::LibraryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaylistId(pub u64);

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "song-{}", self.0)
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "playlist-{}", self.0)
    }
}

/// A playable audio file in the library.
///
/// The display name is derived from the file name once, when the song is
/// created, and never changes afterwards. The duration starts out unknown
/// (zero) and is filled in later, when a metadata probe reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub(crate) id: SongId,
    pub(crate) name: String,
    pub(crate) path: PathBuf,
    pub(crate) duration: f64,
}

impl Song {
    pub(crate) fn new(id: SongId, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            id,
            name: display_name(&path),
            path,
            duration: 0.0,
        }
    }

    pub fn id(&self) -> SongId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The duration in seconds, or `None` while it is still unknown.
    pub fn known_duration(&self) -> Option<f64> {
        is_known_duration(self.duration).then_some(self.duration)
    }
}

/// A user-created, manually ordered list of songs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub(crate) id: PlaylistId,
    pub(crate) name: String,
    pub(crate) songs: Vec<SongId>,
}

impl Playlist {
    /// Creates an empty playlist.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::BlankPlaylistName`] if the name is empty or
    /// consists only of whitespace.
    pub fn new(id: PlaylistId, name: &str) -> Result<Self, LibraryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LibraryError::BlankPlaylistName);
        }

        Ok(Self {
            id,
            name: name.to_string(),
            songs: Vec::new(),
        })
    }

    pub fn id(&self) -> PlaylistId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member song ids in display order. May contain ids of songs that have
    /// since been removed from the library.
    pub fn song_ids(&self) -> &[SongId] {
        &self.songs
    }

    pub fn contains(&self, song_id: SongId) -> bool {
        self.songs.contains(&song_id)
    }
}

pub(crate) fn is_known_duration(seconds: f64) -> bool {
    seconds.is_finite() && seconds > 0.0
}

/// Derives a display name from a file path by stripping the last extension.
///
/// Both `/` and `\` separate directories on every platform. A name with no
/// extension, a trailing dot, or a dot-file such as `.hidden`, is used whole.
fn display_name(path: &Path) -> String {
    let full = path.to_string_lossy();
    let file_name = match full.rsplit(['/', '\\']).next() {
        Some(name) if !name.is_empty() => name,
        _ => &*full,
    };

    match file_name.rfind('.') {
        Some(dot) if dot > 0 && dot + 1 < file_name.len() => file_name[..dot].to_string(),
        _ => file_name.to_string(),
    }
}
