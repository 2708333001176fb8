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

//! Error types for the core library.
//!
//! Most user-reachable mistakes (an out of range index, a duplicate playlist
//! member, seeking an unknown duration) are not errors at all and simply
//! decline the action. The types here cover the remaining cases: invalid
//! records, a dead playback backend, and persistence failures.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LibraryError {
    #[error("playlist name must not be blank")]
    BlankPlaylistName,
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The playback backend has gone away, usually because its worker thread
    /// exited.
    #[error("playback backend unavailable: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("library file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("library file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("library database failed: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
