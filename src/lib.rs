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

//! # Botify core.
//!
//! The playback and playlist model behind the Botify music player.
//!
//! The crate is split into a handful of small, mostly independent pieces:
//!
//! * [`library`]: the song library and user playlists, plus the scope
//!   resolver that turns "the playlist being browsed" into a concrete ordered
//!   list of songs.
//! * [`playback`]: the playback engine state machine, driving an abstract
//!   [`playback::PlaybackHandle`] and notifying subscribed observers.
//! * [`persistence`]: load and save of library snapshots (JSON file, SQLite
//!   database, or nothing at all).
//! * [`session`]: the application context that owns all of the above and is
//!   constructed once at startup.
//!
//! Nothing in here knows about terminals or rendering, the TUI front end in
//! the `botify` binary is just another observer and command source.

pub mod config;
pub mod error;
pub mod library;
pub mod model;
pub mod persistence;
pub mod playback;
pub mod scan;
pub mod session;
pub mod util;

pub use error::{LibraryError, PersistenceError, PlaybackError};
pub use library::{Library, scope::Scope};
pub use model::{Playlist, PlaylistId, Song, SongId};
pub use playback::{
    Capabilities, LoadId, PlaybackEngine, PlaybackHandle, PlaybackObserver, PlaybackStatus,
};
pub use session::{MediaControl, Session};
