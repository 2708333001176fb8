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

//! The seams between the engine and the outside world.

use std::path::Path;

use crate::{
    error::PlaybackError,
    model::Song,
    playback::{LoadId, PlaybackStatus},
};

/// A single media playback handle, such as an MPV instance.
///
/// Implementations only need to forward each request to the backend; the
/// engine decides what to request and when. Progress, duration and
/// end-of-track are reported back to the engine separately, by whoever owns
/// the backend's event stream.
pub trait PlaybackHandle {
    /// Replaces whatever is loaded with the file at `path`.
    ///
    /// Reports about this file should carry `load` back to the engine.
    fn load(&mut self, path: &Path, load: LoadId) -> Result<(), PlaybackError>;

    fn resume(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self) -> Result<(), PlaybackError>;

    /// Seeks to an absolute position in seconds.
    fn seek_to(&mut self, seconds: f64) -> Result<(), PlaybackError>;

    /// Sets the output volume, from 0.0 (silent) to 1.0 (full).
    fn set_volume(&mut self, level: f64) -> Result<(), PlaybackError>;

    /// Makes the backend repeat the loaded track on its own, without ever
    /// reporting its end.
    fn set_native_loop(&mut self, enabled: bool) -> Result<(), PlaybackError>;
}

/// Receives playback notifications.
///
/// All methods default to doing nothing, so an observer only implements what
/// it cares about.
pub trait PlaybackObserver {
    /// A new track was loaded and started.
    fn on_track_changed(&mut self, _index: usize, _song: &Song) {}

    fn on_status_changed(&mut self, _status: PlaybackStatus) {}

    /// Periodic progress while playing a track of known duration.
    fn on_position_tick(&mut self, _position: f64, _duration: f64) {}

    fn on_volume_changed(&mut self, _level: u8, _muted: bool) {}
}
