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

//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::{
    io,
    path::{Path, PathBuf},
};

use botify::{
    Capabilities, LoadId, PlaybackError, PlaybackHandle, Session,
    error::PersistenceError,
    persistence::{EphemeralGateway, LibraryGateway, LibrarySnapshot},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Load(PathBuf),
    Resume,
    Pause,
    SeekTo(f64),
    Volume(f64),
    NativeLoop(bool),
}

/// A playback handle that remembers every request it was given.
#[derive(Debug, Default)]
pub struct RecordingHandle {
    pub calls: Vec<Call>,
}

impl RecordingHandle {
    pub fn loaded(&self) -> Vec<&Path> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Load(path) => Some(path.as_path()),
                _ => None,
            })
            .collect()
    }
}

impl PlaybackHandle for RecordingHandle {
    fn load(&mut self, path: &Path, _load: LoadId) -> Result<(), PlaybackError> {
        self.calls.push(Call::Load(path.to_path_buf()));
        Ok(())
    }

    fn resume(&mut self) -> Result<(), PlaybackError> {
        self.calls.push(Call::Resume);
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        self.calls.push(Call::Pause);
        Ok(())
    }

    fn seek_to(&mut self, seconds: f64) -> Result<(), PlaybackError> {
        self.calls.push(Call::SeekTo(seconds));
        Ok(())
    }

    fn set_volume(&mut self, level: f64) -> Result<(), PlaybackError> {
        self.calls.push(Call::Volume(level));
        Ok(())
    }

    fn set_native_loop(&mut self, enabled: bool) -> Result<(), PlaybackError> {
        self.calls.push(Call::NativeLoop(enabled));
        Ok(())
    }
}

/// A gateway whose storage is always unreadable.
pub struct BrokenGateway;

impl LibraryGateway for BrokenGateway {
    fn load(&self) -> Result<Option<LibrarySnapshot>, PersistenceError> {
        Err(io::Error::other("disk on fire").into())
    }

    fn save(&self, _snapshot: &LibrarySnapshot) -> Result<(), PersistenceError> {
        Err(io::Error::other("disk on fire").into())
    }
}

pub fn session() -> Session<RecordingHandle> {
    Session::open(Box::new(EphemeralGateway), RecordingHandle::default(), Capabilities::FULL)
}

pub fn song_paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(|name| PathBuf::from(format!("/music/{name}.mp3"))).collect()
}
