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

//! MPV-backed playback.
//!
//! This module provides [`MpvHandle`], the [`PlaybackHandle`] the session
//! drives. It does not perform audio processing itself but instead sends
//! instructions to a background worker thread that owns the MPV context, so
//! that heavy audio operations never block the main application thread.
//!
//! Progress and end-of-track come back from the worker as [`AppEvent`]s, and
//! [`EventForwarder`] turns engine notifications into [`AppEvent`]s too.

mod commands;

use std::{
    path::Path,
    sync::mpsc::{self, Sender},
};

use anyhow::Result;
use botify::{LoadId, PlaybackError, PlaybackObserver, PlaybackStatus, Song};
use tracing::trace;

use crate::{events::AppEvent, player::commands::AudioPlayerCommand};

/// A handle to the audio playback worker.
pub(crate) struct MpvHandle {
    /// Channel for sending commands to the background worker thread.
    command_tx: mpsc::Sender<AudioPlayerCommand>,
}

impl MpvHandle {
    /// Spawns the audio worker thread and returns a new player handle.
    ///
    /// # Arguments
    ///
    /// * `event_tx` - A channel to send application-level events (like progress
    ///   updates or errors) back to the main event loop.
    pub(crate) fn new(event_tx: Sender<AppEvent>) -> Result<Self> {
        let (command_tx, command_rx) = mpsc::channel::<AudioPlayerCommand>();

        commands::spawn_player_worker(command_rx, event_tx);

        Ok(Self { command_tx })
    }

    fn send(&self, command: AudioPlayerCommand) -> Result<(), PlaybackError> {
        self.command_tx
            .send(command)
            .map_err(|_| PlaybackError::Backend("audio worker has stopped".into()))
    }
}

impl botify::PlaybackHandle for MpvHandle {
    fn load(&mut self, path: &Path, load: LoadId) -> Result<(), PlaybackError> {
        self.send(AudioPlayerCommand::Load(path.to_path_buf(), load))
    }

    fn resume(&mut self) -> Result<(), PlaybackError> {
        self.send(AudioPlayerCommand::SetPause(false))
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        self.send(AudioPlayerCommand::SetPause(true))
    }

    fn seek_to(&mut self, seconds: f64) -> Result<(), PlaybackError> {
        self.send(AudioPlayerCommand::SeekTo(seconds))
    }

    fn set_volume(&mut self, level: f64) -> Result<(), PlaybackError> {
        self.send(AudioPlayerCommand::SetVolume(level))
    }

    fn set_native_loop(&mut self, enabled: bool) -> Result<(), PlaybackError> {
        self.send(AudioPlayerCommand::SetLoopFile(enabled))
    }
}

/// Forwards engine notifications to the main event loop.
pub(crate) struct EventForwarder {
    event_tx: Sender<AppEvent>,
}

impl EventForwarder {
    pub(crate) fn new(event_tx: Sender<AppEvent>) -> Self {
        Self { event_tx }
    }
}

impl PlaybackObserver for EventForwarder {
    fn on_track_changed(&mut self, _index: usize, song: &Song) {
        let _ = self.event_tx.send(AppEvent::NowPlaying(song.name().to_string()));
    }

    fn on_status_changed(&mut self, status: PlaybackStatus) {
        trace!(?status, "playback status changed");
    }

    fn on_position_tick(&mut self, position: f64, duration: f64) {
        trace!(position, duration, "position");
    }

    fn on_volume_changed(&mut self, level: u8, muted: bool) {
        let _ = self.event_tx.send(AppEvent::VolumeChanged { level, muted });
    }
}
