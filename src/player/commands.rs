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

//! MPV-backed audio playback worker.
//!
//! This module bridges the command-based [`super::MpvHandle`] interface and
//! the MPV property observation system.
//!
//! # Architecture
//!
//! The worker operates using a dual-channel communication pattern:
//! 1. **Command Channel**: Receives [`AudioPlayerCommand`]s from the handle
//!    (load, pause, seek, and so on).
//! 2. **Event Channel**: Broadcasts [`AppEvent`]s to notify the UI of
//!    progress, duration and the natural end of a track.
//!
//! A command MPV rejects, such as a seek while nothing is loaded, is logged
//! and otherwise ignored.
//!
//! Every report is tagged with the [`LoadId`] of the file it is about. A
//! file only becomes the active one once MPV announces that it started, so
//! events still queued for the replaced file keep the replaced file's id.

use std::{
    collections::VecDeque,
    path::PathBuf,
    sync::mpsc::{self, Receiver, Sender},
    thread,
};

use anyhow::{Context, Result};
use botify::LoadId;
use mpv::Format;
use tracing::{debug, warn};

use crate::events::AppEvent;

#[derive(Debug)]
pub(crate) enum AudioPlayerCommand {
    Load(PathBuf, LoadId),
    SetPause(bool),
    SeekTo(f64),
    /// Volume from 0.0 to 1.0.
    SetVolume(f64),
    SetLoopFile(bool),
}

/// Spawns the audio worker thread to process playback commands.
///
/// If the worker returns an error, it is caught here and broadcast as a fatal
/// application event.
pub(crate) fn spawn_player_worker(
    command_rx: Receiver<AudioPlayerCommand>,
    event_tx: Sender<AppEvent>,
) {
    let error_tx = event_tx.clone();

    thread::spawn(move || {
        if let Err(e) = audio_player_worker(command_rx, event_tx) {
            let _ = error_tx.send(AppEvent::FatalError(format!("MPV worker failure: {:?}", e)));
        }
    });
}

/// The primary execution loop for the audio player backend.
///
/// Initializes a local `libmpv` context, then alternates between draining
/// commands and waiting briefly for MPV events, until the handle is dropped.
///
/// # Errors
///
/// Returns an error if the MPV context fails to initialize, or if events can
/// no longer be delivered.
fn audio_player_worker(
    command_rx: Receiver<AudioPlayerCommand>,
    event_tx: Sender<AppEvent>,
) -> Result<()> {
    let mut handler = (|| {
        let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
        builder
            .set_option("vo", "null")
            .context("Failed to set no video output")?;
        builder.build().context("Failed to build MPV handler")
    })()?;

    handler
        .observe_property::<f64>("duration", 0)
        .context("Failed to observe duration")?;
    handler
        .observe_property::<f64>("time-pos", 0)
        .context("Failed to observe time-pos")?;

    let mut loads = LoadTracker::default();

    loop {
        if !process_commands(&mut handler, &command_rx, &mut loads) {
            debug!("audio handle dropped, stopping worker");
            return Ok(());
        }
        process_mpv_events(&mut handler, &event_tx, &mut loads)?;
    }
}

/// Which load MPV is playing, and which are still on their way.
#[derive(Debug, Default)]
struct LoadTracker {
    active: LoadId,
    pending: VecDeque<LoadId>,
}

impl LoadTracker {
    fn requested(&mut self, load: LoadId) {
        self.pending.push_back(load);
    }

    fn started(&mut self) {
        if let Some(load) = self.pending.pop_front() {
            self.active = load;
        }
    }
}

/// Drains and executes all pending commands, returning `false` once the
/// command channel has been closed.
fn process_commands(
    handler: &mut mpv::MpvHandler,
    command_rx: &mpsc::Receiver<AudioPlayerCommand>,
    loads: &mut LoadTracker,
) -> bool {
    loop {
        let command = match command_rx.try_recv() {
            Ok(command) => command,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        };

        match execute_command(handler, &command) {
            Ok(()) => {
                if let AudioPlayerCommand::Load(_, load) = command {
                    loads.requested(load);
                }
            }
            Err(e) => warn!(?command, "MPV rejected command: {:?}", e),
        }
    }
}

fn execute_command(handler: &mut mpv::MpvHandler, command: &AudioPlayerCommand) -> Result<()> {
    match command {
        AudioPlayerCommand::Load(path, _) => {
            let filename = path.to_string_lossy();
            handler.command(&["loadfile", &filename, "replace"])?;
        }
        AudioPlayerCommand::SetPause(paused) => handler.set_property("pause", *paused)?,
        AudioPlayerCommand::SeekTo(seconds) => {
            handler.command(&["seek", &seconds.to_string(), "absolute"])?;
        }
        AudioPlayerCommand::SetVolume(level) => {
            handler.command(&["set", "volume", &(level * 100.0).to_string()])?;
        }
        AudioPlayerCommand::SetLoopFile(enabled) => {
            handler.command(&["set", "loop-file", if *enabled { "inf" } else { "no" }])?;
        }
    }

    Ok(())
}

/// Polls for MPV events and forwards the ones the session cares about.
///
/// This function waits for up to 50ms for an event from the MPV context.
fn process_mpv_events(
    handler: &mut mpv::MpvHandler,
    event_tx: &mpsc::Sender<AppEvent>,
    loads: &mut LoadTracker,
) -> Result<()> {
    if let Some(mpv_event) = handler.wait_event(0.05) {
        let load = loads.active;

        let app_event = match mpv_event {
            mpv::Event::StartFile => {
                loads.started();
                None
            }
            mpv::Event::PropertyChange { name, change, .. } => match (name, change) {
                ("duration", Format::Double(duration)) => {
                    Some(AppEvent::DurationChanged(load, duration))
                }
                ("time-pos", Format::Double(seconds)) if seconds >= 0.0 => {
                    Some(AppEvent::PositionChanged(load, seconds))
                }
                _ => None,
            },
            mpv::Event::EndFile(Ok(mpv::EndFileReason::MPV_END_FILE_REASON_EOF)) => {
                Some(AppEvent::TrackFinished(load))
            }
            _ => None,
        };

        if let Some(event) = app_event {
            event_tx.send(event).context("Failed to send event")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_becomes_active_only_once_started() {
        let mut loads = LoadTracker::default();

        loads.requested(LoadId(1));
        loads.started();
        loads.requested(LoadId(2));
        loads.requested(LoadId(3));
        assert_eq!(loads.active, LoadId(1));

        loads.started();
        assert_eq!(loads.active, LoadId(2));
        loads.started();
        loads.started();
        assert_eq!(loads.active, LoadId(3));
    }
}
