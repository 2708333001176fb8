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

//! Application event distribution and orchestration.
//!
//! This module defines the central event-handling logic for the application,
//! bridging the gap between user input (keyboard), background worker updates
//! (task worker, audio player, playback observer), and the UI rendering
//! pipeline.
//!
//! # Architecture
//!
//! The system follows a reactive event-loop pattern:
//!
//! 1. **Capture**: Events are received via the [`AppEvent`] enum through an
//!    asynchronous channel.
//! 2. **Process**: The [`process_events`] function updates the session, and
//!    triggers tasks on the background worker where work may block.
//! 3. **Render**: After each event is processed, the UI is re-drawn using the
//!    `ratatui` terminal.

mod handlers;
mod key_handlers;

use handlers::*;
use key_handlers::process_key_event;

use std::{io::Stdout, path::PathBuf};

use anyhow::{Result, bail};
use botify::{LoadId, MediaControl, SongId};
use crossterm::event::KeyEvent;
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{App, render::draw};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    // Library
    SongsFound(Vec<PathBuf>),
    DurationProbed(SongId, f64),
    CreatePlaylist(String),
    DeleteSelectedPlaylist,
    RemoveSelectedSong,
    ShowAllSongs,

    // Playback controls
    Media(MediaControl),
    ToggleLoopSong,
    ToggleLoopScope,
    ToggleShuffle,
    SetVolume(u8),
    AdjustVolume(i16),
    ToggleMute,

    // Audio player reports, tagged with the load they are about
    PositionChanged(LoadId, f64),
    DurationChanged(LoadId, f64),
    TrackFinished(LoadId),

    // Playback observer notifications
    NowPlaying(String),
    VolumeChanged { level: u8, muted: bool },

    Tick,

    ExitApplication,

    Error(String),
    FatalError(String),
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
///
/// # Errors
///
/// Returns an error on a fatal event, such as the audio worker failing, or if
/// the terminal can no longer be drawn.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        match event {
            AppEvent::ExitApplication => break,
            AppEvent::FatalError(message) => bail!(message),

            AppEvent::Key(key) => process_key_event(app, key)?,

            AppEvent::SongsFound(paths) => handle_songs_found(app, paths)?,
            AppEvent::DurationProbed(id, secs) => handle_duration_probed(app, id, secs),
            AppEvent::CreatePlaylist(name) => handle_create_playlist(app, &name),
            AppEvent::DeleteSelectedPlaylist => handle_delete_selected_playlist(app),
            AppEvent::RemoveSelectedSong => handle_remove_selected_song(app),
            AppEvent::ShowAllSongs => handle_select_scope(app, botify::Scope::All),

            AppEvent::Media(control) => handle_media_control(app, control),
            AppEvent::ToggleLoopSong => handle_toggle_loop_song(app),
            AppEvent::ToggleLoopScope => handle_toggle_loop_scope(app),
            AppEvent::ToggleShuffle => handle_toggle_shuffle(app),
            AppEvent::SetVolume(level) => handle_set_volume(app, level),
            AppEvent::AdjustVolume(delta) => handle_adjust_volume(app, delta),
            AppEvent::ToggleMute => handle_toggle_mute(app),

            AppEvent::PositionChanged(load, secs) => handle_position_changed(app, load, secs),
            AppEvent::DurationChanged(load, secs) => handle_duration_changed(app, load, secs),
            AppEvent::TrackFinished(load) => handle_track_finished(app, load),

            AppEvent::NowPlaying(title) => handle_now_playing(app, title),
            AppEvent::VolumeChanged { level, muted } => handle_volume_changed(app, level, muted),

            AppEvent::Tick => handle_tick(app),

            AppEvent::Error(message) => handle_error(app, message),
        }

        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}
