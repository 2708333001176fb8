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

//! Keyboard routing.
//!
//! Keys go to the first taker, in this order: the command line, the
//! playlist picker (which is modal while open), the focused pane, and
//! finally the global playback bindings.

use anyhow::Result;
use botify::MediaControl;
use crossterm::event::{Event, KeyCode, KeyEvent};

use super::handlers::{handle_select_scope, save_library};
use crate::{
    App, Focus, StatusMessage,
    components::{PickerAction, SongTableAction},
    events::AppEvent,
};

/// Maps keyboard input to application actions and playback commands.
///
/// # Errors
///
/// Returns an error if an event cannot be sent back to the event loop.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let event = Event::Key(key);

    if app.commander.handle_event(&event, &app.task_tx, &app.event_tx) {
        return Ok(());
    }

    if app.playlist_picker.is_open() {
        if let Some(action) = app.playlist_picker.process_event(&event, app.session.library()) {
            apply_picker_action(app, action);
        }
        return Ok(());
    }

    let consumed = match app.focus {
        Focus::Sidebar => process_sidebar_key(app, &event)?,
        Focus::Songs => process_song_table_key(app, &event)?,
    };

    if !consumed {
        process_global_key_event(app, key)?;
    }

    Ok(())
}

fn apply_picker_action(app: &mut App, action: PickerAction) {
    match action {
        PickerAction::Toggle(song_id, playlist_id) => {
            let Some(playlist) = app.session.library().playlist(playlist_id) else {
                return;
            };
            let name = playlist.name().to_string();

            let message = if playlist.contains(song_id) {
                app.session.remove_song_from_playlist(song_id, playlist_id);
                format!("Removed from {name}")
            } else {
                app.session.add_song_to_playlist(song_id, playlist_id);
                format!("Added to {name}")
            };

            app.status = Some(StatusMessage::Info(message));
            save_library(app);
        }
    }
}

/// Returns `true` if the sidebar used the key.
fn process_sidebar_key(app: &mut App, event: &Event) -> Result<bool> {
    let Event::Key(key) = event else {
        return Ok(false);
    };

    if !matches!(
        key.code,
        KeyCode::Char('j' | 'k') | KeyCode::Up | KeyCode::Down | KeyCode::Enter
    ) {
        return Ok(false);
    }

    if let Some(scope) = app.sidebar.process_event(event, app.session.library()) {
        handle_select_scope(app, scope);
    }

    Ok(true)
}

/// Returns `true` if the song table used the key.
fn process_song_table_key(app: &mut App, event: &Event) -> Result<bool> {
    let Event::Key(key) = event else {
        return Ok(false);
    };

    if !matches!(
        key.code,
        KeyCode::Char('j' | 'k' | 'g' | 'G' | 'o')
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::Home
            | KeyCode::End
            | KeyCode::Enter
    ) {
        return Ok(false);
    }

    let action = {
        let songs = app.session.songs();
        let playing = app.session.engine().current_index();
        app.song_table
            .as_widget("", &songs, playing, true)
            .process_event(event)
    };

    if let Some(SongTableAction::Play(index)) = action {
        if let Err(e) = app.session.play(index) {
            app.event_tx.send(AppEvent::Error(e.to_string()))?;
        }
    }

    Ok(true)
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let seek_step = app.config.seek_step_secs;
    let volume_step = i16::from(app.config.volume_step);

    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,

        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = match app.focus {
                Focus::Sidebar => Focus::Songs,
                Focus::Songs => Focus::Sidebar,
            };
        }

        // Playback
        KeyCode::Char(' ') => app
            .event_tx
            .send(AppEvent::Media(MediaControl::TogglePlayPause))?,
        KeyCode::Char('n') => app.event_tx.send(AppEvent::Media(MediaControl::Next))?,
        KeyCode::Char('p') => app.event_tx.send(AppEvent::Media(MediaControl::Previous))?,
        KeyCode::Char(',') | KeyCode::Left => app
            .event_tx
            .send(AppEvent::Media(MediaControl::SeekBy(-seek_step)))?,
        KeyCode::Char('.') | KeyCode::Right => app
            .event_tx
            .send(AppEvent::Media(MediaControl::SeekBy(seek_step)))?,

        // Modes
        KeyCode::Char('r') => app.event_tx.send(AppEvent::ToggleLoopScope)?,
        KeyCode::Char('R') => app.event_tx.send(AppEvent::ToggleLoopSong)?,
        KeyCode::Char('s') => app.event_tx.send(AppEvent::ToggleShuffle)?,

        // Volume
        KeyCode::Char('-') => app.event_tx.send(AppEvent::AdjustVolume(-volume_step))?,
        KeyCode::Char('=') | KeyCode::Char('+') => {
            app.event_tx.send(AppEvent::AdjustVolume(volume_step))?
        }
        KeyCode::Char('m') => app.event_tx.send(AppEvent::ToggleMute)?,

        // Playlists
        KeyCode::Char('a') => {
            let selected = app
                .song_table
                .selected()
                .and_then(|i| app.session.songs().get(i).map(|song| song.id()));
            if let Some(id) = selected {
                app.playlist_picker.open(id);
            }
        }

        _ => {}
    }

    Ok(())
}
