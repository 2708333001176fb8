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

use std::path::PathBuf;

use anyhow::Result;
use botify::{LoadId, MediaControl, PlaybackError, Scope, SongId};
use tracing::{debug, warn};

use crate::{App, Focus, StatusMessage, tasks::AppTask, term};

/// Persists the library, reporting a failure in the status line. The
/// in-memory library stays as it is either way.
pub(super) fn save_library(app: &mut App) {
    if let Err(e) = app.session.save() {
        warn!("failed to save library: {}", e);
        app.status = Some(StatusMessage::Error(format!("Library not saved: {e}")));
    }
}

/// Reports a failed playback command without ending the session.
fn report_playback(app: &mut App, result: Result<(), PlaybackError>) {
    if let Err(e) = result {
        warn!("playback command failed: {}", e);
        app.status = Some(StatusMessage::Error(e.to_string()));
    }
}

pub(super) fn handle_songs_found(app: &mut App, paths: Vec<PathBuf>) -> Result<()> {
    let count = paths.len();
    let result = app.session.add_songs(paths);

    let ids = match result {
        Ok(ids) => ids,
        Err(e) => {
            report_playback(app, Err(e));
            return Ok(());
        }
    };

    for id in &ids {
        if let Some(song) = app.session.library().song(*id) {
            app.task_tx
                .send(AppTask::ProbeDuration(*id, song.path().to_path_buf()))?;
        }
    }

    if app.song_table.selected().is_none() {
        app.song_table.reset_selection(app.session.songs().len());
    }

    app.status = Some(StatusMessage::Info(match count {
        1 => "Added 1 song".to_string(),
        n => format!("Added {n} songs"),
    }));
    save_library(app);

    Ok(())
}

pub(super) fn handle_duration_probed(app: &mut App, id: SongId, seconds: f64) {
    if app.session.set_duration(id, seconds) {
        save_library(app);
    } else {
        debug!(?id, seconds, "probed duration ignored");
    }
}

pub(super) fn handle_create_playlist(app: &mut App, name: &str) {
    match app.session.create_playlist(name) {
        Ok(_) => {
            app.status = Some(StatusMessage::Info(format!("Created playlist \"{}\"", name.trim())));
            save_library(app);
        }
        Err(e) => app.status = Some(StatusMessage::Error(e.to_string())),
    }
}

/// Deletes the playlist highlighted in the sidebar.
pub(super) fn handle_delete_selected_playlist(app: &mut App) {
    let selected = app.sidebar.selected_scope(app.session.library());
    let Some(id) = selected.and_then(Scope::playlist_id) else {
        app.status = Some(StatusMessage::Error("Select a playlist to delete".to_string()));
        return;
    };

    let was_active = app.session.scope() == Scope::Playlist(id);
    if app.session.delete_playlist(id) {
        app.sidebar.focus_scope(app.session.library(), app.session.scope());
        if was_active {
            app.song_table.reset_selection(app.session.songs().len());
        }
        app.status = Some(StatusMessage::Info("Deleted playlist".to_string()));
        save_library(app);
    }
}

/// Removes the highlighted song. In a playlist the song only leaves that
/// playlist, with every song in view it leaves the library.
pub(super) fn handle_remove_selected_song(app: &mut App) {
    let Some(index) = app.song_table.selected() else {
        return;
    };
    let Some(id) = app.session.songs().get(index).map(|song| song.id()) else {
        return;
    };

    let removed = match app.session.scope() {
        Scope::All => app.session.remove_song(id).is_some(),
        Scope::Playlist(playlist_id) => app.session.remove_song_from_playlist(id, playlist_id),
    };

    if removed {
        let len = app.session.songs().len();
        if index >= len {
            app.song_table.table_state.select(len.checked_sub(1));
        }
        save_library(app);
    }
}

pub(super) fn handle_select_scope(app: &mut App, scope: Scope) {
    app.session.select_scope(scope);
    app.sidebar.focus_scope(app.session.library(), app.session.scope());
    app.song_table.reset_selection(app.session.songs().len());
    app.focus = Focus::Songs;
}

pub(super) fn handle_media_control(app: &mut App, control: MediaControl) {
    let result = app.session.handle_media_control(control);
    report_playback(app, result);
}

pub(super) fn handle_toggle_loop_song(app: &mut App) {
    let enabled = !app.session.engine().loop_song();
    let result = app.session.set_loop_song(enabled);
    report_playback(app, result);
}

pub(super) fn handle_toggle_loop_scope(app: &mut App) {
    let enabled = !app.session.engine().loop_scope();
    app.session.set_loop_scope(enabled);
}

pub(super) fn handle_toggle_shuffle(app: &mut App) {
    let enabled = !app.session.engine().shuffle();
    app.session.set_shuffle(enabled);
}

pub(super) fn handle_set_volume(app: &mut App, level: u8) {
    let result = app.session.set_volume(level);
    report_playback(app, result);
}

pub(super) fn handle_adjust_volume(app: &mut App, delta: i16) {
    let result = app.session.adjust_volume(delta);
    report_playback(app, result);
}

pub(super) fn handle_toggle_mute(app: &mut App) {
    let result = app.session.toggle_mute();
    report_playback(app, result);
}

pub(super) fn handle_position_changed(app: &mut App, load: LoadId, seconds: f64) {
    app.session.update_position_for(load, seconds);
}

pub(super) fn handle_duration_changed(app: &mut App, load: LoadId, seconds: f64) {
    app.session.update_duration_for(load, seconds);
}

pub(super) fn handle_track_finished(app: &mut App, load: LoadId) {
    let result = app.session.track_finished_for(load);
    report_playback(app, result);
}

pub(super) fn handle_now_playing(app: &mut App, title: String) {
    term::set_terminal_title(&format!("botify - {title}"));
    app.now_playing = Some(title);
}

pub(super) fn handle_volume_changed(app: &mut App, level: u8, muted: bool) {
    app.status = Some(StatusMessage::Info(if muted {
        "Muted".to_string()
    } else {
        format!("Volume {level}%")
    }));
}

pub(super) fn handle_tick(app: &mut App) {
    app.session.tick();
}

pub(super) fn handle_error(app: &mut App, message: String) {
    app.status = Some(StatusMessage::Error(message));
}
