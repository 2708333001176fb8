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

//! The application context.
//!
//! A [`Session`] is constructed once at startup and owns everything the
//! player needs: the [`Library`], the [`PlaybackEngine`], the selected
//! [`Scope`] and the [`LibraryGateway`] used to persist the library.
//!
//! Engine operations are forwarded with the resolved sequence of the
//! selected scope, so callers never have to resolve scopes themselves.

use std::path::PathBuf;

use tracing::{info, trace, warn};

use crate::{
    error::{LibraryError, PersistenceError, PlaybackError},
    library::{
        Library,
        scope::{self, Scope},
    },
    model::{PlaylistId, Song, SongId},
    persistence::LibraryGateway,
    playback::{Capabilities, LoadId, PlaybackEngine, PlaybackHandle, PlaybackObserver},
};

/// Actions available to external media controls, such as a lock screen or
/// desktop media keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaControl {
    Play,
    Pause,
    TogglePlayPause,
    Next,
    Previous,
    /// Seek to an absolute position, in seconds.
    SeekTo(f64),
    /// Seek relative to the current position, in seconds.
    SeekBy(f64),
}

/// Metadata about the loaded track, for external surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlaying {
    pub title: String,
    /// Name of the selected scope.
    pub album: String,
    pub position: f64,
    pub duration: Option<f64>,
}

pub struct Session<H> {
    library: Library,
    engine: PlaybackEngine<H>,
    scope: Scope,
    gateway: Box<dyn LibraryGateway>,
}

impl<H: PlaybackHandle> Session<H> {
    /// Opens a session, loading the library through `gateway`.
    ///
    /// A library that cannot be loaded is logged and treated the same as one
    /// that was never saved, the session starts out empty.
    pub fn open(gateway: Box<dyn LibraryGateway>, handle: H, capabilities: Capabilities) -> Self {
        let library = match gateway.load() {
            Ok(Some(snapshot)) => Library::from_snapshot(snapshot),
            Ok(None) => Library::new(),
            Err(e) => {
                warn!("failed to load library, starting empty: {}", e);
                Library::new()
            }
        };

        info!(
            songs = library.songs().len(),
            playlists = library.playlists().len(),
            "opened session"
        );

        Self {
            library,
            engine: PlaybackEngine::new(handle, capabilities),
            scope: Scope::All,
            gateway,
        }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn engine(&self) -> &PlaybackEngine<H> {
        &self.engine
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn subscribe(&mut self, observer: Box<dyn PlaybackObserver>) {
        self.engine.subscribe(observer);
    }

    /// Persists the library.
    ///
    /// A failure leaves the in-memory state untouched, the caller decides how
    /// to tell the user.
    pub fn save(&self) -> Result<(), PersistenceError> {
        self.gateway.save(&self.library.snapshot())
    }

    /// The resolved song sequence of the selected scope.
    pub fn songs(&self) -> Vec<&Song> {
        self.library.resolve_scope(self.scope)
    }

    pub fn scope_name(&self) -> Option<&str> {
        scope::scope_name(&self.library, self.scope)
    }

    pub fn current_song(&self) -> Option<&Song> {
        self.engine.current_song(&self.songs())
    }

    /// Adds songs for the given files.
    ///
    /// If the library was empty and every song is in view, the first new
    /// song starts playing straight away.
    pub fn add_songs<I, P>(&mut self, paths: I) -> Result<Vec<SongId>, PlaybackError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let was_empty = self.library.is_empty();
        let ids = self.library.add_songs(paths);

        if was_empty && !ids.is_empty() && self.scope == Scope::All {
            self.play(0)?;
        }

        Ok(ids)
    }

    /// Records a probed duration, see [`Library::set_duration`].
    ///
    /// If the song is the one loaded, the engine learns the duration as well,
    /// even when the song is no longer in the selected scope.
    pub fn set_duration(&mut self, id: SongId, seconds: f64) -> bool {
        if !self.library.set_duration(id, seconds) {
            return false;
        }

        if self.engine.loaded_song() == Some(id) && self.engine.duration().is_none() {
            self.engine.update_duration(seconds);
        }

        true
    }

    /// Removes a song from the library.
    ///
    /// The current index follows the loaded song to its new position, or is
    /// cleared if the loaded song was the one removed.
    pub fn remove_song(&mut self, id: SongId) -> Option<Song> {
        let current = self.current_song().map(Song::id);
        let removed = self.library.remove_song(id)?;
        self.relocate_current(current);
        Some(removed)
    }

    pub fn create_playlist(&mut self, name: &str) -> Result<PlaylistId, LibraryError> {
        self.library.create_playlist(name)
    }

    /// Deletes a playlist. If it was the selected scope, every song is
    /// selected instead.
    pub fn delete_playlist(&mut self, id: PlaylistId) -> bool {
        if self.library.delete_playlist(id).is_none() {
            return false;
        }

        if self.scope == Scope::Playlist(id) {
            self.select_scope(Scope::All);
        }

        true
    }

    pub fn add_song_to_playlist(&mut self, song_id: SongId, playlist_id: PlaylistId) -> bool {
        self.library.add_song_to_playlist(song_id, playlist_id)
    }

    pub fn remove_song_from_playlist(&mut self, song_id: SongId, playlist_id: PlaylistId) -> bool {
        let current = self.current_song().map(Song::id);
        if !self.library.remove_song_from_playlist(song_id, playlist_id) {
            return false;
        }

        if self.scope == Scope::Playlist(playlist_id) {
            self.relocate_current(current);
        }
        true
    }

    /// Selects the scope to browse and play from.
    ///
    /// The current index is always forgotten, even if the new scope holds the
    /// same song at the same position. Whatever is playing carries on. A
    /// scope naming an unknown playlist is ignored.
    pub fn select_scope(&mut self, scope: Scope) {
        if scope.playlist_id().is_some_and(|id| self.library.playlist(id).is_none()) {
            return;
        }

        self.scope = scope;
        self.engine.reset_index();
    }

    fn relocate_current(&mut self, current: Option<SongId>) {
        let index = current.and_then(|id| self.songs().iter().position(|song| song.id() == id));
        self.engine.relocate(index);
    }

    pub fn play(&mut self, index: usize) -> Result<(), PlaybackError> {
        let songs = self.library.resolve_scope(self.scope);
        self.engine.play(&songs, index)
    }

    pub fn toggle_play_pause(&mut self) -> Result<(), PlaybackError> {
        let songs = self.library.resolve_scope(self.scope);
        self.engine.toggle_play_pause(&songs)
    }

    pub fn next(&mut self) -> Result<(), PlaybackError> {
        let songs = self.library.resolve_scope(self.scope);
        self.engine.next(&songs)
    }

    pub fn previous(&mut self) -> Result<(), PlaybackError> {
        let songs = self.library.resolve_scope(self.scope);
        self.engine.previous(&songs)
    }

    pub fn track_finished(&mut self) -> Result<(), PlaybackError> {
        let songs = self.library.resolve_scope(self.scope);
        self.engine.track_finished(&songs)
    }

    pub fn seek(&mut self, fraction: f64) -> Result<(), PlaybackError> {
        self.engine.seek(fraction)
    }

    pub fn seek_by(&mut self, delta: f64) -> Result<(), PlaybackError> {
        self.engine.seek_by(delta)
    }

    pub fn set_loop_song(&mut self, enabled: bool) -> Result<(), PlaybackError> {
        self.engine.set_loop_song(enabled)
    }

    pub fn set_loop_scope(&mut self, enabled: bool) {
        self.engine.set_loop_scope(enabled);
    }

    pub fn set_shuffle(&mut self, enabled: bool) {
        self.engine.set_shuffle(enabled);
    }

    pub fn set_volume(&mut self, level: u8) -> Result<(), PlaybackError> {
        self.engine.set_volume(level)
    }

    pub fn adjust_volume(&mut self, delta: i16) -> Result<(), PlaybackError> {
        self.engine.adjust_volume(delta)
    }

    pub fn toggle_mute(&mut self) -> Result<(), PlaybackError> {
        self.engine.toggle_mute()
    }

    pub fn update_position(&mut self, seconds: f64) {
        self.engine.update_position(seconds);
    }

    pub fn update_duration(&mut self, seconds: f64) {
        self.engine.update_duration(seconds);
    }

    /// Like [`Self::track_finished`], for a backend report tagged with the
    /// load it is about. Reports about a replaced track are dropped.
    pub fn track_finished_for(&mut self, load: LoadId) -> Result<(), PlaybackError> {
        if !self.engine.is_current_load(load) {
            trace!(?load, "ignoring end of a replaced track");
            return Ok(());
        }
        self.track_finished()
    }

    pub fn update_position_for(&mut self, load: LoadId, seconds: f64) {
        if self.engine.is_current_load(load) {
            self.engine.update_position(seconds);
        }
    }

    pub fn update_duration_for(&mut self, load: LoadId, seconds: f64) {
        if self.engine.is_current_load(load) {
            self.engine.update_duration(seconds);
        }
    }

    pub fn tick(&mut self) {
        self.engine.tick();
    }

    /// Routes an external media control through the same operations as the
    /// in-app controls.
    pub fn handle_media_control(&mut self, control: MediaControl) -> Result<(), PlaybackError> {
        let songs = self.library.resolve_scope(self.scope);

        match control {
            MediaControl::Play => self.engine.resume(&songs),
            MediaControl::Pause => self.engine.pause(),
            MediaControl::TogglePlayPause => self.engine.toggle_play_pause(&songs),
            MediaControl::Next => self.engine.next(&songs),
            MediaControl::Previous => self.engine.previous(&songs),
            MediaControl::SeekTo(seconds) => self.engine.seek_to(seconds),
            MediaControl::SeekBy(delta) => self.engine.seek_by(delta),
        }
    }

    /// Metadata of the loaded track, `None` if nothing is loaded.
    pub fn now_playing(&self) -> Option<NowPlaying> {
        let song = self.current_song()?;

        Some(NowPlaying {
            title: song.name().to_string(),
            album: self.scope_name().unwrap_or_default().to_string(),
            position: self.engine.position(),
            duration: self.engine.duration(),
        })
    }
}
