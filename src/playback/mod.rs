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

//! Playback control and state management.
//!
//! This module provides the [`PlaybackEngine`], a small state machine over
//! `Stopped`, `Playing` and `Paused` that decides which song plays next under
//! the current combination of shuffle, loop-song and loop-scope modes.
//!
//! The engine never holds on to library data. Every operation that needs to
//! know about songs takes the resolved sequence of the active scope as an
//! argument, and the current position is just an index into that sequence.
//!
//! Audio itself is produced by a [`PlaybackHandle`], and interested parties
//! learn about changes by subscribing a [`PlaybackObserver`].
//!
//! Index checks are deliberately lenient: asking for a track that does not
//! exist, seeking a track of unknown length, or moving past the end of a
//! non-looping scope all quietly do nothing.

mod handle;
mod volume;

pub use handle::{PlaybackHandle, PlaybackObserver};
pub use volume::{MAX_VOLUME, Volume};

use rand::{rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    error::PlaybackError,
    model::{Song, SongId, is_known_duration},
};

/// Identifies one load of a track into the handle.
///
/// Every [`PlaybackEngine::play`] hands the handle a fresh id, and backends
/// tag their progress and end-of-track reports with it, so that a report
/// about a track that has since been replaced can be recognised and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LoadId(pub u64);

/// Beyond this many seconds into a track, "previous" restarts the track
/// instead of moving back.
pub const RESTART_THRESHOLD_SECS: f64 = 3.0;

/// Represents the current playback status of the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// The optional features a particular front end exposes.
///
/// Operations for a disabled capability are accepted and ignored.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Capabilities {
    pub shuffle: bool,
    pub volume_control: bool,
    /// Separate loop-song and loop-scope toggles. Without this there is a
    /// single loop toggle, which loops the scope.
    pub split_loop_modes: bool,
}

impl Capabilities {
    pub const FULL: Self = Self {
        shuffle: true,
        volume_control: true,
        split_loop_modes: true,
    };

    /// Desktop shell: split loops and volume, no shuffle.
    pub const DESKTOP: Self = Self {
        shuffle: false,
        volume_control: true,
        split_loop_modes: true,
    };

    /// Standalone mobile player: one loop toggle and shuffle.
    pub const MOBILE: Self = Self {
        shuffle: true,
        volume_control: false,
        split_loop_modes: false,
    };
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::FULL
    }
}

pub struct PlaybackEngine<H> {
    handle: H,
    capabilities: Capabilities,
    observers: Vec<Box<dyn PlaybackObserver>>,

    status: PlaybackStatus,
    current: Option<usize>,

    /// The last load handed to the handle, and the song it was for. Unlike
    /// `current` this survives a scope switch.
    load: LoadId,
    loaded: Option<SongId>,

    loop_song: bool,
    loop_scope: bool,
    shuffle: bool,

    volume: Volume,

    position: f64,
    duration: Option<f64>,
}

impl<H: PlaybackHandle> PlaybackEngine<H> {
    pub fn new(handle: H, capabilities: Capabilities) -> Self {
        Self {
            handle,
            capabilities,
            observers: Vec::new(),
            status: PlaybackStatus::Stopped,
            current: None,
            load: LoadId::default(),
            loaded: None,
            loop_song: false,
            loop_scope: false,
            shuffle: false,
            volume: Volume::default(),
            position: 0.0,
            duration: None,
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn PlaybackObserver>) {
        self.observers.push(observer);
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// Index of the loaded track in the active scope, `None` if nothing is
    /// loaded.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_song<'a>(&self, songs: &[&'a Song]) -> Option<&'a Song> {
        self.current.and_then(|index| songs.get(index).copied())
    }

    /// The song last loaded into the handle, whether or not it is still in
    /// the active scope.
    pub fn loaded_song(&self) -> Option<SongId> {
        self.loaded
    }

    pub fn load_id(&self) -> LoadId {
        self.load
    }

    /// Whether a backend report tagged with `load` is about the track that
    /// is loaded now.
    pub fn is_current_load(&self, load: LoadId) -> bool {
        self.loaded.is_some() && load == self.load
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Duration of the loaded track, if known.
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn loop_song(&self) -> bool {
        self.loop_song
    }

    pub fn loop_scope(&self) -> bool {
        self.loop_scope
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn volume(&self) -> Volume {
        self.volume
    }

    /// Loads and starts the track at `index`.
    ///
    /// Anything previously loaded is replaced. Does nothing if `index` is out
    /// of range, which includes any index into an empty scope.
    pub fn play(&mut self, songs: &[&Song], index: usize) -> Result<(), PlaybackError> {
        let Some(song) = songs.get(index).copied() else {
            trace!(index, len = songs.len(), "ignoring play of out of range index");
            return Ok(());
        };

        let load = LoadId(self.load.0.wrapping_add(1));
        self.handle.load(song.path(), load)?;
        self.handle.resume()?;

        debug!(index, song = %song.name(), "playing");

        self.current = Some(index);
        self.load = load;
        self.loaded = Some(song.id());
        self.position = 0.0;
        self.duration = song.known_duration();

        for observer in self.observers.iter_mut() {
            observer.on_track_changed(index, song);
        }
        self.set_status(PlaybackStatus::Playing);

        Ok(())
    }

    /// Toggles between playing and paused.
    ///
    /// With nothing loaded this starts the first track of the scope, and an
    /// empty scope leaves the engine stopped. A track that has already run
    /// to the end is started again from the top.
    pub fn toggle_play_pause(&mut self, songs: &[&Song]) -> Result<(), PlaybackError> {
        match (self.current, self.status) {
            (None, _) => self.play(songs, 0),
            (Some(index), PlaybackStatus::Stopped) => self.play(songs, index),
            (Some(_), PlaybackStatus::Playing) => {
                self.handle.pause()?;
                self.set_status(PlaybackStatus::Paused);
                Ok(())
            }
            (Some(_), PlaybackStatus::Paused) => {
                self.handle.resume()?;
                self.set_status(PlaybackStatus::Playing);
                Ok(())
            }
        }
    }

    pub fn pause(&mut self) -> Result<(), PlaybackError> {
        if self.status == PlaybackStatus::Playing {
            self.handle.pause()?;
            self.set_status(PlaybackStatus::Paused);
        }
        Ok(())
    }

    pub fn resume(&mut self, songs: &[&Song]) -> Result<(), PlaybackError> {
        match self.status {
            PlaybackStatus::Playing => Ok(()),
            _ => self.toggle_play_pause(songs),
        }
    }

    /// Moves to the next track.
    ///
    /// With shuffle on, any track other than the current one is picked at
    /// random (a single track scope picks itself). Otherwise playback moves
    /// one step forward, wrapping to the start only when loop-scope is on.
    pub fn next(&mut self, songs: &[&Song]) -> Result<(), PlaybackError> {
        self.advance(songs).map(|_| ())
    }

    /// Moves to the previous track, or restarts the current one.
    ///
    /// More than [`RESTART_THRESHOLD_SECS`] into a track this seeks back to
    /// its start. Otherwise playback moves one step back, wrapping to the
    /// last track only when loop-scope is on; at the first track without
    /// looping the track is restarted instead.
    pub fn previous(&mut self, songs: &[&Song]) -> Result<(), PlaybackError> {
        if songs.is_empty() {
            return Ok(());
        }

        if self.position > RESTART_THRESHOLD_SECS {
            return self.restart();
        }

        match self.current.unwrap_or(0).checked_sub(1) {
            Some(index) => self.play(songs, index),
            None if self.loop_scope => self.play(songs, songs.len() - 1),
            None => self.restart(),
        }
    }

    /// Seeks to a fraction of the track, clamped to `0.0..=1.0`.
    ///
    /// Does nothing while the duration is unknown.
    pub fn seek(&mut self, fraction: f64) -> Result<(), PlaybackError> {
        let Some(duration) = self.duration else {
            return Ok(());
        };
        if fraction.is_nan() {
            return Ok(());
        }

        self.seek_to(fraction.clamp(0.0, 1.0) * duration)
    }

    /// Seeks to an absolute position, clamped to the track.
    pub fn seek_to(&mut self, seconds: f64) -> Result<(), PlaybackError> {
        if seconds.is_nan() {
            return Ok(());
        }

        let mut target = seconds.max(0.0);
        if let Some(duration) = self.duration {
            target = target.min(duration);
        }

        self.handle.seek_to(target)?;
        self.position = target;

        Ok(())
    }

    /// Seeks relative to the current position.
    ///
    /// Seeking backwards always works, clamped at the start. Seeking forwards
    /// needs a known duration to clamp against.
    pub fn seek_by(&mut self, delta: f64) -> Result<(), PlaybackError> {
        if delta > 0.0 && self.duration.is_none() {
            return Ok(());
        }

        self.seek_to(self.position + delta)
    }

    /// Repeats the loaded track indefinitely.
    ///
    /// The handle's native loop is bound to this flag, so a looping track
    /// never reports its end and never triggers [`Self::next`].
    pub fn set_loop_song(&mut self, enabled: bool) -> Result<(), PlaybackError> {
        if !self.capabilities.split_loop_modes {
            return Ok(());
        }

        self.handle.set_native_loop(enabled)?;
        self.loop_song = enabled;

        Ok(())
    }

    /// Wraps around at either end of the scope.
    pub fn set_loop_scope(&mut self, enabled: bool) {
        self.loop_scope = enabled;
    }

    pub fn set_shuffle(&mut self, enabled: bool) {
        if self.capabilities.shuffle {
            self.shuffle = enabled;
        }
    }

    /// Sets the volume, 0 to 100.
    pub fn set_volume(&mut self, level: u8) -> Result<(), PlaybackError> {
        if !self.capabilities.volume_control {
            return Ok(());
        }

        self.volume.set(level);
        self.apply_volume()
    }

    pub fn adjust_volume(&mut self, delta: i16) -> Result<(), PlaybackError> {
        let level = (i16::from(self.volume.level()) + delta).clamp(0, i16::from(MAX_VOLUME));
        self.set_volume(level as u8)
    }

    pub fn toggle_mute(&mut self) -> Result<(), PlaybackError> {
        if !self.capabilities.volume_control {
            return Ok(());
        }

        self.volume.toggle_mute();
        self.apply_volume()
    }

    /// Reacts to the loaded track playing to its natural end.
    ///
    /// Normally this moves on as [`Self::next`] would, and stops if there is
    /// nowhere to move to. With loop-song on, the native loop already takes
    /// care of repeating, except for a scope of exactly one track, which is
    /// restarted here regardless.
    pub fn track_finished(&mut self, songs: &[&Song]) -> Result<(), PlaybackError> {
        if self.loop_song {
            if songs.len() == 1 {
                self.restart()?;
                self.handle.resume()?;
                self.set_status(PlaybackStatus::Playing);
            }
            return Ok(());
        }

        if !self.advance(songs)? {
            self.position = self.duration.unwrap_or(self.position);
            self.set_status(PlaybackStatus::Stopped);
        }

        Ok(())
    }

    /// Records the backend's reported playback position.
    pub fn update_position(&mut self, seconds: f64) {
        if seconds.is_finite() && seconds >= 0.0 {
            self.position = seconds;
        }
    }

    /// Records the backend's reported duration of the loaded track.
    pub fn update_duration(&mut self, seconds: f64) {
        self.duration = is_known_duration(seconds).then_some(seconds);
    }

    /// Reports progress to observers, but only while playing a track of
    /// known length.
    pub fn tick(&mut self) {
        if self.status != PlaybackStatus::Playing {
            return;
        }

        if let Some(duration) = self.duration {
            let position = self.position;
            for observer in self.observers.iter_mut() {
                observer.on_position_tick(position, duration);
            }
        }
    }

    /// Forgets the current index, as when switching scopes. Whatever is
    /// loaded keeps playing.
    pub fn reset_index(&mut self) {
        self.current = None;
    }

    /// Re-points the current index after the scope's sequence changed under
    /// it, e.g. when a song before the current one was removed. Nothing is
    /// loaded or notified.
    pub fn relocate(&mut self, index: Option<usize>) {
        self.current = index;
    }

    /// Applies the next-track rules, returning whether a track was started.
    fn advance(&mut self, songs: &[&Song]) -> Result<bool, PlaybackError> {
        let len = songs.len();
        if len == 0 {
            return Ok(false);
        }

        let index = if self.shuffle {
            self.random_index(len)
        } else {
            let next = self.current.map_or(0, |index| index + 1);
            if next < len {
                next
            } else if self.loop_scope {
                0
            } else {
                return Ok(false);
            }
        };

        self.play(songs, index)?;
        Ok(true)
    }

    /// Picks a uniformly random index in `0..len`, other than the current one
    /// when there is a choice.
    fn random_index(&self, len: usize) -> usize {
        let mut candidates: Vec<usize> = (0..len)
            .filter(|index| len == 1 || Some(*index) != self.current)
            .collect();
        candidates.shuffle(&mut rng());

        candidates.first().copied().unwrap_or(0)
    }

    fn restart(&mut self) -> Result<(), PlaybackError> {
        self.handle.seek_to(0.0)?;
        self.position = 0.0;
        Ok(())
    }

    fn apply_volume(&mut self) -> Result<(), PlaybackError> {
        self.handle.set_volume(self.volume.output())?;

        let (level, muted) = (self.volume.level(), self.volume.is_muted());
        for observer in self.observers.iter_mut() {
            observer.on_volume_changed(level, muted);
        }

        Ok(())
    }

    fn set_status(&mut self, status: PlaybackStatus) {
        if self.status == status {
            return;
        }

        self.status = status;
        for observer in self.observers.iter_mut() {
            observer.on_status_changed(status);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::RefCell,
        path::{Path, PathBuf},
        rc::Rc,
    };

    use super::*;
    use crate::library::{Library, scope::Scope};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Load(PathBuf),
        Resume,
        Pause,
        SeekTo(f64),
        Volume(f64),
        NativeLoop(bool),
    }

    #[derive(Default)]
    struct FakeHandle {
        calls: Vec<Call>,
    }

    impl PlaybackHandle for FakeHandle {
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

    #[derive(Default)]
    struct Recorder {
        tracks: Vec<usize>,
        statuses: Vec<PlaybackStatus>,
        ticks: Vec<(f64, f64)>,
    }

    struct SharedRecorder(Rc<RefCell<Recorder>>);

    impl PlaybackObserver for SharedRecorder {
        fn on_track_changed(&mut self, index: usize, _song: &Song) {
            self.0.borrow_mut().tracks.push(index);
        }
        fn on_status_changed(&mut self, status: PlaybackStatus) {
            self.0.borrow_mut().statuses.push(status);
        }
        fn on_position_tick(&mut self, position: f64, duration: f64) {
            self.0.borrow_mut().ticks.push((position, duration));
        }
    }

    fn library(len: usize) -> Library {
        let mut library = Library::new();
        for i in 0..len {
            library.add_song(format!("/music/{i}.mp3"));
        }
        library
    }

    fn engine() -> PlaybackEngine<FakeHandle> {
        PlaybackEngine::new(FakeHandle::default(), Capabilities::FULL)
    }

    #[test]
    fn play_out_of_range_is_ignored() {
        let library = library(2);
        let songs = library.resolve_scope(Scope::All);
        let mut engine = engine();

        engine.play(&songs, 2).unwrap();

        assert_eq!(engine.status(), PlaybackStatus::Stopped);
        assert_eq!(engine.current_index(), None);
        assert!(engine.handle().calls.is_empty());
    }

    #[test]
    fn play_loads_and_notifies() {
        let library = library(3);
        let songs = library.resolve_scope(Scope::All);
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut engine = engine();
        engine.subscribe(Box::new(SharedRecorder(Rc::clone(&recorder))));

        engine.play(&songs, 1).unwrap();

        assert_eq!(engine.current_index(), Some(1));
        assert_eq!(engine.status(), PlaybackStatus::Playing);
        assert_eq!(
            engine.handle().calls,
            [Call::Load(PathBuf::from("/music/1.mp3")), Call::Resume]
        );
        assert_eq!(recorder.borrow().tracks, [1]);
        assert_eq!(recorder.borrow().statuses, [PlaybackStatus::Playing]);
    }

    #[test]
    fn each_play_is_a_new_load_of_a_known_song() {
        let library = library(2);
        let songs = library.resolve_scope(Scope::All);
        let mut engine = engine();
        assert!(!engine.is_current_load(engine.load_id()));

        engine.play(&songs, 0).unwrap();
        let first = engine.load_id();
        assert!(engine.is_current_load(first));

        engine.play(&songs, 0).unwrap();
        assert_ne!(engine.load_id(), first);
        assert!(!engine.is_current_load(first));

        engine.reset_index();
        assert_eq!(engine.loaded_song(), Some(songs[0].id()));
        assert!(engine.is_current_load(engine.load_id()));
    }

    #[test]
    fn toggle_on_empty_scope_stays_stopped() {
        let library = Library::new();
        let songs = library.resolve_scope(Scope::All);
        let mut engine = engine();

        engine.toggle_play_pause(&songs).unwrap();

        assert_eq!(engine.status(), PlaybackStatus::Stopped);
        assert_eq!(engine.current_index(), None);
    }

    #[test]
    fn toggle_starts_first_track_then_pauses_and_resumes() {
        let library = library(2);
        let songs = library.resolve_scope(Scope::All);
        let mut engine = engine();

        engine.toggle_play_pause(&songs).unwrap();
        assert_eq!(engine.current_index(), Some(0));
        assert_eq!(engine.status(), PlaybackStatus::Playing);

        engine.update_position(42.0);
        engine.toggle_play_pause(&songs).unwrap();
        assert_eq!(engine.status(), PlaybackStatus::Paused);

        engine.toggle_play_pause(&songs).unwrap();
        assert_eq!(engine.status(), PlaybackStatus::Playing);
        assert_eq!(engine.position(), 42.0);
        assert_eq!(engine.handle().calls.last(), Some(&Call::Resume));
    }

    #[test]
    fn next_stops_at_end_without_loop_scope() {
        let library = library(3);
        let songs = library.resolve_scope(Scope::All);
        let mut engine = engine();
        engine.play(&songs, 1).unwrap();

        engine.next(&songs).unwrap();
        assert_eq!(engine.current_index(), Some(2));

        engine.next(&songs).unwrap();
        assert_eq!(engine.current_index(), Some(2));

        engine.set_loop_scope(true);
        engine.next(&songs).unwrap();
        assert_eq!(engine.current_index(), Some(0));
    }

    #[test]
    fn next_with_nothing_loaded_starts_at_first_track() {
        let library = library(3);
        let songs = library.resolve_scope(Scope::All);
        let mut engine = engine();

        engine.next(&songs).unwrap();
        assert_eq!(engine.current_index(), Some(0));
    }

    #[test]
    fn shuffle_never_repeats_current_track() {
        let library = library(4);
        let songs = library.resolve_scope(Scope::All);
        let mut engine = engine();
        engine.set_shuffle(true);
        engine.play(&songs, 0).unwrap();

        for _ in 0..50 {
            let before = engine.current_index();
            engine.next(&songs).unwrap();
            let after = engine.current_index();
            assert_ne!(before, after);
            assert!(after.unwrap() < 4);
        }
    }

    #[test]
    fn shuffle_ignores_end_of_scope() {
        let library = library(2);
        let songs = library.resolve_scope(Scope::All);
        let mut engine = engine();
        engine.set_shuffle(true);
        engine.play(&songs, 1).unwrap();

        engine.next(&songs).unwrap();
        assert_eq!(engine.current_index(), Some(0));
    }

    #[test]
    fn shuffle_with_single_track_picks_it_again() {
        let library = library(1);
        let songs = library.resolve_scope(Scope::All);
        let mut engine = engine();
        engine.set_shuffle(true);
        engine.play(&songs, 0).unwrap();

        engine.next(&songs).unwrap();
        assert_eq!(engine.current_index(), Some(0));
        assert_eq!(
            engine.handle().calls.iter().filter(|call| matches!(call, Call::Load(_))).count(),
            2
        );
    }

    #[test]
    fn shuffle_is_ignored_without_capability() {
        let mut engine = PlaybackEngine::new(FakeHandle::default(), Capabilities::DESKTOP);
        engine.set_shuffle(true);
        assert!(!engine.shuffle());
    }

    #[test]
    fn previous_restarts_after_threshold() {
        let library = library(3);
        let songs = library.resolve_scope(Scope::All);
        let mut engine = engine();
        engine.play(&songs, 2).unwrap();
        engine.update_position(3.5);

        engine.previous(&songs).unwrap();

        assert_eq!(engine.current_index(), Some(2));
        assert_eq!(engine.position(), 0.0);
        assert_eq!(engine.handle().calls.last(), Some(&Call::SeekTo(0.0)));
    }

    #[test]
    fn previous_at_threshold_moves_back() {
        let library = library(3);
        let songs = library.resolve_scope(Scope::All);
        let mut engine = engine();
        engine.play(&songs, 2).unwrap();
        engine.update_position(3.0);

        engine.previous(&songs).unwrap();
        assert_eq!(engine.current_index(), Some(1));
    }

    #[test]
    fn previous_at_first_track_without_loop_restarts() {
        let library = library(3);
        let songs = library.resolve_scope(Scope::All);
        let mut engine = engine();
        engine.play(&songs, 0).unwrap();
        engine.update_position(1.0);

        engine.previous(&songs).unwrap();

        assert_eq!(engine.current_index(), Some(0));
        assert_eq!(engine.position(), 0.0);
    }

    #[test]
    fn previous_at_first_track_with_loop_wraps() {
        let library = library(3);
        let songs = library.resolve_scope(Scope::All);
        let mut engine = engine();
        engine.set_loop_scope(true);
        engine.play(&songs, 0).unwrap();

        engine.previous(&songs).unwrap();
        assert_eq!(engine.current_index(), Some(2));
    }

    #[test]
    fn seek_needs_known_duration() {
        let library = library(1);
        let songs = library.resolve_scope(Scope::All);
        let mut engine = engine();
        engine.play(&songs, 0).unwrap();
        let calls = engine.handle().calls.len();

        engine.seek(0.5).unwrap();
        assert_eq!(engine.handle().calls.len(), calls);

        engine.update_duration(200.0);
        engine.seek(0.5).unwrap();
        assert_eq!(engine.handle().calls.last(), Some(&Call::SeekTo(100.0)));

        engine.seek(7.0).unwrap();
        assert_eq!(engine.handle().calls.last(), Some(&Call::SeekTo(200.0)));

        engine.seek(-1.0).unwrap();
        assert_eq!(engine.handle().calls.last(), Some(&Call::SeekTo(0.0)));
    }

    #[test]
    fn seek_by_clamps_to_track() {
        let mut engine = engine();
        engine.update_position(4.0);

        engine.seek_by(10.0).unwrap();
        assert!(engine.handle().calls.is_empty());

        engine.seek_by(-10.0).unwrap();
        assert_eq!(engine.position(), 0.0);

        engine.update_duration(60.0);
        engine.update_position(55.0);
        engine.seek_by(10.0).unwrap();
        assert_eq!(engine.position(), 60.0);
    }

    #[test]
    fn loop_song_is_bound_to_native_loop() {
        let mut engine = engine();

        engine.set_loop_song(true).unwrap();

        assert!(engine.loop_song());
        assert_eq!(engine.handle().calls, [Call::NativeLoop(true)]);
    }

    #[test]
    fn single_loop_toggle_only_loops_scope() {
        let mut engine = PlaybackEngine::new(FakeHandle::default(), Capabilities::MOBILE);

        engine.set_loop_song(true).unwrap();
        engine.set_loop_scope(true);

        assert!(!engine.loop_song());
        assert!(engine.loop_scope());
        assert!(engine.handle().calls.is_empty());
    }

    #[test]
    fn finished_single_track_with_loop_song_restarts() {
        let library = library(1);
        let songs = library.resolve_scope(Scope::All);
        let mut engine = engine();
        engine.set_loop_song(true).unwrap();
        engine.play(&songs, 0).unwrap();
        engine.update_position(180.0);

        engine.track_finished(&songs).unwrap();

        assert_eq!(engine.current_index(), Some(0));
        assert_eq!(engine.position(), 0.0);
        assert_eq!(engine.status(), PlaybackStatus::Playing);
        assert!(engine.handle().calls.ends_with(&[Call::SeekTo(0.0), Call::Resume]));
    }

    #[test]
    fn finished_track_advances() {
        let library = library(2);
        let songs = library.resolve_scope(Scope::All);
        let mut engine = engine();
        engine.play(&songs, 0).unwrap();

        engine.track_finished(&songs).unwrap();
        assert_eq!(engine.current_index(), Some(1));
        assert_eq!(engine.status(), PlaybackStatus::Playing);

        engine.track_finished(&songs).unwrap();
        assert_eq!(engine.current_index(), Some(1));
        assert_eq!(engine.status(), PlaybackStatus::Stopped);

        // Playing again after the end starts the last track over.
        engine.toggle_play_pause(&songs).unwrap();
        assert_eq!(engine.status(), PlaybackStatus::Playing);
        assert_eq!(engine.current_index(), Some(1));
    }

    #[test]
    fn volume_is_scaled_and_mute_remembers() {
        let mut engine = engine();

        engine.set_volume(40).unwrap();
        engine.toggle_mute().unwrap();
        engine.toggle_mute().unwrap();

        assert_eq!(
            engine.handle().calls,
            [Call::Volume(0.4), Call::Volume(0.0), Call::Volume(0.4)]
        );
        assert_eq!(engine.volume().level(), 40);
    }

    #[test]
    fn adjust_volume_saturates() {
        let mut engine = engine();
        engine.set_volume(98).unwrap();

        engine.adjust_volume(5).unwrap();
        assert_eq!(engine.volume().level(), 100);

        engine.adjust_volume(-120).unwrap();
        assert_eq!(engine.volume().level(), 0);
        assert!(engine.volume().is_muted());
    }

    #[test]
    fn volume_is_ignored_without_capability() {
        let mut engine = PlaybackEngine::new(FakeHandle::default(), Capabilities::MOBILE);

        engine.set_volume(10).unwrap();
        engine.toggle_mute().unwrap();

        assert_eq!(engine.volume().level(), 100);
        assert!(engine.handle().calls.is_empty());
    }

    #[test]
    fn tick_reports_only_while_playing_with_duration() {
        let library = library(1);
        let songs = library.resolve_scope(Scope::All);
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut engine = engine();
        engine.subscribe(Box::new(SharedRecorder(Rc::clone(&recorder))));

        engine.tick();
        engine.play(&songs, 0).unwrap();
        engine.tick();
        engine.update_duration(120.0);
        engine.update_position(12.0);
        engine.tick();
        engine.pause().unwrap();
        engine.tick();

        assert_eq!(recorder.borrow().ticks, [(12.0, 120.0)]);
    }
}
