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

//! Song library and playlist membership.
//!
//! The [`Library`] exclusively owns every [`Song`] and [`Playlist`] record.
//! It only ever grows songs in insertion order, and keeps each playlist as a
//! manually ordered, duplicate-free list of song ids.
//!
//! Playlists are allowed to hold ids of songs that no longer exist. Such
//! stale references are pruned when a scope is resolved (see [`scope`]), not
//! when the library is mutated, so a removal never has to chase down every
//! playlist that referenced the song.

pub mod scope;

use std::{collections::HashSet, path::PathBuf};

use tracing::{debug, warn};

use crate::{
    error::LibraryError,
    model::{Playlist, PlaylistId, Song, SongId, is_known_duration},
    persistence::{LibrarySnapshot, PlaylistRecord, SongRecord},
};

#[derive(Debug, Clone)]
pub struct Library {
    songs: Vec<Song>,
    playlists: Vec<Playlist>,
    next_song_id: u64,
    next_playlist_id: u64,
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

impl Library {
    /// Creates an empty library, containing only the implicit "All Songs"
    /// scope.
    pub fn new() -> Self {
        Self {
            songs: Vec::new(),
            playlists: Vec::new(),
            next_song_id: 1,
            next_playlist_id: 1,
        }
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn song(&self, id: SongId) -> Option<&Song> {
        self.songs.iter().find(|song| song.id == id)
    }

    pub fn playlist(&self, id: PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|playlist| playlist.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Adds a song for the file at `path` and returns its id.
    ///
    /// The display name is the file name with its last extension stripped.
    /// Files are never de-duplicated, adding the same path twice creates two
    /// distinct songs.
    pub fn add_song(&mut self, path: impl Into<PathBuf>) -> SongId {
        let id = SongId(self.next_song_id);
        self.next_song_id = self.next_song_id.saturating_add(1);

        let song = Song::new(id, path);
        debug!(%id, name = %song.name, "added song");
        self.songs.push(song);

        id
    }

    pub fn add_songs<I, P>(&mut self, paths: I) -> Vec<SongId>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        paths.into_iter().map(|path| self.add_song(path)).collect()
    }

    /// Records the duration reported by a metadata probe.
    ///
    /// The song is looked up by id, so a probe that completes late still
    /// patches the right record. The duration is only ever set once, invalid
    /// values and repeat reports are ignored.
    ///
    /// Returns `true` if the song was updated.
    pub fn set_duration(&mut self, id: SongId, seconds: f64) -> bool {
        if !is_known_duration(seconds) {
            return false;
        }

        match self.songs.iter_mut().find(|song| song.id == id) {
            Some(song) if song.known_duration().is_none() => {
                song.duration = seconds;
                true
            }
            _ => false,
        }
    }

    /// Removes a song from the library.
    ///
    /// Playlists that reference the song keep the stale id, it is filtered
    /// out the next time those playlists are resolved.
    pub fn remove_song(&mut self, id: SongId) -> Option<Song> {
        let index = self.songs.iter().position(|song| song.id == id)?;
        Some(self.songs.remove(index))
    }

    /// Creates a new, empty playlist.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::BlankPlaylistName`] and leaves the library
    /// untouched if the name is blank.
    pub fn create_playlist(&mut self, name: &str) -> Result<PlaylistId, LibraryError> {
        let id = PlaylistId(self.next_playlist_id);
        let playlist = Playlist::new(id, name)?;
        self.next_playlist_id = self.next_playlist_id.saturating_add(1);

        debug!(%id, name = %playlist.name, "created playlist");
        self.playlists.push(playlist);

        Ok(id)
    }

    pub fn delete_playlist(&mut self, id: PlaylistId) -> Option<Playlist> {
        let index = self.playlists.iter().position(|playlist| playlist.id == id)?;
        Some(self.playlists.remove(index))
    }

    /// Appends a song to a playlist.
    ///
    /// Does nothing if the playlist does not exist or the song is already a
    /// member. Returns `true` if the playlist changed.
    pub fn add_song_to_playlist(&mut self, song_id: SongId, playlist_id: PlaylistId) -> bool {
        let Some(playlist) = self.playlists.iter_mut().find(|p| p.id == playlist_id) else {
            return false;
        };

        if playlist.songs.contains(&song_id) {
            return false;
        }

        playlist.songs.push(song_id);
        true
    }

    /// Removes a song from a playlist, returning `true` if it was a member.
    pub fn remove_song_from_playlist(&mut self, song_id: SongId, playlist_id: PlaylistId) -> bool {
        let Some(playlist) = self.playlists.iter_mut().find(|p| p.id == playlist_id) else {
            return false;
        };

        match playlist.songs.iter().position(|id| *id == song_id) {
            Some(index) => {
                playlist.songs.remove(index);
                true
            }
            None => false,
        }
    }

    /// Resolves a scope to its ordered sequence of songs.
    pub fn resolve_scope(&self, scope: scope::Scope) -> Vec<&Song> {
        scope::resolve(self, scope)
    }

    /// Captures the library as a flat, persistable snapshot.
    pub fn snapshot(&self) -> LibrarySnapshot {
        LibrarySnapshot {
            songs: self
                .songs
                .iter()
                .map(|song| SongRecord {
                    id: song.id,
                    name: song.name.clone(),
                    path: song.path.clone(),
                    duration: song.duration,
                })
                .collect(),
            playlists: self
                .playlists
                .iter()
                .map(|playlist| PlaylistRecord {
                    id: playlist.id,
                    name: playlist.name.clone(),
                    songs: playlist.songs.clone(),
                })
                .collect(),
        }
    }

    /// Rebuilds a library from a snapshot.
    ///
    /// Loading is lenient: records that would break an invariant are dropped
    /// with a warning instead of failing the whole load. The id `u64::MAX` is
    /// reserved, since no fresh id could follow it. Playlist members
    /// that do not reference a song in the snapshot are silently filtered,
    /// as are repeated members.
    pub fn from_snapshot(snapshot: LibrarySnapshot) -> Self {
        let mut library = Self::new();
        let mut song_ids = HashSet::new();

        for record in snapshot.songs {
            if record.id.0 == u64::MAX {
                warn!(id = %record.id, "skipping song with out of range id");
                continue;
            }
            if !song_ids.insert(record.id) {
                warn!(id = %record.id, "skipping song with duplicate id");
                continue;
            }

            library.next_song_id = library.next_song_id.max(record.id.0 + 1);
            library.songs.push(Song {
                id: record.id,
                name: record.name,
                path: record.path,
                duration: if is_known_duration(record.duration) { record.duration } else { 0.0 },
            });
        }

        let mut playlist_ids = HashSet::new();

        for record in snapshot.playlists {
            if record.id.0 == u64::MAX {
                warn!(id = %record.id, "skipping playlist with out of range id");
                continue;
            }
            if !playlist_ids.insert(record.id) {
                warn!(id = %record.id, "skipping playlist with duplicate id");
                continue;
            }

            let mut playlist = match Playlist::new(record.id, &record.name) {
                Ok(playlist) => playlist,
                Err(e) => {
                    warn!(id = %record.id, "skipping playlist: {}", e);
                    continue;
                }
            };

            let mut seen = HashSet::new();
            playlist.songs = record
                .songs
                .into_iter()
                .filter(|id| song_ids.contains(id) && seen.insert(*id))
                .collect();

            library.next_playlist_id = library.next_playlist_id.max(record.id.0 + 1);
            library.playlists.push(playlist);
        }

        library
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::scope::Scope;

    fn library_with(names: &[&str]) -> (Library, Vec<SongId>) {
        let mut library = Library::new();
        let ids = library.add_songs(names.iter().map(|name| format!("/music/{name}.mp3")));
        (library, ids)
    }

    #[test]
    fn add_song_appends_in_insertion_order() {
        let (library, ids) = library_with(&["b", "a", "c"]);

        let names: Vec<&str> = library.songs().iter().map(Song::name).collect();
        assert_eq!(names, ["b", "a", "c"]);
        assert_eq!(ids.len(), 3);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn identical_file_names_become_distinct_songs() {
        let (library, ids) = library_with(&["same", "same"]);

        assert_eq!(library.songs().len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn duration_is_patched_once_by_id() {
        let (mut library, ids) = library_with(&["a", "b"]);

        assert!(library.set_duration(ids[1], 181.5));
        assert!(!library.set_duration(ids[1], 12.0));
        assert!(!library.set_duration(ids[0], f64::NAN));

        assert_eq!(library.song(ids[1]).unwrap().known_duration(), Some(181.5));
        assert_eq!(library.song(ids[0]).unwrap().known_duration(), None);
    }

    #[test]
    fn duration_for_unknown_song_is_ignored() {
        let (mut library, _) = library_with(&["a"]);
        assert!(!library.set_duration(SongId(999), 10.0));
    }

    #[test]
    fn blank_playlist_name_leaves_library_unchanged() {
        let mut library = Library::new();

        assert_eq!(library.create_playlist(" \t"), Err(LibraryError::BlankPlaylistName));
        assert!(library.playlists().is_empty());

        let id = library.create_playlist("Chill").unwrap();
        assert_eq!(id, PlaylistId(1));
    }

    #[test]
    fn adding_a_member_twice_is_a_no_op() {
        let (mut library, ids) = library_with(&["a", "b"]);
        let playlist = library.create_playlist("Mix").unwrap();

        assert!(library.add_song_to_playlist(ids[1], playlist));
        assert!(library.add_song_to_playlist(ids[0], playlist));
        assert!(!library.add_song_to_playlist(ids[1], playlist));

        assert_eq!(library.playlist(playlist).unwrap().song_ids(), [ids[1], ids[0]]);
    }

    #[test]
    fn adding_to_unknown_playlist_is_a_no_op() {
        let (mut library, ids) = library_with(&["a"]);
        assert!(!library.add_song_to_playlist(ids[0], PlaylistId(42)));
    }

    #[test]
    fn remove_song_from_playlist() {
        let (mut library, ids) = library_with(&["a", "b", "c"]);
        let playlist = library.create_playlist("Mix").unwrap();
        for id in &ids {
            library.add_song_to_playlist(*id, playlist);
        }

        assert!(library.remove_song_from_playlist(ids[1], playlist));
        assert!(!library.remove_song_from_playlist(ids[1], playlist));
        assert_eq!(library.playlist(playlist).unwrap().song_ids(), [ids[0], ids[2]]);
    }

    #[test]
    fn removed_song_disappears_from_resolved_playlists() {
        let (mut library, ids) = library_with(&["a", "b", "c"]);
        let playlist = library.create_playlist("Mix").unwrap();
        for id in &ids {
            library.add_song_to_playlist(*id, playlist);
        }

        library.remove_song(ids[0]).unwrap();

        let resolved: Vec<SongId> = library
            .resolve_scope(Scope::Playlist(playlist))
            .iter()
            .map(|song| song.id())
            .collect();
        assert_eq!(resolved, [ids[1], ids[2]]);

        // The stale reference stays until the playlist is next saved and
        // reloaded.
        assert_eq!(library.playlist(playlist).unwrap().song_ids().len(), 3);
    }

    #[test]
    fn snapshot_filters_dangling_and_duplicate_members_on_load() {
        let snapshot = LibrarySnapshot {
            songs: vec![SongRecord {
                id: SongId(4),
                name: "a".into(),
                path: "/music/a.mp3".into(),
                duration: 0.0,
            }],
            playlists: vec![
                PlaylistRecord {
                    id: PlaylistId(9),
                    name: "Mix".into(),
                    songs: vec![SongId(4), SongId(77), SongId(4)],
                },
                PlaylistRecord {
                    id: PlaylistId(10),
                    name: "   ".into(),
                    songs: vec![],
                },
            ],
        };

        let mut library = Library::from_snapshot(snapshot);

        assert_eq!(library.playlists().len(), 1);
        assert_eq!(library.playlist(PlaylistId(9)).unwrap().song_ids(), [SongId(4)]);

        // Fresh ids continue after the highest loaded ones.
        assert_eq!(library.add_song("/music/b.mp3"), SongId(5));
        assert_eq!(library.create_playlist("New").unwrap(), PlaylistId(10));
    }

    #[test]
    fn snapshot_with_largest_ids_loads_without_them() {
        let snapshot = LibrarySnapshot {
            songs: vec![
                SongRecord {
                    id: SongId(u64::MAX),
                    name: "a".into(),
                    path: "/music/a.mp3".into(),
                    duration: 0.0,
                },
                SongRecord {
                    id: SongId(u64::MAX - 1),
                    name: "b".into(),
                    path: "/music/b.mp3".into(),
                    duration: 0.0,
                },
            ],
            playlists: vec![PlaylistRecord {
                id: PlaylistId(u64::MAX),
                name: "Mix".into(),
                songs: vec![SongId(u64::MAX - 1)],
            }],
        };

        let mut library = Library::from_snapshot(snapshot);

        assert_eq!(library.songs().len(), 1);
        assert_eq!(library.songs()[0].id(), SongId(u64::MAX - 1));
        assert!(library.playlists().is_empty());

        assert_eq!(library.add_song("/music/c.mp3"), SongId(u64::MAX));
        assert_eq!(library.create_playlist("New").unwrap(), PlaylistId(1));
    }
}
