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

use std::path::Path;

use botify::{
    Library, Scope,
    config::StorageKind,
    persistence::{LibraryGateway, json::JsonFileGateway, open_gateway, sqlite::SqliteGateway},
};

/// A library with `playlists` playlists, each holding an overlapping window
/// of the songs.
fn library_with_playlists(playlists: usize) -> Library {
    let mut library = Library::new();
    let ids = library.add_songs(["/m/a.mp3", "/m/b.flac", "/m/c.ogg", "/m/.hidden", "/m/a.mp3"]);
    library.set_duration(ids[0], 61.5);
    library.set_duration(ids[2], 240.0);

    for n in 0..playlists {
        let playlist = library.create_playlist(&format!("Playlist {n}")).unwrap();
        // Members in reverse, to check order survives independently of ids
        for id in ids.iter().skip(n).take(3).rev() {
            library.add_song_to_playlist(*id, playlist);
        }
    }

    library
}

fn assert_round_trip(gateway: &dyn LibraryGateway, playlists: usize) {
    let original = library_with_playlists(playlists);

    gateway.save(&original.snapshot()).unwrap();
    let loaded = Library::from_snapshot(gateway.load().unwrap().expect("snapshot was saved"));

    assert_eq!(loaded.snapshot(), original.snapshot());
    for playlist in original.playlists() {
        let scope = Scope::Playlist(playlist.id());
        let expected: Vec<_> = original.resolve_scope(scope).iter().map(|s| s.id()).collect();
        let actual: Vec<_> = loaded.resolve_scope(scope).iter().map(|s| s.id()).collect();
        assert_eq!(actual, expected);
    }
}

#[test]
fn json_round_trip() {
    for playlists in [0, 1, 3] {
        let dir = tempfile::tempdir().unwrap();
        let gateway = JsonFileGateway::new(dir.path().join("library.json"));
        assert_round_trip(&gateway, playlists);
    }
}

#[test]
fn sqlite_round_trip() {
    for playlists in [0, 1, 3] {
        let dir = tempfile::tempdir().unwrap();
        let gateway = SqliteGateway::new(dir.path().join("library.db"));
        assert_round_trip(&gateway, playlists);
    }
}

#[test]
fn ids_keep_counting_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = JsonFileGateway::new(dir.path().join("library.json"));

    let original = library_with_playlists(2);
    gateway.save(&original.snapshot()).unwrap();

    let mut loaded = Library::from_snapshot(gateway.load().unwrap().unwrap());
    let song = loaded.add_song("/m/new.wav");
    let playlist = loaded.create_playlist("Fresh").unwrap();

    assert!(original.songs().iter().all(|s| s.id() != song));
    assert!(original.playlists().iter().all(|p| p.id() != playlist));
}

#[test]
fn each_storage_kind_starts_empty() {
    let dir = tempfile::tempdir().unwrap();

    for kind in [StorageKind::Json, StorageKind::Sqlite, StorageKind::None] {
        let gateway = open_gateway(kind, dir.path());
        assert!(gateway.load().unwrap().is_none(), "{kind:?}");
    }
}

#[test]
fn ephemeral_storage_forgets_everything() {
    let gateway = open_gateway(StorageKind::None, Path::new("/nonexistent"));

    gateway.save(&library_with_playlists(2).snapshot()).unwrap();

    assert!(gateway.load().unwrap().is_none());
}
