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

//! SQLite persistence.
//!
//! The snapshot is stored across three tables. Saving replaces the contents
//! of all of them inside a single transaction, so the database always holds
//! one complete snapshot.
//!
//! # Tables
//!
//! * `songs` - Every song, with its position in library insertion order.
//! * `playlists` - User playlists, in creation order.
//! * `playlist_songs` - Playlist membership, ordered by position.
//!
//! Membership rows deliberately carry no foreign key to `songs`, a playlist
//! may reference a song that has been removed, and such rows are filtered
//! when the library is rebuilt.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};
use tracing::debug;

use crate::{
    error::PersistenceError,
    model::{PlaylistId, SongId},
    persistence::{LibraryGateway, LibrarySnapshot, PlaylistRecord, SongRecord},
};

pub const DATABASE_FILE: &str = "library.db";

#[derive(Debug, Clone)]
pub struct SqliteGateway {
    path: PathBuf,
}

impl SqliteGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LibraryGateway for SqliteGateway {
    fn load(&self) -> Result<Option<LibrarySnapshot>, PersistenceError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let conn = init_db(&self.path)?;
        let snapshot = read_snapshot(&conn)?;
        debug!(path = %self.path.display(), songs = snapshot.songs.len(), "loaded library");

        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &LibrarySnapshot) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut conn = init_db(&self.path)?;
        write_snapshot(&mut conn, snapshot)?;
        debug!(path = %self.path.display(), songs = snapshot.songs.len(), "saved library");

        Ok(())
    }
}

/// Opens a connection to the SQLite database and configures it.
///
/// This function performs the following setup:
/// * **WAL Mode**: Enables Write-Ahead Logging.
/// * **Constraints**: Enforces foreign key integrity.
/// * **Schema**: Executes [`create_schema`] to ensure all tables exist.
fn init_db(path: &Path) -> Result<Connection, PersistenceError> {
    let conn = Connection::open(path)?;

    let _journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;

    conn.execute_batch(
        "
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
    ",
    )?;

    create_schema(&conn)?;

    Ok(conn)
}

/// Create the database schema.
///
/// This operation is wrapped in a single SQL transaction to ensure the schema
/// is updated atomically.
fn create_schema(conn: &Connection) -> Result<(), PersistenceError> {
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS songs (
            id INTEGER PRIMARY KEY,
            position INTEGER NOT NULL,
            name TEXT NOT NULL,
            path TEXT NOT NULL,
            duration REAL NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS playlists (
            id INTEGER PRIMARY KEY,
            position INTEGER NOT NULL,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS playlist_songs (
            playlist_id INTEGER NOT NULL,
            position INTEGER NOT NULL,
            song_id INTEGER NOT NULL,
            PRIMARY KEY (playlist_id, song_id),
            FOREIGN KEY (playlist_id) REFERENCES playlists (id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_playlist_songs_playlist_id ON playlist_songs (playlist_id);

        COMMIT;",
    )?;

    Ok(())
}

fn read_snapshot(conn: &Connection) -> Result<LibrarySnapshot, PersistenceError> {
    let mut stmt =
        conn.prepare_cached("SELECT id, name, path, duration FROM songs ORDER BY position")?;
    let songs = stmt
        .query_map([], |row| {
            Ok(SongRecord {
                id: SongId(row.get::<_, i64>(0)? as u64),
                name: row.get(1)?,
                path: PathBuf::from(row.get::<_, String>(2)?),
                duration: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare_cached("SELECT id, name FROM playlists ORDER BY position")?;
    let mut playlists = stmt
        .query_map([], |row| {
            Ok(PlaylistRecord {
                id: PlaylistId(row.get::<_, i64>(0)? as u64),
                name: row.get(1)?,
                songs: Vec::new(),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare_cached(
        "SELECT song_id FROM playlist_songs WHERE playlist_id = ? ORDER BY position",
    )?;
    for playlist in playlists.iter_mut() {
        playlist.songs = stmt
            .query_map([playlist.id.0 as i64], |row| Ok(SongId(row.get::<_, i64>(0)? as u64)))?
            .collect::<Result<Vec<_>, _>>()?;
    }

    Ok(LibrarySnapshot { songs, playlists })
}

fn write_snapshot(
    conn: &mut Connection,
    snapshot: &LibrarySnapshot,
) -> Result<(), PersistenceError> {
    let tx = conn.transaction()?;

    tx.execute("DELETE FROM playlist_songs", [])?;
    tx.execute("DELETE FROM playlists", [])?;
    tx.execute("DELETE FROM songs", [])?;

    for (position, song) in snapshot.songs.iter().enumerate() {
        tx.execute(
            "INSERT INTO songs (id, position, name, path, duration) VALUES (?, ?, ?, ?, ?)",
            params![
                song.id.0 as i64,
                position as i64,
                song.name,
                song.path.to_string_lossy(),
                song.duration
            ],
        )?;
    }

    for (position, playlist) in snapshot.playlists.iter().enumerate() {
        tx.execute(
            "INSERT INTO playlists (id, position, name) VALUES (?, ?, ?)",
            params![playlist.id.0 as i64, position as i64, playlist.name],
        )?;

        for (member_position, song_id) in playlist.songs.iter().enumerate() {
            tx.execute(
                "INSERT OR IGNORE INTO playlist_songs (playlist_id, position, song_id) \
                 VALUES (?, ?, ?)",
                params![playlist.id.0 as i64, member_position as i64, song_id.0 as i64],
            )?;
        }
    }

    tx.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LibrarySnapshot {
        LibrarySnapshot {
            songs: vec![
                SongRecord {
                    id: SongId(3),
                    name: "b".into(),
                    path: "/music/b.mp3".into(),
                    duration: 0.0,
                },
                SongRecord {
                    id: SongId(1),
                    name: "a".into(),
                    path: "/music/a.mp3".into(),
                    duration: 200.25,
                },
            ],
            playlists: vec![PlaylistRecord {
                id: PlaylistId(1),
                name: "Mix".into(),
                songs: vec![SongId(1), SongId(3)],
            }],
        }
    }

    #[test]
    fn missing_database_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = SqliteGateway::new(dir.path().join(DATABASE_FILE));

        assert_eq!(gateway.load().unwrap(), None);
    }

    #[test]
    fn save_preserves_insertion_order_not_id_order() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = SqliteGateway::new(dir.path().join(DATABASE_FILE));

        gateway.save(&sample()).unwrap();

        assert_eq!(gateway.load().unwrap(), Some(sample()));
    }

    #[test]
    fn save_replaces_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = SqliteGateway::new(dir.path().join(DATABASE_FILE));

        gateway.save(&sample()).unwrap();
        gateway.save(&LibrarySnapshot::default()).unwrap();

        assert_eq!(gateway.load().unwrap(), Some(LibrarySnapshot::default()));
    }
}
