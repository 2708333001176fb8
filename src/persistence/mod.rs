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

//! Library persistence.
//!
//! The library is saved and loaded as a flat [`LibrarySnapshot`], never as a
//! log or an index. Where the snapshot goes is decided by a
//! [`LibraryGateway`] implementation:
//!
//! * [`json::JsonFileGateway`]: a pretty-printed `library.json` file.
//! * [`sqlite::SqliteGateway`]: an SQLite database.
//! * [`EphemeralGateway`]: nothing is persisted, every session starts empty.
//!
//! A missing file or database is not an error, it loads as `Ok(None)`.

pub mod json;
pub mod sqlite;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    config::StorageKind,
    error::PersistenceError,
    model::{PlaylistId, SongId},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibrarySnapshot {
    #[serde(default)]
    pub songs: Vec<SongRecord>,
    #[serde(default)]
    pub playlists: Vec<PlaylistRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongRecord {
    pub id: SongId,
    pub name: String,
    pub path: PathBuf,
    #[serde(default)]
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRecord {
    pub id: PlaylistId,
    pub name: String,
    #[serde(default)]
    pub songs: Vec<SongId>,
}

/// Durable storage for library snapshots.
pub trait LibraryGateway: Send {
    /// Loads the last saved snapshot, or `None` if nothing was ever saved.
    fn load(&self) -> Result<Option<LibrarySnapshot>, PersistenceError>;

    /// Replaces the stored snapshot.
    fn save(&self, snapshot: &LibrarySnapshot) -> Result<(), PersistenceError>;
}

/// A gateway that keeps nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct EphemeralGateway;

impl LibraryGateway for EphemeralGateway {
    fn load(&self) -> Result<Option<LibrarySnapshot>, PersistenceError> {
        Ok(None)
    }

    fn save(&self, _snapshot: &LibrarySnapshot) -> Result<(), PersistenceError> {
        Ok(())
    }
}

/// Creates the gateway for the configured storage kind, keeping its files in
/// `data_dir`.
pub fn open_gateway(kind: StorageKind, data_dir: &Path) -> Box<dyn LibraryGateway> {
    match kind {
        StorageKind::Json => {
            Box::new(json::JsonFileGateway::new(data_dir.join(json::LIBRARY_FILE)))
        }
        StorageKind::Sqlite => {
            Box::new(sqlite::SqliteGateway::new(data_dir.join(sqlite::DATABASE_FILE)))
        }
        StorageKind::None => Box::new(EphemeralGateway),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ephemeral_gateway_never_has_a_snapshot() {
        let gateway = EphemeralGateway;
        gateway.save(&LibrarySnapshot::default()).unwrap();
        assert_eq!(gateway.load().unwrap(), None);
    }

    #[test]
    fn snapshot_json_shape() {
        let snapshot = LibrarySnapshot {
            songs: vec![SongRecord {
                id: SongId(1),
                name: "Intro".into(),
                path: "/music/Intro.flac".into(),
                duration: 62.5,
            }],
            playlists: vec![PlaylistRecord {
                id: PlaylistId(2),
                name: "Mix".into(),
                songs: vec![SongId(1)],
            }],
        };

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "songs": [{
                    "id": 1,
                    "name": "Intro",
                    "path": "/music/Intro.flac",
                    "duration": 62.5,
                }],
                "playlists": [{ "id": 2, "name": "Mix", "songs": [1] }],
            })
        );
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let snapshot: LibrarySnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot, LibrarySnapshot::default());
    }
}
