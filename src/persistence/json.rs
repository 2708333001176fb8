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

//! JSON file persistence.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    error::PersistenceError,
    persistence::{LibraryGateway, LibrarySnapshot},
};

pub const LIBRARY_FILE: &str = "library.json";

#[derive(Debug, Clone)]
pub struct JsonFileGateway {
    path: PathBuf,
}

impl JsonFileGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LibraryGateway for JsonFileGateway {
    fn load(&self) -> Result<Option<LibrarySnapshot>, PersistenceError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let snapshot = serde_json::from_str(&data)?;
        debug!(path = %self.path.display(), "loaded library");

        Ok(Some(snapshot))
    }

    /// Writes the snapshot to a sibling temporary file first and then renames
    /// it over the library file, so a failed write never truncates the last
    /// good copy.
    fn save(&self, snapshot: &LibrarySnapshot) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_string_pretty(snapshot)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, data)?;
        fs::rename(&tmp_path, &self.path)?;

        debug!(path = %self.path.display(), songs = snapshot.songs.len(), "saved library");

        Ok(())
    }
}
