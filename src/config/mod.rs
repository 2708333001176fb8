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

//! Application configuration.
//!
//! This module manages the application configuration file. The library file,
//! database and log file all live next to it, in the directory returned by
//! [`data_dir`].

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::playback::Capabilities;

const CONFIG_NAME: &str = "botify";

/// Where the library snapshot is kept.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    Json,
    Sqlite,
    /// Nothing is persisted, the library lives for a single session.
    None,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub version: u32,
    pub storage: StorageKind,
    pub capabilities: Capabilities,
    /// Initial volume, 0 to 100.
    pub initial_volume: u8,
    pub volume_step: u8,
    /// Relative seek step in seconds, also the default skip of the media
    /// control surface.
    pub seek_step_secs: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            storage: StorageKind::default(),
            capabilities: Capabilities::default(),
            initial_volume: 100,
            volume_step: 5,
            seek_step_secs: 10.0,
        }
    }
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

pub fn save_config(cfg: &AppConfig) -> Result<(), confy::ConfyError> {
    confy::store(CONFIG_NAME, None, cfg)
}

/// The directory holding the configuration file, falling back to the
/// current directory if the platform config location cannot be determined.
pub fn data_dir() -> PathBuf {
    confy::get_configuration_file_path(CONFIG_NAME, None)
        .ok()
        .and_then(|path| path.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}
