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

//! Audio file discovery and metadata probing.
//!
//! It utilizes `WalkDir` for directory traversal and `Lofty` for reading the
//! duration of a file without decoding it.

use std::path::{Path, PathBuf};

use lofty::{prelude::*, probe::Probe};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// File extensions accepted as audio, compared case-insensitively.
pub const AUDIO_EXTENSIONS: [&str; 5] = ["mp3", "wav", "ogg", "flac", "m4a"];

pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| AUDIO_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
}

/// Collects the audio files at `path`.
///
/// A single file is returned as-is if it looks like audio. A directory is
/// walked recursively, and the files found are returned sorted by path so
/// that songs are added in a predictable order. Unreadable entries are
/// skipped.
pub fn collect_audio_files(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return if is_audio_file(path) { vec![path.to_path_buf()] } else { Vec::new() };
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_audio_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    debug!(path = %path.display(), count = files.len(), "collected audio files");

    files
}

/// Reads the duration of an audio file, in seconds.
///
/// Returns `None` if the file cannot be probed or reports no duration, the
/// song then simply stays of unknown length.
pub fn probe_duration(path: &Path) -> Option<f64> {
    let tagged_file = match Probe::open(path).and_then(|p| p.read()) {
        Ok(file) => file,
        Err(e) => {
            debug!(path = %path.display(), "duration probe failed: {}", e);
            return None;
        }
    };

    let seconds = tagged_file.properties().duration().as_secs_f64();
    (seconds > 0.0).then_some(seconds)
}
