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

use anyhow::{Result, bail};
use botify::{SongId, scan};
use tracing::{debug, info};

use crate::{events::AppEvent, tasks::TaskContext};

pub(super) fn add_path(ctx: &TaskContext, path: PathBuf) -> Result<()> {
    let files = scan::collect_audio_files(&path);
    if files.is_empty() {
        bail!("No audio files found at {}", path.display());
    }

    info!(path = %path.display(), count = files.len(), "found audio files");
    ctx.event_tx.send(AppEvent::SongsFound(files))?;

    Ok(())
}

pub(super) fn probe_duration(ctx: &TaskContext, id: SongId, path: PathBuf) -> Result<()> {
    match scan::probe_duration(&path) {
        Some(seconds) => ctx.event_tx.send(AppEvent::DurationProbed(id, seconds))?,
        None => debug!(%id, "no duration for song"),
    }

    Ok(())
}
