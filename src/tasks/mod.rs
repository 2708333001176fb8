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

//! Asynchronous application task processing.
//!
//! This module implements the command pattern used to offload potentially
//! blocking work, walking directories and probing audio files, from the main
//! UI thread. It provides a dedicated worker loop that translates
//! [`AppTask`] requests into file system operations and broadcasts the
//! results back to the application via [`AppEvent`]s.
//!
//! Only actions that may block, or may take more than a trivial amount of time
//! to process, should be implemented as tasks. The library itself is only
//! ever changed by the main thread, in response to those events.

mod handlers;
use handlers::*;

use std::{
    path::PathBuf,
    sync::mpsc::{Receiver, Sender},
    thread,
};

use anyhow::Result;
use botify::SongId;
use tracing::warn;

use crate::events::AppEvent;

#[derive(Debug)]
pub(crate) enum AppTask {
    /// Find the audio files at a path, a single file or a directory.
    AddPath(PathBuf),

    /// Read the duration of a song's file.
    ProbeDuration(SongId, PathBuf),
}

/// Spawns a background thread to process application tasks.
///
/// # Arguments
///
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_task_worker(task_rx: Receiver<AppTask>, event_tx: Sender<AppEvent>) {
    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            let ctx = TaskContext { event_tx: &event_tx };

            if let Err(e) = handle_task(task, &ctx) {
                warn!("task failed: {:#}", e);
                let _ = event_tx.send(AppEvent::Error(e.to_string()));
            }
        }
    });
}

/// Bundles shared resources required by task handlers.
struct TaskContext<'a> {
    event_tx: &'a Sender<AppEvent>,
}

/// Orchestrates the execution of a single task.
fn handle_task(task: AppTask, ctx: &TaskContext) -> Result<()> {
    match task {
        AppTask::AddPath(path) => add_path(ctx, path),
        AppTask::ProbeDuration(id, path) => probe_duration(ctx, id, path),
    }
}
