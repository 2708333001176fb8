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

//! Command-line input logic and state management.
//!
//! This module implements the logic for a command-line processing component,
//! handling a text input component, and dispatching a corresponding
//! application event or task when typing is finished and a command is
//! submitted.
//!
//! # Commands
//!
//! | Command           | Action                                        |
//! |-------------------|-----------------------------------------------|
//! | `q`               | quit                                          |
//! | `add <path>`      | add a file, or every audio file in a folder   |
//! | `np <name>`       | create a playlist                             |
//! | `dp`              | delete the selected playlist                  |
//! | `rm`              | remove the highlighted song from the view     |
//! | `all`             | show every song                               |
//! | `p`, `pn`, `pp`   | play/pause, play next, play previous          |
//! | `seek <secs>`     | seek to a position                            |
//! | `skip <secs>`     | seek relative to the current position         |
//! | `ls`, `lp`, `sh`  | toggle loop song, loop playlist, shuffle      |
//! | `v <0-100>`, `vm` | set volume, toggle mute                       |

use std::{path::PathBuf, sync::mpsc::Sender};

use anyhow::{Result, bail};
use botify::MediaControl;
use crossterm::event::{Event, KeyCode};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{events::AppEvent, tasks::AppTask};

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Handles a key event, returning `true` if the commander consumed it.
    pub(crate) fn handle_event(
        &mut self,
        event: &Event,
        task_tx: &Sender<AppTask>,
        event_tx: &Sender<AppEvent>,
    ) -> bool {
        let Event::Key(key_event) = event else {
            return false;
        };

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                return true;
            }
            return false;
        }

        match key_event.code {
            KeyCode::Esc => {
                self.active = false;
                self.input.reset();
            }

            KeyCode::Enter => {
                let buffer = self.input.value().trim().to_string();
                self.input.reset();
                self.active = false;

                if !buffer.is_empty() {
                    if let Err(e) = run_command(&buffer, task_tx, event_tx) {
                        let _ = event_tx.send(AppEvent::Error(e.to_string()));
                    }
                }
            }

            _ => {
                // Delegate all other key events to the managed input component.
                self.input.handle_event(event);
            }
        }

        true
    }
}

fn run_command(buffer: &str, task_tx: &Sender<AppTask>, event_tx: &Sender<AppEvent>) -> Result<()> {
    // Paths are taken verbatim, runs of spaces included
    if let Some(("add", path)) = buffer.split_once(char::is_whitespace) {
        task_tx.send(AppTask::AddPath(PathBuf::from(path.trim_start())))?;
        return Ok(());
    }

    let parts: Vec<&str> = buffer.split_whitespace().collect();

    let event = match parts.as_slice() {
        ["q"] => AppEvent::ExitApplication,

        ["add"] => bail!("Usage: add <path>"),

        ["np", name_parts @ ..] => AppEvent::CreatePlaylist(name_parts.join(" ")),
        ["dp"] => AppEvent::DeleteSelectedPlaylist,
        ["rm"] => AppEvent::RemoveSelectedSong,
        ["all"] => AppEvent::ShowAllSongs,

        ["p"] => AppEvent::Media(MediaControl::TogglePlayPause),
        ["pn"] => AppEvent::Media(MediaControl::Next),
        ["pp"] => AppEvent::Media(MediaControl::Previous),
        ["seek", secs] => AppEvent::Media(MediaControl::SeekTo(parse_seconds(secs)?)),
        ["skip", secs] => AppEvent::Media(MediaControl::SeekBy(parse_seconds(secs)?)),

        ["ls"] => AppEvent::ToggleLoopSong,
        ["lp"] => AppEvent::ToggleLoopScope,
        ["sh"] => AppEvent::ToggleShuffle,

        ["v", volume] => match volume.parse::<u8>() {
            Ok(level) if level <= 100 => AppEvent::SetVolume(level),
            _ => bail!("Volume must be between 0 and 100"),
        },
        ["vm"] => AppEvent::ToggleMute,

        [cmd, ..] => bail!("Unknown command: {}", cmd),
        [] => return Ok(()),
    };

    event_tx.send(event)?;

    Ok(())
}

fn parse_seconds(value: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(secs) if secs.is_finite() => Ok(secs),
        _ => bail!("Not a number of seconds: {}", value),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};

    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn submit(command: &str) -> (Receiver<AppTask>, Receiver<AppEvent>) {
        let (task_tx, task_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let mut commander = Commander::new();
        assert!(commander.handle_event(&key(KeyCode::Char(':')), &task_tx, &event_tx));
        for c in command.chars() {
            commander.handle_event(&key(KeyCode::Char(c)), &task_tx, &event_tx);
        }
        assert!(commander.handle_event(&key(KeyCode::Enter), &task_tx, &event_tx));
        assert!(!commander.active());

        (task_rx, event_rx)
    }

    #[test]
    fn keys_pass_through_when_inactive() {
        let (task_tx, _task_rx) = mpsc::channel();
        let (event_tx, _event_rx) = mpsc::channel();

        let mut commander = Commander::new();
        assert!(!commander.handle_event(&key(KeyCode::Char('j')), &task_tx, &event_tx));
    }

    #[test]
    fn add_path_keeps_spaces() {
        let (task_rx, _) = submit("add /music/Some Album");

        match task_rx.try_recv().unwrap() {
            AppTask::AddPath(path) => assert_eq!(path, PathBuf::from("/music/Some Album")),
            other => panic!("unexpected task {:?}", other),
        }
    }

    #[test]
    fn add_path_keeps_runs_of_spaces() {
        let (task_rx, _) = submit("add   /music/A  B ");

        match task_rx.try_recv().unwrap() {
            AppTask::AddPath(path) => assert_eq!(path, PathBuf::from("/music/A  B")),
            other => panic!("unexpected task {:?}", other),
        }
    }

    #[test]
    fn add_without_path_is_reported() {
        let (task_rx, event_rx) = submit("add");

        assert!(task_rx.try_recv().is_err());
        assert!(matches!(event_rx.try_recv().unwrap(), AppEvent::Error(_)));
    }

    #[test]
    fn new_playlist_name_is_joined() {
        let (_, event_rx) = submit("np Road  Trip");

        match event_rx.try_recv().unwrap() {
            AppEvent::CreatePlaylist(name) => assert_eq!(name, "Road Trip"),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn seek_goes_through_media_controls() {
        let (_, event_rx) = submit("skip -15");

        match event_rx.try_recv().unwrap() {
            AppEvent::Media(control) => assert_eq!(control, MediaControl::SeekBy(-15.0)),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn bad_input_is_reported() {
        let (_, event_rx) = submit("v 250");
        assert!(matches!(event_rx.try_recv().unwrap(), AppEvent::Error(_)));

        let (_, event_rx) = submit("frobnicate");
        assert!(matches!(event_rx.try_recv().unwrap(), AppEvent::Error(_)));
    }
}
