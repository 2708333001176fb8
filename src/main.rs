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

//! # Botify TUI.
//!
//! A terminal-based music player with user playlists.
//!
//! This application coordinates a TUI frontend built with `ratatui` and a
//! background processing layer.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** owns the [`Session`], manages the terminal lifecycle
//!   and renders the UI.
//! * **Background Workers** handle MPV playback, directory scans and metadata
//!   probes.
//! * **Event Loops** capture user input and system ticks to drive the UI
//!   state.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the UI and background workers is handled via `std::sync::mpsc`
//! channels.

mod commander;
mod components;
mod events;
mod player;
mod render;
mod tasks;
mod term;
mod theme;

use std::{
    fs::File,
    io,
    sync::{
        Mutex,
        mpsc::{self, Receiver, Sender},
    },
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use botify::{
    Session,
    config::{self, AppConfig},
    persistence,
};
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    commander::Commander,
    components::{PlaylistPicker, Sidebar, SongTableState},
    events::{AppEvent, process_events},
    player::{EventForwarder, MpvHandle},
    tasks::AppTask,
    theme::Theme,
};

const LOG_FILE: &str = "botify.log";

/// Which part of the interface receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Sidebar,
    Songs,
}

/// A one-line message for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StatusMessage {
    Info(String),
    Error(String),
}

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,
    pub focus: Focus,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub task_tx: Sender<AppTask>,

    pub session: Session<MpvHandle>,

    pub sidebar: Sidebar,
    pub song_table: SongTableState,
    pub playlist_picker: PlaylistPicker,
    pub commander: Commander,

    /// Title of the loaded song, kept here since the engine forgets its
    /// index when the scope changes.
    pub now_playing: Option<String>,

    /// Shown in the status bar until the next one.
    pub status: Option<StatusMessage>,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig, task_tx: Sender<AppTask>) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();

        let handle = MpvHandle::new(event_tx.clone()).context("Failed to start audio player")?;

        let gateway = persistence::open_gateway(config.storage, &config::data_dir());
        let mut session = Session::open(gateway, handle, config.capabilities);
        session.subscribe(Box::new(EventForwarder::new(event_tx.clone())));
        session
            .set_volume(config.initial_volume)
            .context("Failed to set initial volume")?;

        Ok(Self {
            config,
            theme: Theme::default(),
            focus: Focus::Songs,
            event_tx,
            event_rx,
            task_tx,
            session,
            sidebar: Sidebar::new(),
            song_table: SongTableState::new(),
            playlist_picker: PlaylistPicker::new(),
            commander: Commander::new(),
            now_playing: None,
            status: None,
        })
    }
}

/// The entry point of the application.
///
/// Sets up logging and the communication channels, initializes the
/// application state, manages the terminal lifecycle, and returns an error if
/// any part of the execution fails.
fn main() -> Result<()> {
    init_logging().context("Failed to initialise logging")?;

    let config = config::load_config();

    let (task_tx, task_rx) = mpsc::channel();

    let mut app = App::new(config, task_tx).context("Failed to initalise application")?;

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app, task_rx);
    restore_terminal(&mut terminal);

    shutdown(&mut app);

    res.context("Application error occurred")
}

/// Routes `tracing` output to a log file next to the configuration file,
/// since the terminal itself belongs to the UI.
///
/// The filter defaults to `botify=info` and can be overridden with
/// `RUST_LOG`.
fn init_logging() -> Result<()> {
    let dir = config::data_dir();
    std::fs::create_dir_all(&dir)?;
    let file = File::create(dir.join(LOG_FILE))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "botify=info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();

    Ok(())
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    term::set_terminal_bg(&Theme::to_hex(app.theme.background_colour));

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including disabling
/// raw mode, leaving the alternate screen, and resetting the background color.
/// It also ensures the cursor is made visible again.
///
/// This function is "best-effort" and does not return a result, as it is
/// typically called during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    term::reset_terminal_bg();
    terminal.show_cursor().ok();
}

/// Persists the library and remembers the volume for next time.
fn shutdown(app: &mut App) {
    if let Err(e) = app.session.save() {
        warn!("failed to save library on exit: {}", e);
    }

    let volume = app.session.engine().volume();
    if !volume.is_muted() && volume.level() != app.config.initial_volume {
        app.config.initial_volume = volume.level();
        if let Err(e) = config::save_config(&app.config) {
            warn!("failed to save configuration: {}", e);
        }
    }

    info!("exiting");
}

/// Starts the application's background workers and enters the main event loop.
///
/// This function spawns several long-running background threads:
/// * A task worker to process asynchronous [`AppTask`]s.
/// * An input thread to poll for system keyboard events.
/// * A tick thread to trigger periodic UI refreshes.
///
/// After spawning the workers, it hands control to [`process_events`] to
/// manage the UI and state updates.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    task_rx: Receiver<AppTask>,
) -> Result<()> {
    // Spawn a background worker to process application tasks asynchronously.
    tasks::spawn_task_worker(task_rx, app.event_tx.clone());

    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read() {
                if tx_keys.send(AppEvent::Key(key)).is_err() {
                    break;
                }
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(Duration::from_millis(250));
        }
    });

    // Songs restored from an earlier session may still lack a duration
    for song in app.session.library().songs() {
        if song.known_duration().is_none() {
            app.task_tx
                .send(AppTask::ProbeDuration(song.id(), song.path().to_path_buf()))?;
        }
    }

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
