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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called on every
//! terminal tick or state change to provide a reactive user interface.

mod commander;
pub(crate) mod icons;
mod player;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::{
    App, Focus,
    render::{commander::draw_commander, player::draw_player},
    theme::Theme,
};

const SIDEBAR_WIDTH: u16 = 28;

pub(crate) trait Render {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme);
}

/// Renders the user interface to the terminal frame.
///
/// The screen is split into the scope sidebar and song table on top, the
/// player below them, and a single command/status line at the bottom. The
/// playlist picker, when open, is drawn over everything else.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Outer layout: main, player, command line
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(7),
            Constraint::Length(1),
        ])
        .split(area);

    // Main layout: sidebar, content
    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(outer[0]);

    let library = app.session.library();
    let scope = app.session.scope();

    app.sidebar.draw(
        f,
        main[0],
        library,
        scope,
        app.focus == Focus::Sidebar,
        &app.theme,
    );

    let songs = app.session.songs();
    let title = app.session.scope_name().unwrap_or_default();
    let playing = app.session.engine().current_index();

    app.song_table
        .as_widget(title, &songs, playing, app.focus == Focus::Songs)
        .draw(f, main[1], &app.theme);

    draw_player(f, outer[1], app);

    draw_commander(f, outer[2], app);

    if app.playlist_picker.is_open() {
        app.playlist_picker
            .draw(f, area, app.session.library(), &app.theme);
    }
}
