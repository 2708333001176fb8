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

//! Terminal emulator side effects.
//!
//! The background colour is changed with OSC 11 and restored with OSC 111,
//! the window title goes through crossterm. Terminals that do not understand
//! a sequence simply ignore it.

use std::io::{self, Write};

use crossterm::{execute, terminal::SetTitle};

/// Paints the whole terminal window with `hex_color` (e.g. `"#281432"`),
/// so that no default-coloured border shows around the UI.
pub(crate) fn set_terminal_bg(hex_color: &str) {
    print!("\x1b]11;{}\x07", hex_color);
    io::stdout().flush().ok();
}

/// Puts the user's own background colour back.
pub(crate) fn reset_terminal_bg() {
    print!("\x1b]111\x07");
    io::stdout().flush().ok();
}

/// Shows the loaded song in the window or tab title.
pub(crate) fn set_terminal_title(title: &str) {
    execute!(io::stdout(), SetTitle(title)).ok();
}
