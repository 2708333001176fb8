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

//! Colour palette for the TUI.

use ratatui::style::Color;

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) focus_colour: Color,
    pub(crate) gauge_track_colour: Color,
    pub(crate) highlight_bg: Color,
    pub(crate) inactive_fg: Color,

    pub(crate) commander_colour: Color,
    pub(crate) error_colour: Color,

    pub(crate) table_index_fg: Color,
    pub(crate) table_time_fg: Color,
    pub(crate) table_song_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background_colour: Color::Rgb(40, 20, 50),
            accent_colour: Color::Rgb(250, 189, 47),
            border_colour: Color::Rgb(102, 102, 102),
            focus_colour: Color::Rgb(179, 157, 219),
            gauge_track_colour: Color::Rgb(50, 30, 60),
            highlight_bg: Color::Rgb(70, 50, 110),
            inactive_fg: Color::Rgb(120, 118, 126),

            commander_colour: Color::Rgb(255, 255, 255),
            error_colour: Color::Rgb(240, 98, 98),

            table_index_fg: Color::Rgb(120, 118, 126),
            table_time_fg: Color::Rgb(162, 161, 166),
            table_song_fg: Color::Rgb(255, 255, 255),
        }
    }
}

impl Theme {
    /// Converts an RGB colour into a CSS-style hexadecimal string, for the
    /// terminal background escape sequence. Named and indexed colours have
    /// no fixed RGB value and fall back to black.
    pub(crate) fn to_hex(colour: Color) -> String {
        match colour {
            Color::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
            _ => String::from("#000000"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_converts_to_hex() {
        assert_eq!(Theme::to_hex(Color::Rgb(40, 20, 50)), "#281432");
        assert_eq!(Theme::to_hex(Color::Reset), "#000000");
    }
}
