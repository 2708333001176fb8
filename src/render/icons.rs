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

//! Unicode symbols for the TUI.
//!
//! This module contains the icons used across the interface to represent
//! playback status and modes. These are selected for compatibility with most
//! modern terminal emulators and fonts.

// Standard Media Controls (Unicode)
pub(crate) const ICON_PLAY: &str = "\u{25B6}";
pub(crate) const ICON_PAUSE: &str = "\u{23F8}";
pub(crate) const ICON_STOP: &str = "\u{23F9}";

// Text-style variants (using Variation Selector-15 [\u{FE0E}]), this forces
// terminals to render the icons as monochrome text rather than colorful
// emojis, ensuring they respect the TUI's color styling.
pub(crate) const ICON_REPEAT: &str = "\u{1F501}\u{FE0E}";
pub(crate) const ICON_REPEAT_ONE: &str = "\u{1F502}\u{FE0E}";
pub(crate) const ICON_SHUFFLE: &str = "\u{1F500}\u{FE0E}";

// Volume State Icons (Unicode Speaker Symbols)
pub(crate) const ICON_VOLUME: &str = "\u{1F50A}\u{FE0E}";
pub(crate) const ICON_MUTED: &str = "\u{1F507}\u{FE0E}";
