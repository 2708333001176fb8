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

//! Volume and mute state.

pub const MAX_VOLUME: u8 = 100;

/// Volume level on a 0 to 100 scale, with a mute toggle that remembers the
/// level to restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Volume {
    level: u8,
    muted: bool,
    remembered: Option<u8>,
}

impl Volume {
    pub fn new(level: u8) -> Self {
        let level = level.min(MAX_VOLUME);
        Self {
            level,
            muted: level == 0,
            remembered: None,
        }
    }

    /// The current level, zero while muted.
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// The level scaled to the 0.0 to 1.0 range a playback handle expects.
    pub fn output(&self) -> f64 {
        f64::from(self.level) / f64::from(MAX_VOLUME)
    }

    /// Sets an explicit level. Any non-zero level clears the mute, and the
    /// level becomes the one a later unmute restores.
    pub(crate) fn set(&mut self, level: u8) {
        let level = level.min(MAX_VOLUME);
        self.level = level;
        self.remembered = Some(level);
        self.muted = level == 0;
    }

    /// Mutes, remembering the current level, or unmutes, restoring it. With
    /// nothing remembered, unmuting restores silence.
    pub(crate) fn toggle_mute(&mut self) {
        if self.muted {
            self.level = self.remembered.unwrap_or(0);
            self.muted = false;
        } else {
            self.remembered = Some(self.level);
            self.level = 0;
            self.muted = true;
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(MAX_VOLUME)
    }
}
