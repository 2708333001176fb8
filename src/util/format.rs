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

/// Placeholder shown for a duration that is not known (yet).
pub const UNKNOWN_TIME: &str = "--:--";

/// Formats a duration in seconds into a human-readable `MM:SS` string.
///
/// Fractional seconds are truncated. Anything that is not a finite,
/// non-negative number renders as [`UNKNOWN_TIME`].
///
/// # Examples
///
/// ```
/// use botify::util::format::format_time;
///
/// assert_eq!(format_time(65.9), "01:05");
/// assert_eq!(format_time(3600.0), "60:00");
/// assert_eq!(format_time(f64::NAN), "--:--");
/// ```
pub fn format_time(total_seconds: f64) -> String {
    if !total_seconds.is_finite() || total_seconds < 0.0 {
        return UNKNOWN_TIME.to_string();
    }

    let total_seconds = total_seconds as u64;
    let mins = total_seconds / 60;
    let secs = total_seconds % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Formats an optional duration, rendering `None` as [`UNKNOWN_TIME`].
pub fn format_duration(seconds: Option<f64>) -> String {
    seconds.map_or_else(|| UNKNOWN_TIME.to_string(), format_time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_duration_renders_placeholder() {
        assert_eq!(format_duration(None), "--:--");
        assert_eq!(format_duration(Some(0.0)), "00:00");
        assert_eq!(format_time(-1.0), "--:--");
    }
}
