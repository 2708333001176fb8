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

//! Render the music player interface.
//!
//! This module renders the loaded song, the playback status and modes, the
//! elapsed and remaining time, the volume, and a progress bar.

use botify::{
    PlaybackStatus,
    playback::MAX_VOLUME,
    util::format::{UNKNOWN_TIME, format_duration, format_time},
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{
    App,
    render::icons::{
        ICON_MUTED, ICON_PAUSE, ICON_PLAY, ICON_REPEAT, ICON_REPEAT_ONE, ICON_SHUFFLE, ICON_STOP,
        ICON_VOLUME,
    },
};

/// Renders the main player widget including song info and controls.
pub(crate) fn draw_player(f: &mut Frame, area: Rect, app: &App) {
    let engine = app.session.engine();
    let capabilities = engine.capabilities();
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner_area);

    let info_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(30)])
        .split(chunks[0]);

    let icon = match engine.status() {
        PlaybackStatus::Playing => ICON_PLAY,
        PlaybackStatus::Paused => ICON_PAUSE,
        PlaybackStatus::Stopped => ICON_STOP,
    };

    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut track_line = vec![Span::styled(format!(" {} ", icon), bold).fg(Color::White)];
    match &app.now_playing {
        Some(title) => {
            track_line.push(Span::styled(title.as_str(), bold).fg(theme.accent_colour));
            if let Some(scope) = app.session.scope_name() {
                track_line.push(Span::raw(" in "));
                track_line.push(Span::styled(scope, bold).fg(theme.focus_colour));
            }
        }
        None => track_line.push(Span::raw("Nothing playing").fg(theme.inactive_fg)),
    }
    f.render_widget(Paragraph::new(Line::from(track_line)), info_chunks[0]);

    let duration = engine.duration();
    let position = engine.position();
    let remaining = match duration {
        Some(duration) => format_time((duration - position).max(0.0)),
        None => UNKNOWN_TIME.to_string(),
    };

    let time_line = Line::from(vec![
        Span::styled(format_time(position), bold).fg(theme.accent_colour),
        Span::styled(" / ", bold).fg(Color::White),
        Span::styled(format_duration(duration), bold).fg(theme.accent_colour),
        Span::styled(" (-", bold).fg(Color::White),
        Span::styled(remaining, bold).fg(theme.accent_colour),
        Span::styled(")", bold).fg(Color::White),
    ]);
    f.render_widget(
        Paragraph::new(time_line).alignment(Alignment::Right),
        info_chunks[1],
    );

    let control_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(26)])
        .split(chunks[2]);

    f.render_widget(Paragraph::new(mode_line(app)), control_chunks[0]);

    if capabilities.volume_control {
        let volume = engine.volume();
        let ratio = f64::from(volume.level()) / f64::from(MAX_VOLUME);

        let volume_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(5)])
            .split(control_chunks[1]);

        let volume_icon = if volume.is_muted() { ICON_MUTED } else { ICON_VOLUME };
        f.render_widget(Paragraph::new(volume_icon).fg(Color::White), volume_layout[0]);

        let volume_gauge = Gauge::default()
            .gauge_style(Style::default().fg(theme.accent_colour).bg(theme.gauge_track_colour))
            .ratio(ratio)
            .label("")
            .use_unicode(true);
        f.render_widget(volume_gauge, volume_layout[1]);

        let volume_label = Paragraph::new(format!(" {}%", volume.level()))
            .alignment(Alignment::Right)
            .fg(Color::White);
        f.render_widget(volume_label, volume_layout[2]);
    }

    let progress = duration
        .map(|duration| (position / duration).clamp(0.0, 1.0))
        .unwrap_or(0.0);

    let position_gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme.accent_colour).bg(theme.gauge_track_colour))
        .ratio(progress)
        .label("")
        .use_unicode(true);

    f.render_widget(position_gauge, chunks[4]);
}

/// The enabled playback modes, dimmed when off. Modes the front end lacks
/// the capability for are left out.
fn mode_line(app: &App) -> Line<'static> {
    let engine = app.session.engine();
    let capabilities = engine.capabilities();
    let theme = &app.theme;

    let style = |on: bool| {
        if on {
            Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.inactive_fg)
        }
    };

    let mut spans = Vec::new();

    if capabilities.split_loop_modes {
        spans.push(Span::styled(format!("{} song ", ICON_REPEAT_ONE), style(engine.loop_song())));
        spans.push(Span::styled(format!("{} list ", ICON_REPEAT), style(engine.loop_scope())));
    } else {
        spans.push(Span::styled(format!("{} loop ", ICON_REPEAT), style(engine.loop_scope())));
    }

    if capabilities.shuffle {
        spans.push(Span::styled(format!("{} shuffle", ICON_SHUFFLE), style(engine.shuffle())));
    }

    Line::from(spans)
}
