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

//! UI rendering logic for the song table.
//!
//! This module handles the visual representation of the songs in a scope,
//! with a summary header above the table itself.

use botify::util::format::{format_duration, format_time};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table},
};

use crate::{
    components::song_table::SongTable, render::Render, render::icons::ICON_PLAY, theme::Theme,
};

impl Render for SongTable<'_> {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);

        self.draw_header(f, chunks[0], theme);
        self.draw_table(f, chunks[1], theme);
    }
}

impl SongTable<'_> {
    fn draw_header(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let total: f64 = self.songs.iter().filter_map(|song| song.known_duration()).sum();

        let header_text = format!(
            "{} | {} songs | {}",
            self.title,
            self.songs.len(),
            format_time(total)
        );

        let border_colour = if self.focused { theme.focus_colour } else { theme.border_colour };

        let header = Paragraph::new(header_text).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(border_colour))
                .padding(Padding::horizontal(1)),
        );

        f.render_widget(header, area);
    }

    fn draw_table(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let width = self.songs.len().to_string().len().max(2);

        let rows = self.songs.iter().enumerate().map(|(index, song)| {
            let playing = self.playing == Some(index);

            let marker = if playing { ICON_PLAY } else { "" };
            let title_style = if playing {
                Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.table_song_fg)
            };

            Row::new(vec![
                Cell::from(Line::from(marker).style(Style::default().fg(theme.accent_colour))),
                Cell::from(
                    Line::from(format!("{:0width$}", index + 1))
                        .style(Style::default().fg(theme.table_index_fg))
                        .alignment(Alignment::Right),
                ),
                Cell::from(Line::from(song.name()).style(title_style)),
                Cell::from(
                    Line::from(format_duration(song.known_duration()))
                        .style(Style::default().fg(theme.table_time_fg))
                        .alignment(Alignment::Right),
                ),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(2),
                Constraint::Length(width as u16),
                Constraint::Min(0),
                Constraint::Length(6),
            ],
        )
        .header(
            Row::new(vec![
                Cell::from(""),
                Cell::from(Line::from("#").alignment(Alignment::Right)),
                Cell::from("Title"),
                Cell::from(Line::from("Time").alignment(Alignment::Right)),
            ])
            .style(Style::default().add_modifier(Modifier::BOLD).fg(theme.accent_colour))
            .bottom_margin(1),
        )
        .row_highlight_style(Style::default().bg(theme.highlight_bg))
        .block(Block::default().padding(Padding::horizontal(1)));

        f.render_stateful_widget(table, area, &mut *self.table_state);
    }
}
