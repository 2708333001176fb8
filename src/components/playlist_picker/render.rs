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

//! Popup rendering for the playlist picker.

use botify::Library;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph},
};

use crate::{components::PlaylistPicker, theme::Theme};

const POPUP_WIDTH: u16 = 40;
const POPUP_HEIGHT: u16 = 12;

impl PlaylistPicker {
    pub(crate) fn draw(&mut self, f: &mut Frame, area: Rect, library: &Library, theme: &Theme) {
        let Some(song) = self.song.and_then(|id| library.song(id)) else {
            return;
        };

        let popup = centered(area, POPUP_WIDTH, POPUP_HEIGHT);
        f.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.focus_colour))
            .style(Style::default().bg(theme.background_colour))
            .title(format!(" {} ", song.name()))
            .padding(Padding::horizontal(1));

        if library.playlists().is_empty() {
            let hint = Paragraph::new("No playlists yet, create one with :np <name>")
                .style(Style::default().fg(theme.inactive_fg))
                .block(block);
            f.render_widget(hint, popup);
            return;
        }

        let items: Vec<ListItem> = library
            .playlists()
            .iter()
            .map(|playlist| {
                let member = playlist.contains(song.id());
                let mark = if member { "[x] " } else { "[ ] " };
                let style = if member {
                    Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.table_song_fg)
                };

                ListItem::new(Line::from(vec![
                    Span::styled(mark, style),
                    Span::styled(playlist.name().to_string(), style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(theme.highlight_bg));

        f.render_stateful_widget(list, popup, &mut self.list_state);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    area
}
