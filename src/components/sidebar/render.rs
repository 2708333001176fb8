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

//! UI rendering logic for the scope list.

use botify::{Library, Scope, library::scope};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding},
};

use crate::{components::Sidebar, theme::Theme};

impl Sidebar {
    pub(crate) fn draw(
        &mut self,
        f: &mut Frame,
        area: Rect,
        library: &Library,
        active: Scope,
        focused: bool,
        theme: &Theme,
    ) {
        let items: Vec<ListItem> = Self::scopes(library)
            .into_iter()
            .map(|s| {
                let name = scope::scope_name(library, s).unwrap_or_default().to_string();
                let count = library.resolve_scope(s).len();

                let style = if s == active {
                    Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.table_song_fg)
                };

                ListItem::new(Line::from(vec![
                    Span::styled(name, style),
                    Span::styled(format!(" ({})", count), Style::default().fg(theme.inactive_fg)),
                ]))
            })
            .collect();

        let border_colour = if focused { theme.focus_colour } else { theme.border_colour };

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::RIGHT)
                    .border_style(Style::default().fg(border_colour))
                    .title(" Playlists ")
                    .padding(Padding::horizontal(1)),
            )
            .highlight_style(Style::default().bg(theme.highlight_bg));

        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}
