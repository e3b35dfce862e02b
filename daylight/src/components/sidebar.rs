//! City selector and date input

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use chrono::NaiveDate;
use daylight_core::CityRegistry;

use tui_dispatch::{Component, EventKind};

use crate::action::Action;
use crate::state::{Palette, Theme};

pub struct Sidebar;

pub struct SidebarProps<'a> {
    pub registry: &'a CityRegistry,
    pub selected_city: &'a str,
    pub date: NaiveDate,
    pub theme: Theme,
}

impl Sidebar {
    pub const WIDTH: u16 = 24;

    fn section(title: &str, palette: Palette) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.border))
            .title(format!(" {title} "))
            .title_style(Style::default().fg(palette.accent).bold())
    }
}

impl Component for Sidebar {
    type Props<'a> = SidebarProps<'a>;

    #[allow(refining_impl_trait)]
    fn handle_event(&mut self, _event: &EventKind, _props: Self::Props<'_>) -> Vec<Action> {
        vec![]
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.theme.palette();
        let city_rows = props.registry.cities().len() as u16 + 2;
        let [cities_area, date_area, theme_area] = Layout::vertical([
            Constraint::Length(city_rows),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .areas(area);

        let items: Vec<ListItem> = props
            .registry
            .names()
            .map(|name| ListItem::new(name).style(Style::default().fg(palette.fg)))
            .collect();
        let list = List::new(items)
            .block(Self::section("Select City", palette))
            .highlight_symbol("▸ ")
            .highlight_style(
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            );
        let mut list_state =
            ListState::default().with_selected(props.registry.position(props.selected_city));
        frame.render_stateful_widget(list, cities_area, &mut list_state);

        let date_line = Line::from(vec![
            Span::styled("◂ ", Style::default().fg(palette.muted)),
            Span::styled(
                props.date.format("%Y-%m-%d").to_string(),
                Style::default().fg(palette.fg).bold(),
            ),
            Span::styled(" ▸", Style::default().fg(palette.muted)),
        ])
        .centered();
        frame.render_widget(
            Paragraph::new(date_line).block(Self::section("Select Date", palette)),
            date_area,
        );

        let theme_line = Line::styled(
            format!("{} mode", props.theme.name()),
            Style::default().fg(palette.muted),
        )
        .centered();
        frame.render_widget(
            Paragraph::new(theme_line).block(Self::section("Theme", palette)),
            theme_area,
        );
    }
}
