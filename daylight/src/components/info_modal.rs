//! Dismissible "about" panel

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use tui_dispatch::{Component, EventKind};

use crate::action::Action;
use crate::state::Palette;

pub const INFO_TITLE: &str = "Application Information";

pub const INFO_TEXT: &str = "This app displays the sunrise and sunset time, as well as the \
length of daylight for the selected day. It sends requests to the Sunrise Sunset API \
(https://sunrisesunset.io/api/) for a selection of cities across the United Kingdom.";

pub struct InfoModal;

pub struct InfoModalProps {
    pub palette: Palette,
}

impl InfoModal {
    pub const WIDTH: u16 = 60;
    pub const HEIGHT: u16 = 10;

    fn popup_area(area: Rect) -> Rect {
        let [row] = Layout::vertical([Constraint::Length(Self::HEIGHT)])
            .flex(Flex::Center)
            .areas(area);
        let [cell] = Layout::horizontal([Constraint::Length(Self::WIDTH)])
            .flex(Flex::Center)
            .areas(row);
        cell
    }
}

impl Component for InfoModal {
    type Props<'a> = InfoModalProps;

    /// Any of Esc, Enter, `i` or `q` closes the panel
    #[allow(refining_impl_trait)]
    fn handle_event(&mut self, event: &EventKind, _props: InfoModalProps) -> Vec<Action> {
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('i') | KeyCode::Char('q') => {
                    vec![Action::UiInfoClose]
                }
                _ => vec![],
            },
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: InfoModalProps) {
        let palette = props.palette;
        let popup = Self::popup_area(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.accent))
            .title(format!(" {INFO_TITLE} "))
            .title_style(Style::default().fg(palette.accent).bold())
            .style(Style::default().bg(palette.bg).fg(palette.fg));

        let text = Text::from(vec![
            Line::from(INFO_TEXT),
            Line::default(),
            Line::styled("Esc to close", Style::default().fg(palette.muted)).centered(),
        ]);

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(text).wrap(Wrap { trim: true }).block(block),
            popup,
        );
    }
}
