//! The four value boxes: sunrise, sunset, day length, date

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Text},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use daylight_core::{DashboardView, ValueView};

use tui_dispatch::{Component, EventKind};

use crate::action::Action;
use crate::state::Palette;

pub const ERROR_ICON: &str = "⚠";
pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub struct ValueBoxes;

pub struct ValueBoxesProps<'a> {
    pub view: &'a DashboardView,
    pub palette: Palette,
    pub tick_count: u32,
}

impl ValueBoxes {
    pub const HEIGHT: u16 = 5;

    fn value_text(value: &ValueView, palette: Palette, tick_count: u32) -> Text<'static> {
        match value {
            ValueView::Pending => {
                let spinner = SPINNERS[(tick_count as usize / 2) % SPINNERS.len()];
                Text::from(Line::styled(
                    format!("{spinner} loading"),
                    Style::default().fg(palette.muted),
                ))
            }
            ValueView::Ready(text) => Text::from(Line::styled(
                text.clone(),
                Style::default().fg(palette.fg).bold(),
            )),
            ValueView::Failed(err) => Text::from(vec![
                Line::styled(
                    format!("{ERROR_ICON} {}", err.label()),
                    Style::default().fg(palette.error).bold(),
                ),
                Line::styled(err.to_string(), Style::default().fg(palette.muted)),
            ]),
        }
    }

    fn render_box(frame: &mut Frame, area: Rect, title: &str, body: Text<'_>, palette: Palette) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.border))
            .title(format!(" {title} "))
            .title_style(Style::default().fg(palette.accent).bold());
        frame.render_widget(
            Paragraph::new(body)
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
    }
}

impl Component for ValueBoxes {
    type Props<'a> = ValueBoxesProps<'a>;

    #[allow(refining_impl_trait)]
    fn handle_event(&mut self, _event: &EventKind, _props: Self::Props<'_>) -> Vec<Action> {
        vec![]
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.palette;
        let view = props.view;
        let boxes = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);

        let fetched = [
            ("Sunrise", &view.sunrise),
            ("Sunset", &view.sunset),
            ("Day Length", &view.day_length),
        ];
        for (slot, (title, value)) in boxes.iter().zip(fetched) {
            let body = Self::value_text(value, palette, props.tick_count);
            Self::render_box(frame, *slot, title, body, palette);
        }

        let date = Text::from(Line::styled(
            view.date.clone(),
            Style::default().fg(palette.fg).bold(),
        ));
        Self::render_box(frame, boxes[3], "Date", date, palette);
    }
}
