use ratatui::{
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use tui_dispatch::{Component, EventKind};

use crate::action::Action;
use crate::state::Palette;

pub struct HelpBar;

pub struct HelpBarProps {
    pub palette: Palette,
}

const BINDINGS: [(&str, &str); 7] = [
    ("↑↓", "city"),
    ("←→", "date"),
    ("t", "today"),
    ("r", "reset"),
    ("i", "info"),
    ("d", "theme"),
    ("q", "quit"),
];

impl Component for HelpBar {
    type Props<'a> = HelpBarProps;

    #[allow(refining_impl_trait)]
    fn handle_event(&mut self, _event: &EventKind, _props: HelpBarProps) -> Vec<Action> {
        vec![]
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let spans: Vec<Span> = BINDINGS
            .iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(format!(" {key}"), Style::default().fg(props.palette.accent).bold()),
                    Span::styled(format!(" {label} "), Style::default().fg(props.palette.muted)),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}
