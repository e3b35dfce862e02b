//! Top-level dashboard: sidebar inputs on the left, values and map on the right
//!
//! Props<'a> borrow the whole state; child components get narrower props.
//! While the info panel is open it owns the keyboard. Only key presses count;
//! terminals that report releases and repeats would otherwise act twice.

use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::prelude::{Frame, Rect};
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Style, Stylize},
    widgets::{Block, BorderType, Borders},
};

use tui_dispatch::{Component, EventKind};

use super::{
    CityMap, CityMapProps, HelpBar, HelpBarProps, InfoModal, InfoModalProps, Sidebar,
    SidebarProps, ValueBoxes, ValueBoxesProps, SPINNERS,
};
use crate::action::Action;
use crate::state::AppState;

pub const APP_TITLE: &str = "☀ Daylight Time";

pub struct DashboardProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct Dashboard;

impl Component for Dashboard {
    type Props<'a> = DashboardProps<'a>;

    #[allow(refining_impl_trait)]
    fn handle_event(&mut self, event: &EventKind, props: DashboardProps<'_>) -> Vec<Action> {
        if !props.is_focused {
            return vec![];
        }

        if let EventKind::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return vec![];
            }
        }

        if props.state.show_info {
            let palette = props.state.theme.palette();
            return InfoModal.handle_event(event, InfoModalProps { palette });
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Up | KeyCode::Char('k') => vec![Action::CityPrev],
                KeyCode::Down | KeyCode::Char('j') => vec![Action::CityNext],
                KeyCode::Left | KeyCode::Char('h') => vec![Action::DateStep(-1)],
                KeyCode::Right | KeyCode::Char('l') => vec![Action::DateStep(1)],
                KeyCode::Char('t') => vec![Action::DateToday],
                KeyCode::Char('r') => vec![Action::CityReset],
                KeyCode::Char(digit @ '1'..='9') => {
                    let index = digit as usize - '1' as usize;
                    match props.state.registry.names().nth(index) {
                        Some(city) => vec![Action::CitySelect(city.to_string())],
                        None => vec![],
                    }
                }
                KeyCode::F(5) => vec![Action::DaylightRefresh],
                KeyCode::Char('i') => vec![Action::UiInfoOpen],
                KeyCode::Char('d') => vec![Action::UiThemeToggle],
                KeyCode::Char('q') | KeyCode::Esc => vec![Action::Quit],
                _ => vec![],
            },
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: DashboardProps<'_>) {
        let state = props.state;
        let palette = state.theme.palette();
        let view = state.view();

        let loading_indicator = if state.is_loading {
            let spinner = SPINNERS[(state.tick_count as usize / 2) % SPINNERS.len()];
            format!(" {} ", spinner)
        } else {
            " ".to_string()
        };

        let outer_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.border))
            .title(format!(" {APP_TITLE}{loading_indicator}"))
            .title_style(Style::default().fg(palette.accent).bold())
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(palette.bg).fg(palette.fg));

        frame.render_widget(outer_block.clone(), area);
        let inner = outer_block.inner(area);

        let [body, help_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);
        let [sidebar_area, main_area] =
            Layout::horizontal([Constraint::Length(Sidebar::WIDTH), Constraint::Min(1)])
                .areas(body);
        let [values_area, map_area] = Layout::vertical([
            Constraint::Length(ValueBoxes::HEIGHT),
            Constraint::Min(3),
        ])
        .areas(main_area);

        Sidebar.render(
            frame,
            sidebar_area,
            SidebarProps {
                registry: &state.registry,
                selected_city: &state.selection.city,
                date: state.selection.date,
                theme: state.theme,
            },
        );

        ValueBoxes.render(
            frame,
            values_area,
            ValueBoxesProps {
                view: &view,
                palette,
                tick_count: state.tick_count,
            },
        );

        CityMap.render(
            frame,
            map_area,
            CityMapProps {
                map: view.map,
                city: &state.selection.city,
                palette,
            },
        );

        HelpBar.render(frame, help_area, HelpBarProps { palette });

        if state.show_info {
            InfoModal.render(frame, area, InfoModalProps { palette });
        }
    }
}
