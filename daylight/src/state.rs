//! Application state - single source of truth
//!
//! Components borrow `&AppState` as props; only the reducer mutates it.
//! The fetched outcome is stored together with the selection it was fetched
//! for, so a late result for an old selection can never be shown.

use chrono::NaiveDate;
use daylight_core::{CityRegistry, DashboardView, Outcome, Selection};
use ratatui::style::Color;

/// Animation frame period for the loading spinner
pub const LOADING_ANIM_TICK_MS: u64 = 120;

/// Colour scheme, toggled at runtime
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Light => Palette {
                bg: Color::Rgb(250, 248, 240),
                fg: Color::Rgb(40, 40, 48),
                muted: Color::Rgb(120, 120, 130),
                accent: Color::Rgb(214, 120, 0),
                border: Color::Rgb(190, 180, 160),
                land: Color::Rgb(90, 140, 90),
                error: Color::Rgb(190, 30, 30),
            },
            Theme::Dark => Palette {
                bg: Color::Rgb(24, 24, 32),
                fg: Color::Rgb(225, 225, 235),
                muted: Color::DarkGray,
                accent: Color::Rgb(255, 196, 0),
                border: Color::Rgb(80, 80, 100),
                land: Color::Rgb(110, 170, 120),
                error: Color::LightRed,
            },
        }
    }
}

/// Colours for one theme
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub land: Color,
    pub error: Color,
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub registry: CityRegistry,

    /// Current city and date
    pub selection: Selection,

    /// Last delivered fetch, keyed by the selection it answers
    pub latest: Option<(Selection, Outcome)>,

    /// A fetch for `selection` is in flight
    pub is_loading: bool,

    /// Info panel visibility
    pub show_info: bool,

    pub theme: Theme,

    /// Animation frame counter (for loading spinner)
    pub tick_count: u32,

    /// Date `t` jumps back to
    pub today: NaiveDate,
}

impl AppState {
    pub fn new(registry: CityRegistry, selection: Selection, today: NaiveDate) -> Self {
        Self {
            registry,
            selection,
            latest: None,
            is_loading: false,
            show_info: false,
            theme: Theme::default(),
            tick_count: 0,
            today,
        }
    }

    /// Every view, projected from the current selection and latest outcome
    pub fn view(&self) -> DashboardView {
        DashboardView::project(
            &self.registry,
            &self.selection,
            self.latest.as_ref().map(|(key, outcome)| (key, outcome)),
        )
    }

    /// Outcome for the current selection, if it has arrived
    pub fn current_outcome(&self) -> Option<&Outcome> {
        self.latest
            .as_ref()
            .filter(|(key, _)| *key == self.selection)
            .map(|(_, outcome)| outcome)
    }
}

impl Default for AppState {
    /// London on the 2024 summer solstice; fixed so renders are reproducible
    fn default() -> Self {
        let registry = CityRegistry::builtin();
        let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap_or(NaiveDate::MIN);
        Self::new(
            registry,
            Selection::new(registry.default_city(), date),
            date,
        )
    }
}
