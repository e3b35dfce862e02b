//! Reducer - (state, action) -> (changed, effects)
//!
//! All state mutations happen here. A selection change always emits exactly
//! one `Fetch` effect; an action that leaves the selection as it was emits
//! none, so the cache is never asked twice for the same answer.

use chrono::{NaiveDate, TimeDelta};
use tracing::{debug, warn};
use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== City actions =====
        Action::CitySelect(city) => {
            if !state.registry.contains(&city) {
                warn!(%city, "ignoring unknown city");
                return DispatchResult::unchanged();
            }
            select_city(state, city)
        }

        Action::CityNext => {
            let city = state.registry.next(&state.selection.city).to_string();
            select_city(state, city)
        }

        Action::CityPrev => {
            let city = state.registry.prev(&state.selection.city).to_string();
            select_city(state, city)
        }

        Action::CityReset => {
            let city = state.registry.default_city().to_string();
            select_city(state, city)
        }

        // ===== Date actions =====
        Action::DateStep(days) => match state
            .selection
            .date
            .checked_add_signed(TimeDelta::days(days))
        {
            Some(date) => select_date(state, date),
            None => DispatchResult::unchanged(),
        },

        Action::DateToday => {
            let today = state.today;
            select_date(state, today)
        }

        // ===== Daylight actions =====
        Action::DaylightFetch => {
            state.is_loading = true;
            DispatchResult::changed_with(Effect::Fetch(state.selection.clone()))
        }

        Action::DaylightRefresh => {
            state.is_loading = true;
            DispatchResult::changed_with(Effect::Refresh(state.selection.clone()))
        }

        Action::DaylightDidLoad(selection, outcome) => {
            if selection != state.selection {
                debug!(%selection, current = %state.selection, "dropping stale result");
                return DispatchResult::unchanged();
            }
            state.latest = Some((selection, outcome));
            state.is_loading = false;
            DispatchResult::changed()
        }

        // ===== UI actions =====
        Action::UiInfoOpen => {
            let changed = !state.show_info;
            state.show_info = true;
            changed_if(changed)
        }

        Action::UiInfoClose => {
            let changed = state.show_info;
            state.show_info = false;
            changed_if(changed)
        }

        Action::UiThemeToggle => {
            state.theme = state.theme.toggle();
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            // only re-render if loading (for spinner animation)
            changed_if(state.is_loading)
        }

        // Quit is handled in main loop, not here
        Action::Quit => DispatchResult::unchanged(),
    }
}

fn changed_if(changed: bool) -> DispatchResult<Effect> {
    if changed {
        DispatchResult::changed()
    } else {
        DispatchResult::unchanged()
    }
}

fn select_city(state: &mut AppState, city: String) -> DispatchResult<Effect> {
    if state.selection.city == city {
        return DispatchResult::unchanged();
    }
    state.selection.city = city;
    begin_fetch(state)
}

fn select_date(state: &mut AppState, date: NaiveDate) -> DispatchResult<Effect> {
    if state.selection.date == date {
        return DispatchResult::unchanged();
    }
    state.selection.date = date;
    begin_fetch(state)
}

fn begin_fetch(state: &mut AppState) -> DispatchResult<Effect> {
    state.is_loading = true;
    DispatchResult::changed_with(Effect::Fetch(state.selection.clone()))
}
