//! Actions
//!
//! Naming convention: the prefix is the category (`City*`, `Date*`,
//! `Daylight*`, `Ui*`), `Did` marks the result of async work, and the verb
//! comes last.

use daylight_core::{Outcome, Selection};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq)]
pub enum Action {
    // ===== City category =====
    /// Select a city by registry name
    CitySelect(String),

    /// Next / previous city in registry order
    CityNext,
    CityPrev,

    /// Back to the registry default; the date is kept
    CityReset,

    // ===== Date category =====
    /// Move the date by a number of days
    DateStep(i64),

    DateToday,

    // ===== Daylight category =====
    /// Intent: read the cache for the current selection
    DaylightFetch,

    /// Intent: drop the cached outcome and fetch again
    DaylightRefresh,

    /// Result: outcome for the selection it was fetched for
    DaylightDidLoad(Selection, Outcome),

    // ===== UI category =====
    UiInfoOpen,
    UiInfoClose,
    UiThemeToggle,

    // ===== Uncategorized (global) =====
    /// Periodic tick for loading animation
    Tick,

    Quit,
}
