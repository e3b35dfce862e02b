//! Terminal dashboard for sunrise, sunset and day length
//!
//! The app follows a unidirectional flow:
//!
//! 1. Key event -> `Dashboard::handle_event` -> actions
//! 2. Actions -> `reducer` -> state change + effects
//! 3. Effects -> keyed tasks that read the daylight cache
//! 4. Results come back as `DaylightDidLoad` actions
//!
//! Store, task manager, subscriptions and the `Component` trait come from
//! `tui-dispatch`; [`app::DaylightApp`] wires them into one loop.
//!
//! The fetch pipeline itself lives in `daylight-core`.

pub mod action;
pub mod app;
pub mod components;
pub mod effect;
pub mod reducer;
pub mod state;
