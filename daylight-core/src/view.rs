//! View projections
//!
//! Each value box and the map is a pure function of the selection and the
//! cache's outcome. An outcome that belongs to a different selection than
//! the current one is never shown: it projects to `Pending`.

use chrono::{NaiveDate, NaiveTime, TimeDelta};

use crate::cache::{Outcome, Selection};
use crate::city::{CityRegistry, Coordinates};
use crate::error::DaylightError;
use crate::result::QueryResult;

/// Fixed map zoom, in slippy-map levels
pub const MAP_ZOOM: u8 = 12;

/// Number of zoom-level tiles the terminal viewport spans horizontally
const MAP_TILES_ACROSS: f64 = 64.0;

/// Content of one value box
#[derive(Clone, Debug, PartialEq)]
pub enum ValueView {
    Pending,
    Ready(String),
    Failed(DaylightError),
}

impl ValueView {
    pub fn is_failed(&self) -> bool {
        matches!(self, ValueView::Failed(_))
    }
}

/// Everything the dashboard shows, derived from one outcome
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardView {
    pub sunrise: ValueView,
    pub sunset: ValueView,
    pub day_length: ValueView,
    pub date: String,
    pub map: Option<MapView>,
}

impl DashboardView {
    /// Project the selection and the latest cached `(selection, outcome)` pair.
    pub fn project(
        registry: &CityRegistry,
        selection: &Selection,
        latest: Option<(&Selection, &Outcome)>,
    ) -> Self {
        let outcome = latest.and_then(|(key, outcome)| (key == selection).then_some(outcome));
        Self {
            sunrise: sunrise(outcome),
            sunset: sunset(outcome),
            day_length: day_length(outcome),
            date: date_selected(selection.date),
            map: MapView::for_city(registry, &selection.city),
        }
    }

    /// The three fetched boxes, in display order
    pub fn fetched(&self) -> [&ValueView; 3] {
        [&self.sunrise, &self.sunset, &self.day_length]
    }
}

fn project(outcome: Option<&Outcome>, field: impl FnOnce(&QueryResult) -> String) -> ValueView {
    match outcome {
        None => ValueView::Pending,
        Some(Ok(result)) => ValueView::Ready(field(result)),
        Some(Err(err)) => ValueView::Failed(err.clone()),
    }
}

pub fn sunrise(outcome: Option<&Outcome>) -> ValueView {
    project(outcome, |r| format_clock(r.sunrise))
}

pub fn sunset(outcome: Option<&Outcome>) -> ValueView {
    project(outcome, |r| format_clock(r.sunset))
}

pub fn day_length(outcome: Option<&Outcome>) -> ValueView {
    project(outcome, |r| format_hms(r.day_length))
}

/// `21 Jun 2024`
pub fn date_selected(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// `4:43:09 AM`, matching the provider's own format
pub fn format_clock(time: NaiveTime) -> String {
    time.format("%-I:%M:%S %p").to_string()
}

/// `16:38:32`
pub fn format_hms(delta: TimeDelta) -> String {
    let total = delta.num_seconds().max(0);
    format!("{}:{:02}:{:02}", total / 3600, (total / 60) % 60, total % 60)
}

/// Map viewport for the selected city
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
}

impl MapView {
    /// `None` if the city is unknown; the map is independent of the fetch.
    pub fn for_city(registry: &CityRegistry, city: &str) -> Option<Self> {
        registry.lookup(city).ok().map(|center| Self {
            center,
            zoom: MAP_ZOOM,
        })
    }

    /// Longitude bounds, clamped to the globe
    pub fn x_bounds(&self) -> [f64; 2] {
        let half = self.half_width();
        [
            (self.center.lng - half).max(-180.0),
            (self.center.lng + half).min(180.0),
        ]
    }

    /// Latitude bounds, clamped to the globe
    pub fn y_bounds(&self) -> [f64; 2] {
        // Terminal cells are about twice as tall as wide
        let half = self.half_width() / 2.0;
        [
            (self.center.lat - half).max(-90.0),
            (self.center.lat + half).min(90.0),
        ]
    }

    fn half_width(&self) -> f64 {
        let tile = 360.0 / f64::from(1u32 << self.zoom.min(20));
        tile * MAP_TILES_ACROSS / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::london_solstice;
    use std::sync::Arc;

    fn solstice() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()
    }

    #[test]
    fn test_project_ready() {
        let registry = CityRegistry::builtin();
        let selection = Selection::new("London", solstice());
        let outcome: Outcome = Ok(Arc::new(london_solstice()));

        let view = DashboardView::project(&registry, &selection, Some((&selection, &outcome)));

        assert_eq!(view.sunrise, ValueView::Ready("4:43:09 AM".into()));
        assert_eq!(view.sunset, ValueView::Ready("9:21:41 PM".into()));
        assert_eq!(view.day_length, ValueView::Ready("16:38:32".into()));
        assert_eq!(view.date, "21 Jun 2024");
        assert_eq!(
            view.map.map(|m| m.center),
            Some(Coordinates::new(51.507222, -0.1275))
        );
    }

    #[test]
    fn test_project_error_reaches_every_fetched_box() {
        let registry = CityRegistry::builtin();
        let selection = Selection::new("Belfast", solstice());
        let err = DaylightError::upstream(Some(500), "", "non-success status");
        let outcome: Outcome = Err(err.clone());

        let view = DashboardView::project(&registry, &selection, Some((&selection, &outcome)));

        for value in view.fetched() {
            assert_eq!(value, &ValueView::Failed(err.clone()));
        }
        assert_eq!(view.date, "21 Jun 2024");
        assert!(view.map.is_some());
    }

    #[test]
    fn test_outcome_for_other_selection_is_pending() {
        let registry = CityRegistry::builtin();
        let previous = Selection::new("London", solstice());
        let current = Selection::new("Cardiff", solstice());
        let outcome: Outcome = Ok(Arc::new(london_solstice()));

        let view = DashboardView::project(&registry, &current, Some((&previous, &outcome)));

        for value in view.fetched() {
            assert_eq!(value, &ValueView::Pending);
        }
    }

    #[test]
    fn test_map_bounds_center_on_city() {
        let map = MapView::for_city(&CityRegistry::builtin(), "Null Island").unwrap();
        let [west, east] = map.x_bounds();
        let [south, north] = map.y_bounds();
        assert_eq!(map.zoom, MAP_ZOOM);
        assert!((west + east).abs() < 1e-9);
        assert!((south + north).abs() < 1e-9);
        assert!(east > 0.0 && north > 0.0);
    }

    #[test]
    fn test_format_hms_pads() {
        assert_eq!(format_hms(TimeDelta::seconds(3_601)), "1:00:01");
        assert_eq!(format_hms(TimeDelta::seconds(-5)), "0:00:00");
    }
}
