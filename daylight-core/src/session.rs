//! Per-session context: the current selection plus the result cache
//!
//! Nothing here is global. Two sessions never share a selection or a memo.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::cache::{DaylightCache, Outcome, Selection};
use crate::city::CityRegistry;
use crate::client::SunClient;
use crate::error::DaylightError;
use crate::view::DashboardView;

pub struct Session<C> {
    selection: Selection,
    cache: Arc<DaylightCache<C>>,
}

impl<C: SunClient> Session<C> {
    /// Start on the registry's default city and the given date
    pub fn new(registry: CityRegistry, client: C, date: NaiveDate) -> Self {
        let selection = Selection::new(registry.default_city(), date);
        Self {
            selection,
            cache: Arc::new(DaylightCache::new(registry, client)),
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn cache(&self) -> &Arc<DaylightCache<C>> {
        &self.cache
    }

    /// Select a city by name. Unknown names are rejected and leave the
    /// selection untouched.
    pub fn select_city(&mut self, city: &str) -> Result<(), DaylightError> {
        self.cache.registry().lookup(city)?;
        if self.selection.city != city {
            debug!(from = %self.selection.city, to = city, "city selected");
            self.selection.city = city.to_string();
        }
        Ok(())
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selection.date = date;
    }

    /// Back to the default city; the date is kept
    pub fn reset_city(&mut self) {
        self.selection.city = self.cache.registry().default_city().to_string();
    }

    /// Outcome for the current selection (fetches at most once per selection)
    pub async fn outcome(&self) -> Outcome {
        self.cache.get(&self.selection).await
    }

    /// Pull the outcome and project every view from it
    pub async fn views(&self) -> DashboardView {
        let outcome = self.outcome().await;
        DashboardView::project(
            self.cache.registry(),
            &self.selection,
            Some((&self.selection, &outcome)),
        )
    }
}
