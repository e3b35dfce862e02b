//! Effects - side effects declared by the reducer
//!
//! The reducer stays pure: it returns a `DispatchResult` saying whether
//! state changed and which effects the main loop should run.

use std::sync::Arc;

use daylight_core::{DaylightCache, Selection, SunClient};
use tui_dispatch::TaskManager;

use crate::action::Action;

/// Task key shared by every cache read
pub const DAYLIGHT_TASK: &str = "daylight";

/// Side effects that can be triggered by actions
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Read the result cache for this selection (fetches on a miss)
    Fetch(Selection),

    /// Invalidate the cache, then fetch this selection
    Refresh(Selection),
}

/// Handle effects by spawning tasks
///
/// Both effects share one task key, so a newer selection aborts the fetch
/// for an older one.
pub fn handle_effect<C: SunClient>(
    cache: &Arc<DaylightCache<C>>,
    effect: Effect,
    tasks: &mut TaskManager<Action>,
) {
    let cache = Arc::clone(cache);
    match effect {
        Effect::Fetch(selection) => {
            tasks.spawn(DAYLIGHT_TASK, async move {
                let outcome = cache.get(&selection).await;
                Action::DaylightDidLoad(selection, outcome)
            });
        }
        Effect::Refresh(selection) => {
            tasks.spawn(DAYLIGHT_TASK, async move {
                let outcome = cache.refresh(&selection).await;
                Action::DaylightDidLoad(selection, outcome)
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use daylight_core::testing::{london_solstice, CountingClient};
    use daylight_core::CityRegistry;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_newer_fetch_replaces_older() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);
        let cache = Arc::new(DaylightCache::new(
            CityRegistry::builtin(),
            CountingClient::ok(london_solstice()),
        ));
        let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();

        handle_effect(&cache, Effect::Fetch(Selection::new("London", date)), &mut tasks);
        handle_effect(&cache, Effect::Fetch(Selection::new("Cardiff", date)), &mut tasks);

        match rx.recv().await {
            Some(Action::DaylightDidLoad(selection, outcome)) => {
                assert_eq!(selection, Selection::new("Cardiff", date));
                assert!(outcome.is_ok());
            }
            other => panic!("unexpected action: {other:?}"),
        }
        assert!(rx.try_recv().is_err());
        assert_eq!(tasks.len(), 1);
    }
}
