//! End-to-end pipeline behaviour with a counting client
//!
//! Selection changes -> cache -> views, asserting request counts at each step.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use daylight_core::testing::{london_solstice, CountingClient};
use daylight_core::{
    CityRegistry, Coordinates, DaylightCache, DaylightError, Selection, Session, ValueView,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_no_change_no_extra_fetch() {
    let session = Session::new(
        CityRegistry::builtin(),
        CountingClient::ok(london_solstice()),
        date(2024, 6, 21),
    );

    session.outcome().await.unwrap();
    session.outcome().await.unwrap();
    session.views().await;

    assert_eq!(session.cache().client().calls(), 1);
}

#[tokio::test]
async fn test_date_only_change_fetches_exactly_once() {
    let mut session = Session::new(
        CityRegistry::builtin(),
        CountingClient::ok(london_solstice()),
        date(2024, 6, 21),
    );
    session.views().await;

    session.select_date(date(2024, 6, 22));
    session.views().await;
    session.views().await;

    let client = session.cache().client();
    assert_eq!(client.calls(), 2);
    let dates: Vec<_> = client.requests().into_iter().map(|(_, d)| d).collect();
    assert_eq!(dates, vec![date(2024, 6, 21), date(2024, 6, 22)]);
}

#[tokio::test]
async fn test_null_island_lookup_and_fetch() {
    let registry = CityRegistry::builtin();
    assert_eq!(registry.lookup("Null Island"), Ok(Coordinates::new(0.0, 0.0)));

    let cache = DaylightCache::new(registry, CountingClient::ok(london_solstice()));
    let outcome = cache
        .get(&Selection::new("Null Island", date(2024, 3, 20)))
        .await;

    assert!(!matches!(outcome, Err(DaylightError::NotFound(_))));
    assert_eq!(
        cache.client().requests(),
        vec![(Coordinates::new(0.0, 0.0), date(2024, 3, 20))]
    );
}

#[tokio::test]
async fn test_upstream_failure_reaches_all_value_boxes() {
    let err = DaylightError::upstream(Some(503), "maintenance", "non-success status");
    let mut session = Session::new(
        CityRegistry::builtin(),
        CountingClient::failing(err.clone()),
        date(2024, 6, 21),
    );
    session.select_city("Cardiff").unwrap();

    let view = session.views().await;

    for value in view.fetched() {
        assert_eq!(value, &ValueView::Failed(err.clone()));
    }
    assert_eq!(view.date, "21 Jun 2024");
    assert!(view.map.is_some(), "map does not depend on the fetch");
}

#[tokio::test]
async fn test_london_solstice_sanity_bounds() {
    let session = Session::new(
        CityRegistry::builtin(),
        CountingClient::ok(london_solstice()),
        date(2024, 6, 21),
    );
    assert_eq!(session.selection(), &Selection::new("London", date(2024, 6, 21)));

    let result = session.outcome().await.unwrap();

    assert!(result.sunrise < NaiveTime::from_hms_opt(5, 0, 0).unwrap());
    assert!(result.sunset > NaiveTime::from_hms_opt(21, 0, 0).unwrap());
    assert!(result.day_length > TimeDelta::hours(16));
}

#[tokio::test]
async fn test_views_observe_same_instance() {
    let cache = Arc::new(DaylightCache::new(
        CityRegistry::builtin(),
        CountingClient::ok(london_solstice()),
    ));
    let selection = Selection::new("London", date(2024, 6, 21));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let selection = selection.clone();
            tokio::spawn(async move { cache.get(&selection).await })
        })
        .collect();

    let mut results = Vec::new();
    for reader in readers {
        results.push(reader.await.unwrap().unwrap());
    }

    assert!(results.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    assert_eq!(cache.client().calls(), 1);
}
