//! Derived result cache
//!
//! Composes the registry, a `SunClient` and a single-flight [`Memo`] keyed by
//! the current [`Selection`]. Readers pull: nothing is fetched until someone
//! asks for the outcome of a selection.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::city::CityRegistry;
use crate::client::SunClient;
use crate::error::DaylightError;
use crate::memo::Memo;
use crate::result::QueryResult;

/// What the user picked: the memo key
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Selection {
    pub city: String,
    pub date: NaiveDate,
}

impl Selection {
    pub fn new(city: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            city: city.into(),
            date,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.city, self.date)
    }
}

/// Stored result of one computation, success or failure
pub type Outcome = Result<Arc<QueryResult>, DaylightError>;

pub struct DaylightCache<C> {
    registry: CityRegistry,
    client: C,
    memo: Memo<Selection, Outcome>,
}

impl<C: SunClient> DaylightCache<C> {
    pub fn new(registry: CityRegistry, client: C) -> Self {
        Self {
            registry,
            client,
            memo: Memo::new(),
        }
    }

    pub fn registry(&self) -> &CityRegistry {
        &self.registry
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Outcome for `selection`, fetching only if it differs from the last one.
    ///
    /// Unknown cities fail before the memo is touched, so they never cost a
    /// request and never evict the current result.
    pub async fn get(&self, selection: &Selection) -> Outcome {
        let coords = self.registry.lookup(&selection.city)?;
        self.memo
            .get_or_compute(selection.clone(), || async {
                info!(%selection, "fetching daylight data");
                let outcome = self.client.fetch(coords, selection.date).await.map(Arc::new);
                debug!(%selection, ok = outcome.is_ok(), "daylight fetch finished");
                outcome
            })
            .await
    }

    /// Drop whatever is stored and fetch again
    pub async fn refresh(&self, selection: &Selection) -> Outcome {
        self.memo.invalidate().await;
        self.get(selection).await
    }

    /// The stored selection and outcome, if any
    pub async fn current(&self) -> Option<(Selection, Outcome)> {
        self.memo.peek().await
    }
}
