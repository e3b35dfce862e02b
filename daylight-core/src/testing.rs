//! Test utilities: canned results and a call-counting client
//!
//! `CountingClient` stands in for the HTTP client wherever a test needs to
//! assert how many requests the pipeline made. Its response can be swapped
//! between calls to script a provider that starts failing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::NaiveDate;

use crate::city::Coordinates;
use crate::client::SunClient;
use crate::error::DaylightError;
use crate::result::{parse_response, QueryResult};

/// Recorded sunrisesunset.io response for London, 2024-06-21
pub const LONDON_SOLSTICE_JSON: &str = include_str!("../tests/fixtures/london_solstice.json");

/// London on the 2024 summer solstice, parsed from the recorded response.
///
/// # Panics
///
/// Panics if the bundled fixture no longer parses.
pub fn london_solstice() -> QueryResult {
    parse_response(200, LONDON_SOLSTICE_JSON)
        .unwrap_or_else(|e| panic!("bundled fixture must parse: {e}"))
}

/// A `SunClient` that returns a canned response and counts calls
pub struct CountingClient {
    response: Mutex<Result<QueryResult, DaylightError>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<(Coordinates, NaiveDate)>>,
}

impl CountingClient {
    pub fn ok(result: QueryResult) -> Self {
        Self::new(Ok(result))
    }

    pub fn failing(error: DaylightError) -> Self {
        Self::new(Err(error))
    }

    pub fn new(response: Result<QueryResult, DaylightError>) -> Self {
        Self {
            response: Mutex::new(response),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every later `fetch` with `response`
    pub fn respond_with(&self, response: Result<QueryResult, DaylightError>) {
        match self.response.lock() {
            Ok(mut current) => *current = response,
            Err(poisoned) => *poisoned.into_inner() = response,
        }
    }

    /// Number of `fetch` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Arguments of every `fetch` call, oldest first
    pub fn requests(&self) -> Vec<(Coordinates, NaiveDate)> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl SunClient for CountingClient {
    async fn fetch(
        &self,
        coords: Coordinates,
        date: NaiveDate,
    ) -> Result<QueryResult, DaylightError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((coords, date));
        }
        match self.response.lock() {
            Ok(response) => response.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
