//! Core of the daylight dashboard
//!
//! The fetch pipeline, leaves first:
//!
//! - **City registry**: fixed name -> coordinates table
//! - **Sun client**: one HTTP request per (coordinates, date)
//! - **Result cache**: single-flight memo keyed by the current selection
//! - **Views**: pure projections of the selection and the cached outcome
//!
//! A change of city or date costs at most one request, no matter how many
//! views read the result.
//!
//! # Example
//!
//! ```ignore
//! use daylight_core::{CityRegistry, HttpSunClient, Session};
//!
//! let mut session = Session::new(CityRegistry::builtin(), HttpSunClient::default(), today);
//! session.select_city("Edinburgh")?;
//!
//! let view = session.views().await;   // one request
//! let again = session.views().await;  // served from the memo
//! ```

pub mod cache;
pub mod city;
pub mod client;
pub mod error;
pub mod memo;
pub mod result;
pub mod session;
pub mod testing;
pub mod view;

pub use cache::{DaylightCache, Outcome, Selection};
pub use city::{City, CityRegistry, Coordinates, DEFAULT_CITY};
pub use client::{ClientConfig, HttpSunClient, SunClient, DEFAULT_ENDPOINT};
pub use error::DaylightError;
pub use memo::Memo;
pub use result::{parse_response, QueryResult};
pub use session::Session;
pub use view::{DashboardView, MapView, ValueView, MAP_ZOOM};
