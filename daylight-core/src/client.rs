//! Sunrise/sunset HTTP client
//!
//! One `fetch` is one outbound request. The client never retries and never
//! caches; both are the caller's business.

use std::future::Future;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::city::Coordinates;
use crate::error::DaylightError;
use crate::result::{parse_response, QueryResult};

/// Fixed provider endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.sunrisesunset.io/json";

/// Anything that can answer "when does the sun rise and set here, on this day?"
///
/// The HTTP client is the production implementation; tests substitute
/// counting fakes.
pub trait SunClient: Send + Sync + 'static {
    fn fetch(
        &self,
        coords: Coordinates,
        date: NaiveDate,
    ) -> impl Future<Output = Result<QueryResult, DaylightError>> + Send;
}

/// Client configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// `SunClient` backed by the sunrisesunset.io JSON API
#[derive(Clone, Debug)]
pub struct HttpSunClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpSunClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Query parameters in the order the provider documents them
    pub fn query_params(coords: Coordinates, date: NaiveDate) -> [(&'static str, String); 3] {
        [
            ("lat", coords.lat.to_string()),
            ("lng", coords.lng.to_string()),
            ("date", date.format("%Y-%m-%d").to_string()),
        ]
    }
}

impl Default for HttpSunClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl SunClient for HttpSunClient {
    async fn fetch(
        &self,
        coords: Coordinates,
        date: NaiveDate,
    ) -> Result<QueryResult, DaylightError> {
        let params = Self::query_params(coords, date);
        debug!(endpoint = %self.config.endpoint, ?params, "requesting daylight data");

        let response = self
            .http
            .post(&self.config.endpoint)
            .query(&params)
            .send()
            .await
            .inspect_err(|e| warn!(error = %e, "daylight request failed"))?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        parse_response(status, &body)
            .inspect_err(|e| warn!(status, error = %e, "daylight response rejected"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_use_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let params = HttpSunClient::query_params(Coordinates::new(51.507222, -0.1275), date);
        assert_eq!(
            params,
            [
                ("lat", "51.507222".to_string()),
                ("lng", "-0.1275".to_string()),
                ("date", "2024-06-21".to_string()),
            ]
        );
    }

    #[test]
    fn test_default_endpoint() {
        let client = HttpSunClient::default();
        assert_eq!(client.endpoint(), "https://api.sunrisesunset.io/json");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Port 9 (discard) is closed on any sane test host
        let client = HttpSunClient::new(ClientConfig {
            endpoint: "http://127.0.0.1:9/json".into(),
        });
        let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let err = client
            .fetch(Coordinates::new(0.0, 0.0), date)
            .await
            .unwrap_err();
        assert!(matches!(err, DaylightError::Transport(_)), "got {err:?}");
    }
}
