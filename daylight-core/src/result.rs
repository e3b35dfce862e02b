//! Typed sunrise/sunset record and the response schema it is parsed from
//!
//! The provider has been observed both nesting its fields under `results`
//! and returning them at the top level; both shapes are accepted. Required
//! fields that are absent or unparsable fail with `Upstream`, never a
//! silent default.

use chrono::{NaiveTime, TimeDelta};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::DaylightError;

/// One fetched day. Immutable once built, shared behind an `Arc`.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryResult {
    pub sunrise: NaiveTime,
    pub sunset: NaiveTime,
    pub day_length: TimeDelta,
    /// Full decoded result object, including fields not modelled here
    pub raw: Map<String, Value>,
}

impl QueryResult {
    /// IANA zone name reported by the provider, if any
    pub fn timezone(&self) -> Option<&str> {
        self.raw.get("timezone").and_then(Value::as_str)
    }

    /// Offset from UTC in minutes, if reported
    pub fn utc_offset(&self) -> Option<i64> {
        self.raw.get("utc_offset").and_then(Value::as_i64)
    }

    /// `sunset - sunrise`, for cross-checking the provider's `day_length`
    pub fn computed_day_length(&self) -> TimeDelta {
        let delta = self.sunset.signed_duration_since(self.sunrise);
        if delta < TimeDelta::zero() {
            delta + TimeDelta::days(1)
        } else {
            delta
        }
    }
}

#[derive(Debug, Deserialize)]
struct SunFields {
    sunrise: String,
    sunset: String,
    day_length: String,
}

/// Parse an HTTP status and body into a `QueryResult`.
pub fn parse_response(status: u16, body: &str) -> Result<QueryResult, DaylightError> {
    if !(200..300).contains(&status) {
        return Err(DaylightError::upstream(
            Some(status),
            body,
            "non-success status",
        ));
    }

    let upstream = |reason: String| DaylightError::upstream(Some(status), body, reason);

    let value: Value = serde_json::from_str(body).map_err(|e| upstream(e.to_string()))?;
    let Value::Object(mut top) = value else {
        return Err(upstream("body is not a JSON object".into()));
    };

    if let Some(provider_status) = top.get("status").and_then(Value::as_str) {
        if provider_status != "OK" {
            return Err(upstream(format!("provider status {provider_status}")));
        }
    }

    let fields = match top.remove("results") {
        Some(Value::Object(results)) => results,
        Some(other) => {
            return Err(upstream(format!("`results` is not an object: {other}")));
        }
        None => top,
    };

    let sun = SunFields::deserialize(Value::Object(fields.clone()))
        .map_err(|e| upstream(e.to_string()))?;

    Ok(QueryResult {
        sunrise: parse_clock(&sun.sunrise).map_err(upstream)?,
        sunset: parse_clock(&sun.sunset).map_err(upstream)?,
        day_length: parse_hms(&sun.day_length).map_err(upstream)?,
        raw: fields,
    })
}

/// Accepts `4:43:09 AM`, `04:43:09` and `04:43`.
pub fn parse_clock(text: &str) -> Result<NaiveTime, String> {
    const FORMATS: [&str; 4] = ["%I:%M:%S %p", "%I:%M %p", "%H:%M:%S", "%H:%M"];
    let text = text.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(text, fmt).ok())
        .ok_or_else(|| format!("unrecognised time of day {text:?}"))
}

/// Parses `H:MM:SS`. Hours are not capped at 23.
pub fn parse_hms(text: &str) -> Result<TimeDelta, String> {
    let invalid = || format!("unrecognised duration {text:?}");
    let mut parts = text.trim().split(':');
    let mut next = || -> Result<i64, String> {
        parts
            .next()
            .and_then(|part| part.parse::<i64>().ok())
            .filter(|n| *n >= 0)
            .ok_or_else(invalid)
    };
    let (hours, minutes, seconds) = (next()?, next()?, next()?);
    if parts.next().is_some() || minutes > 59 || seconds > 59 {
        return Err(invalid());
    }
    Ok(TimeDelta::seconds(hours * 3600 + minutes * 60 + seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: &str = include_str!("../tests/fixtures/london_solstice.json");
    const FLAT: &str = include_str!("../tests/fixtures/null_island_flat.json");

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_parse_nested_results() {
        let result = parse_response(200, LONDON).unwrap();
        assert_eq!(result.sunrise, hms(4, 43, 9));
        assert_eq!(result.sunset, hms(21, 21, 41));
        assert_eq!(result.day_length, TimeDelta::seconds(16 * 3600 + 38 * 60 + 32));
        assert_eq!(result.timezone(), Some("Europe/London"));
        assert_eq!(result.utc_offset(), Some(60));
        assert_eq!(
            result.raw.get("golden_hour").and_then(Value::as_str),
            Some("8:30:06 PM")
        );
    }

    #[test]
    fn test_parse_top_level_fields() {
        let result = parse_response(200, FLAT).unwrap();
        assert_eq!(result.sunrise, hms(6, 4, 52));
        assert_eq!(result.sunset, hms(18, 11, 27));
        assert_eq!(result.computed_day_length(), result.day_length);
    }

    #[test]
    fn test_day_length_matches_sunset_minus_sunrise() {
        let result = parse_response(200, LONDON).unwrap();
        let drift = (result.computed_day_length() - result.day_length).num_seconds();
        assert!(drift.abs() <= 60, "drift was {drift}s");
    }

    #[test]
    fn test_non_success_status_is_upstream() {
        let err = parse_response(502, "bad gateway").unwrap_err();
        assert_eq!(
            err,
            DaylightError::upstream(Some(502), "bad gateway", "non-success status")
        );
    }

    #[test]
    fn test_provider_status_not_ok() {
        let body = r#"{"results": "", "status": "INVALID_REQUEST"}"#;
        match parse_response(200, body) {
            Err(DaylightError::Upstream { reason, body: raw, .. }) => {
                assert_eq!(reason, "provider status INVALID_REQUEST");
                assert_eq!(raw, body);
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_field_is_upstream_not_default() {
        let body = r#"{"results": {"sunrise": "4:43:09 AM", "day_length": "16:38:32"}, "status": "OK"}"#;
        match parse_response(200, body) {
            Err(DaylightError::Upstream { reason, .. }) => assert!(reason.contains("sunset")),
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_is_upstream() {
        assert!(matches!(
            parse_response(200, "<html>"),
            Err(DaylightError::Upstream { status: Some(200), .. })
        ));
    }

    #[test]
    fn test_parse_clock_forms() {
        assert_eq!(parse_clock("4:43:09 AM"), Ok(hms(4, 43, 9)));
        assert_eq!(parse_clock("9:21:41 PM"), Ok(hms(21, 21, 41)));
        assert_eq!(parse_clock("12:00:00 AM"), Ok(hms(0, 0, 0)));
        assert_eq!(parse_clock("21:21"), Ok(hms(21, 21, 0)));
        assert!(parse_clock("dawn").is_err());
    }

    #[test]
    fn test_parse_hms() {
        assert_eq!(parse_hms("16:38:32"), Ok(TimeDelta::seconds(59_912)));
        assert_eq!(parse_hms("0:00:00"), Ok(TimeDelta::zero()));
        assert!(parse_hms("16:38").is_err());
        assert!(parse_hms("16:61:00").is_err());
        assert!(parse_hms("1:2:3:4").is_err());
    }
}
