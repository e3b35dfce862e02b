//! Error taxonomy for the fetch pipeline
//!
//! Errors are `Clone` so the result cache can hand the same failure to every
//! reader, and so result actions can carry them.

use thiserror::Error;

/// Everything that can go wrong between a city selection and a `QueryResult`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DaylightError {
    /// City name is not in the registry
    #[error("city not found: {0}")]
    NotFound(String),

    /// Network unreachable, connection reset, timeout
    #[error("request failed: {0}")]
    Transport(String),

    /// Non-success status or a body that does not match the schema
    #[error("upstream error{}: {reason}", status_suffix(.status))]
    Upstream {
        status: Option<u16>,
        body: String,
        reason: String,
    },
}

impl DaylightError {
    pub fn upstream(status: Option<u16>, body: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
            reason: reason.into(),
        }
    }

    /// Short label for value boxes
    pub fn label(&self) -> &'static str {
        match self {
            DaylightError::NotFound(_) => "Unknown city",
            DaylightError::Transport(_) => "Offline",
            DaylightError::Upstream { .. } => "API error",
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {code})"),
        None => String::new(),
    }
}

impl From<reqwest::Error> for DaylightError {
    fn from(err: reqwest::Error) -> Self {
        DaylightError::Transport(err.to_string())
    }
}
