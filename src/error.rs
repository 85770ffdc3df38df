//! Error types for oracle calls, plan input and configuration.

use thiserror::Error;

/// Failure of a single routing oracle call.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: String, message: String },

    #[error("no route found")]
    NoRoute,

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Input rejected before any oracle call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("at least one delivery address is required")]
    NoStops,

    #[error("{count} delivery addresses given, at most {max} are supported")]
    TooManyStops { count: usize, max: usize },

    #[error("depot address is blank")]
    BlankDepot,

    #[error("delivery address {position} is blank")]
    BlankAddress { position: usize },

    #[error("business hours {first}..={last} are not a valid range")]
    InvalidHours { first: u32, last: u32 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}
