//! Error types for the router.

use thiserror::Error;

/// Errors raised while registering routes.
///
/// Request-time misses are not errors; they are reported through
/// [`RouteMatch`](crate::router::RouteMatch) and [`Lookup`](crate::router::Lookup).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The method token is empty or contains characters outside the RFC 7230 token set.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// A wildcard segment is followed by further segments.
    #[error("Wildcard must be the last segment in pattern: {0}")]
    WildcardNotLast(String),

    /// A parameter and a wildcard were requested at the same tree position.
    #[error("Conflicting parameter and wildcard at the same position in pattern: {0}")]
    ConflictingWildcard(String),

    /// A `:` segment without a name.
    #[error("Empty parameter name in pattern: {0}")]
    EmptyParamName(String),

    /// Error parsing a JSON configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}
