#![forbid(unsafe_code)]

//! Error types for tracker construction.
//!
//! Runtime capture and enhancement paths are infallible by design; only
//! configuration handling can fail.

use thiserror::Error;

/// Rejected or malformed tracker configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The redirect base URL was left empty.
    #[error("redirect base URL is empty")]
    MissingRedirectBase,

    /// The redirect base URL does not parse as an absolute URL.
    #[error("invalid redirect base URL `{url}`: {source}")]
    InvalidRedirectBase {
        url: String,
        source: url::ParseError,
    },

    /// The JSON configuration payload does not deserialize.
    #[error("malformed tracker configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
