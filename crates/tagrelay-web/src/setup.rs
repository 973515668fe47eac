#![forbid(unsafe_code)]

//! Configuration resolution: explicit JSON beats the page-global blob.

use tagrelay_core::{ConfigError, TrackerConfig};

/// Resolve the tracker configuration from, in order: an explicit JSON string
/// passed by the caller, the page-global `TAGRELAY_CONFIG` payload, or the
/// defaults (which fail validation later for lack of a redirect base).
pub(crate) fn resolve_config(
    explicit: Option<&str>,
    page_global: Option<String>,
) -> Result<TrackerConfig, ConfigError> {
    match (explicit, page_global) {
        (Some(json), _) => TrackerConfig::from_json(json),
        (None, Some(json)) => TrackerConfig::from_json(&json),
        (None, None) => Ok(TrackerConfig::default()),
    }
}
