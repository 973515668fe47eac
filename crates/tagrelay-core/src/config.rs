#![forbid(unsafe_code)]

//! Static tracker configuration.
//!
//! Configuration is read once at startup (inline JSON or a page global) and
//! then treated as immutable: [`TrackerConfig`] is validated into a
//! [`crate::Tracker`] and cloned into whatever closures need it, so no page
//! script can mutate a live tracker's behavior.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Query parameters recognized as tracking fields, in capture order.
///
/// Standard UTM tags, the major ad networks' click identifiers, generic
/// source/medium/campaign aliases, and the plan/promo/location fields used by
/// the sales pages.
pub const DEFAULT_TRACK_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_content",
    "utm_term",
    "gclid",
    "gbraid",
    "wbraid",
    "gclsrc",
    "fbclid",
    "fbp",
    "fbc",
    "ttclid",
    "msclkid",
    "referrer",
    "ref",
    "source",
    "medium",
    "campaign",
    "plano",
    "velocidade",
    "promo",
    "desconto",
    "cidade",
    "bairro",
];

/// Host fragments identifying outbound messaging links.
pub const DEFAULT_MESSAGING_HOSTS: &[&str] = &["whatsapp.com", "wa.me", "api.whatsapp.com"];

/// Tracker configuration, statically set at load time.
///
/// Unknown JSON fields are ignored so a page can ship one config blob for
/// several tracker versions. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Base URL of the redirect endpoint that receives the attribution data.
    /// Required; validation rejects an empty or unparseable value.
    pub redirect_base_url: String,
    /// Intercept messaging links automatically. The explicit opt-in marker
    /// class works regardless of this flag.
    pub auto_intercept: bool,
    /// Mirror capture/intercept/enhance events to the browser console.
    pub debug: bool,
    /// Recognized tracking parameters, captured in this order before any
    /// pass-through parameters.
    pub track_params: Vec<String>,
    /// Substrings identifying messaging-service destinations.
    pub messaging_hosts: Vec<String>,
    /// Extra substrings identifying redirect-endpoint links. The redirect
    /// base's own host+path is always matched in addition to these.
    pub redirect_markers: Vec<String>,
    /// Class name marking a link for interception regardless of destination.
    pub opt_in_class: String,
    /// Delay before re-scanning links after a DOM mutation, in milliseconds.
    pub enhance_delay_ms: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            redirect_base_url: String::new(),
            auto_intercept: true,
            debug: false,
            track_params: DEFAULT_TRACK_PARAMS.iter().map(|p| (*p).to_owned()).collect(),
            messaging_hosts: DEFAULT_MESSAGING_HOSTS.iter().map(|h| (*h).to_owned()).collect(),
            redirect_markers: vec!["redirect.html".to_owned()],
            opt_in_class: "tagrelay-track".to_owned(),
            enhance_delay_ms: 100,
        }
    }
}

impl TrackerConfig {
    /// Default configuration pointed at `redirect_base_url`.
    #[must_use]
    pub fn new(redirect_base_url: impl Into<String>) -> Self {
        Self {
            redirect_base_url: redirect_base_url.into(),
            ..Self::default()
        }
    }

    /// Parse a JSON configuration payload.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_recognizes_standard_utm_and_click_ids() {
        let config = TrackerConfig::default();
        for param in ["utm_source", "utm_term", "gclid", "fbclid", "ttclid", "msclkid"] {
            assert!(
                config.track_params.iter().any(|p| p == param),
                "missing {param}"
            );
        }
        assert!(config.auto_intercept);
        assert!(!config.debug);
    }

    #[test]
    fn from_json_fills_missing_fields_with_defaults() {
        let config =
            TrackerConfig::from_json(r#"{"redirect_base_url":"https://example.com/whatsapp"}"#)
                .expect("minimal config should parse");
        assert_eq!(config.redirect_base_url, "https://example.com/whatsapp");
        assert_eq!(config.enhance_delay_ms, 100);
        assert_eq!(config.opt_in_class, "tagrelay-track");
        assert_eq!(
            config.messaging_hosts,
            vec!["whatsapp.com", "wa.me", "api.whatsapp.com"]
        );
    }

    #[test]
    fn from_json_ignores_unknown_fields() {
        let config = TrackerConfig::from_json(
            r#"{"redirect_base_url":"https://example.com/w","future_option":true}"#,
        )
        .expect("unknown fields should be tolerated");
        assert_eq!(config.redirect_base_url, "https://example.com/w");
    }

    #[test]
    fn from_json_rejects_malformed_payloads() {
        assert!(TrackerConfig::from_json("not json").is_err());
        assert!(TrackerConfig::from_json(r#"{"auto_intercept":"yes"}"#).is_err());
    }
}
