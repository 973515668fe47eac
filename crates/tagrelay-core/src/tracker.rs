#![forbid(unsafe_code)]

//! The [`Tracker`] engine: validated configuration plus every attribution
//! operation the JS-facing layer exposes.

use tracing::debug;
use url::Url;

use crate::capture;
use crate::config::TrackerConfig;
use crate::enhance::merge_missing;
use crate::error::ConfigError;
use crate::record::AttributionRecord;
use crate::redirect::build_redirect_url;
use crate::snapshot::PageSnapshot;

/// Attribution engine with an immutable, validated configuration.
#[derive(Debug, Clone)]
pub struct Tracker {
    config: TrackerConfig,
    redirect_base: Url,
    /// `host/path` of the redirect base, so scheme variants of the endpoint
    /// still match.
    redirect_base_marker: String,
}

impl Tracker {
    /// Validate `config` into a tracker.
    pub fn new(config: TrackerConfig) -> Result<Self, ConfigError> {
        if config.redirect_base_url.trim().is_empty() {
            return Err(ConfigError::MissingRedirectBase);
        }
        let redirect_base =
            Url::parse(&config.redirect_base_url).map_err(|source| ConfigError::InvalidRedirectBase {
                url: config.redirect_base_url.clone(),
                source,
            })?;
        let redirect_base_marker = match redirect_base.host_str() {
            Some(host) => format!("{host}{}", redirect_base.path()).to_ascii_lowercase(),
            None => redirect_base.as_str().to_ascii_lowercase(),
        };
        Ok(Self {
            config,
            redirect_base,
            redirect_base_marker,
        })
    }

    /// Parse and validate a JSON configuration payload.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::new(TrackerConfig::from_json(json)?)
    }

    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Capture the current attribution record from a page snapshot.
    #[must_use]
    pub fn capture(&self, page: &PageSnapshot) -> AttributionRecord {
        capture::capture(&self.config, page)
    }

    /// Whether `href` points at the messaging service.
    #[must_use]
    pub fn is_messaging_link(&self, href: &str) -> bool {
        let href = href.to_ascii_lowercase();
        self.config
            .messaging_hosts
            .iter()
            .any(|host| href.contains(&host.to_ascii_lowercase()))
    }

    /// Whether `href` already points at the redirect endpoint.
    #[must_use]
    pub fn is_redirect_link(&self, href: &str) -> bool {
        let href = href.to_ascii_lowercase();
        href.contains(&self.redirect_base_marker)
            || self
                .config
                .redirect_markers
                .iter()
                .any(|marker| href.contains(&marker.to_ascii_lowercase()))
    }

    /// Interception decision for a clicked link. The opt-in marker wins
    /// unconditionally; otherwise automatic interception must be enabled and
    /// the destination must be a messaging link that is not already routed
    /// through the redirect endpoint.
    #[must_use]
    pub fn should_intercept(&self, href: &str, opted_in: bool) -> bool {
        opted_in
            || (self.config.auto_intercept
                && self.is_messaging_link(href)
                && !self.is_redirect_link(href))
    }

    /// Serialize `record` onto the redirect endpoint.
    #[must_use]
    pub fn redirect_url(&self, record: &AttributionRecord) -> String {
        build_redirect_url(&self.redirect_base, record)
    }

    /// Capture, overlay `overrides` (overrides win on collision), and build
    /// the redirect URL.
    #[must_use]
    pub fn create_link(
        &self,
        page: &PageSnapshot,
        overrides: impl IntoIterator<Item = (String, String)>,
    ) -> String {
        let mut record = self.capture(page);
        record.merge_overriding(overrides);
        self.redirect_url(&record)
    }

    /// Non-destructively merge `record` into an existing redirect-endpoint
    /// link. Returns `None` when `href` is not a redirect link or does not
    /// parse; existing query parameters are never overwritten.
    #[must_use]
    pub fn enhanced_href(&self, href: &str, record: &AttributionRecord) -> Option<String> {
        if !self.is_redirect_link(href) {
            return None;
        }
        let merged = merge_missing(href, record)?;
        if merged != href {
            debug!(%href, "enhanced direct link");
        }
        Some(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tracker() -> Tracker {
        Tracker::new(TrackerConfig::new("https://example.com/whatsapp")).unwrap()
    }

    #[test]
    fn rejects_empty_and_invalid_bases() {
        assert!(matches!(
            Tracker::new(TrackerConfig::default()),
            Err(ConfigError::MissingRedirectBase)
        ));
        assert!(matches!(
            Tracker::new(TrackerConfig::new("not a url")),
            Err(ConfigError::InvalidRedirectBase { .. })
        ));
    }

    #[test]
    fn from_json_builds_a_working_tracker() {
        let tracker = Tracker::from_json(
            r#"{"redirect_base_url":"https://example.com/whatsapp","auto_intercept":false}"#,
        )
        .unwrap();
        assert!(!tracker.config().auto_intercept);
        assert!(tracker.is_redirect_link("https://example.com/whatsapp?x=1"));
        assert!(Tracker::from_json("{}").is_err());
    }

    #[test]
    fn messaging_links_match_all_known_hosts() {
        let tracker = tracker();
        assert!(tracker.is_messaging_link("https://wa.me/5541999999999"));
        assert!(tracker.is_messaging_link("https://api.whatsapp.com/send?phone=5541999999999"));
        assert!(tracker.is_messaging_link("HTTPS://WA.ME/5541999999999"));
        assert!(!tracker.is_messaging_link("https://example.org/contact"));
    }

    #[test]
    fn redirect_links_match_scheme_variants_and_markers() {
        let tracker = tracker();
        assert!(tracker.is_redirect_link("https://example.com/whatsapp?source=popup"));
        assert!(tracker.is_redirect_link("http://example.com/whatsapp"));
        assert!(tracker.is_redirect_link("https://cdn.example.net/redirect.html"));
        assert!(!tracker.is_redirect_link("https://example.com/planos"));
    }

    #[test]
    fn interception_requires_messaging_destination_outside_the_endpoint() {
        let tracker = tracker();
        assert!(tracker.should_intercept("https://wa.me/5541999999999", false));
        assert!(!tracker.should_intercept("https://example.com/whatsapp?x=1", false));
        assert!(!tracker.should_intercept("https://example.org/contact", false));
    }

    #[test]
    fn opt_in_marker_wins_unconditionally() {
        let mut config = TrackerConfig::new("https://example.com/whatsapp");
        config.auto_intercept = false;
        let tracker = Tracker::new(config).unwrap();
        assert!(!tracker.should_intercept("https://wa.me/5541999999999", false));
        assert!(tracker.should_intercept("https://example.org/anything", true));
    }

    #[test]
    fn create_link_applies_overrides_last() {
        let tracker = tracker();
        let page = PageSnapshot {
            url: "https://site.example/landing?utm_source=newsletter".to_owned(),
            now_ms: 1_700_000_000_000,
            ..PageSnapshot::default()
        };
        let url = tracker.create_link(
            &page,
            vec![("utm_source".to_owned(), "popup".to_owned())],
        );
        assert!(url.contains("utm_source=popup"), "got {url}");
        assert!(!url.contains("utm_source=newsletter"), "got {url}");
    }

    #[test]
    fn enhanced_href_ignores_foreign_links() {
        let tracker = tracker();
        let record = AttributionRecord::new();
        assert_eq!(tracker.enhanced_href("https://wa.me/5541999999999", &record), None);
    }
}
