#![forbid(unsafe_code)]

//! Data capture: build an [`AttributionRecord`] from a [`PageSnapshot`].

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;
use url::Url;

use crate::config::TrackerConfig;
use crate::device::{DeviceClass, is_mobile};
use crate::record::AttributionRecord;
use crate::session::session_id;
use crate::snapshot::PageSnapshot;
use crate::source::infer_source;

/// Capture every attribution signal the snapshot carries.
///
/// Infallible: a malformed page URL skips the query-derived fields, any other
/// absent value is simply omitted.
#[must_use]
pub fn capture(config: &TrackerConfig, page: &PageSnapshot) -> AttributionRecord {
    let mut record = AttributionRecord::new();
    let parsed = Url::parse(&page.url).ok();

    if let Some(url) = &parsed {
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        // Recognized parameters first, in configured order; the rest pass
        // through afterwards.
        for param in &config.track_params {
            if let Some((_, value)) = pairs.iter().rev().find(|(key, _)| key == param) {
                record.set(param, value);
            }
        }
        for (key, value) in &pairs {
            if !config.track_params.iter().any(|param| param == key) {
                record.set(key, value);
            }
        }
    }

    if !page.referrer.is_empty() {
        record.set("referrer", &page.referrer);
        record.set("referrer_domain", &extract_domain(&page.referrer));
    }

    record.set("current_url", &page.url);
    if let Some(url) = &parsed {
        record.set("current_path", url.path());
    }
    record.set("page_title", &page.page_title);

    if !record.contains_key("source") && !record.contains_key("utm_source") {
        let path = parsed.as_ref().map(Url::path).unwrap_or_default();
        let inferred = infer_source(&record, &page.referrer, path);
        record.set("source", inferred);
    }

    record.set("timestamp", &iso_timestamp(page.now_ms));
    record.set("session_id", &session_id(page.now_ms, page.entropy));

    record.set("device_type", DeviceClass::classify(&page.user_agent).as_str());
    record.set(
        "is_mobile",
        if is_mobile(&page.user_agent) { "true" } else { "false" },
    );
    record.set("language", &page.language);
    record.set("timezone", &page.timezone);

    debug!(fields = record.len(), "captured attribution snapshot");
    record
}

/// Host of `raw`, or `raw` unchanged when it does not parse as a URL.
#[must_use]
pub fn extract_domain(raw: &str) -> String {
    Url::parse(raw)
        .ok()
        .and_then(|url| url.host_str().map(str::to_owned))
        .unwrap_or_else(|| raw.to_owned())
}

/// RFC 3339 UTC timestamp with millisecond precision, e.g.
/// `2026-08-06T12:30:00.000Z`. Out-of-range readings yield an empty string,
/// which the record drops.
#[must_use]
pub fn iso_timestamp(now_ms: u64) -> String {
    i64::try_from(now_ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}
