#![forbid(unsafe_code)]

//! Traffic-source inference for visits without an explicit source tag.
//!
//! Priority order is load-bearing and must not be reordered:
//! ad-click ID > referrer domain > path pattern > generic referral > direct.

use crate::record::AttributionRecord;

/// Ad-network click identifiers and the source label each implies.
const CLICK_ID_SOURCES: &[(&str, &str)] = &[
    ("gclid", "google_ads"),
    ("fbclid", "facebook_ads"),
    ("ttclid", "tiktok_ads"),
    ("msclkid", "microsoft_ads"),
];

/// Known referrer domains and their platform labels.
const REFERRER_SOURCES: &[(&str, &str)] = &[
    ("google.com", "google"),
    ("facebook.com", "facebook"),
    ("instagram.com", "instagram"),
    ("tiktok.com", "tiktok"),
    ("youtube.com", "youtube"),
    ("whatsapp.com", "whatsapp"),
];

/// Infer a traffic source from signals already captured.
///
/// Callers only invoke this when neither `source` nor `utm_source` was
/// present in the query string.
pub(crate) fn infer_source(record: &AttributionRecord, referrer: &str, path: &str) -> &'static str {
    for (param, label) in CLICK_ID_SOURCES {
        if record.contains_key(param) {
            return label;
        }
    }

    let referrer = referrer.to_ascii_lowercase();
    for (domain, label) in REFERRER_SOURCES {
        if referrer.contains(domain) {
            return label;
        }
    }

    let path = path.to_ascii_lowercase();
    if path.contains("plan") {
        return "planos";
    }
    if path.contains("contato") || path.contains("contact") {
        return "contato";
    }
    if path == "/" {
        return "homepage";
    }

    if referrer.is_empty() { "direct" } else { "referral" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with(pairs: &[(&str, &str)]) -> AttributionRecord {
        let mut record = AttributionRecord::new();
        for (key, value) in pairs {
            record.set(key, value);
        }
        record
    }

    #[test]
    fn each_click_id_maps_to_its_network() {
        for (param, label) in CLICK_ID_SOURCES {
            let record = record_with(&[(param, "abc")]);
            assert_eq!(infer_source(&record, "", "/landing"), *label);
        }
    }

    #[test]
    fn click_id_outranks_referrer_domain() {
        let record = record_with(&[("fbclid", "xyz")]);
        assert_eq!(
            infer_source(&record, "https://www.google.com/search", "/"),
            "facebook_ads"
        );
    }

    #[test]
    fn known_referrer_domains_map_to_platforms() {
        let record = AttributionRecord::new();
        assert_eq!(
            infer_source(&record, "https://www.instagram.com/", "/landing"),
            "instagram"
        );
        assert_eq!(
            infer_source(&record, "https://m.youtube.com/watch", "/landing"),
            "youtube"
        );
    }

    #[test]
    fn referrer_domain_outranks_path_pattern() {
        let record = AttributionRecord::new();
        assert_eq!(
            infer_source(&record, "https://www.tiktok.com/@x", "/planos/100mb"),
            "tiktok"
        );
    }

    #[test]
    fn path_patterns_label_page_types() {
        let record = AttributionRecord::new();
        assert_eq!(infer_source(&record, "", "/planos/100mb"), "planos");
        assert_eq!(infer_source(&record, "", "/contact-us"), "contato");
        assert_eq!(infer_source(&record, "", "/"), "homepage");
    }

    #[test]
    fn unknown_referrer_is_generic_referral() {
        let record = AttributionRecord::new();
        assert_eq!(
            infer_source(&record, "https://blog.example.net/post", "/sobre"),
            "referral"
        );
    }

    #[test]
    fn no_signals_means_direct() {
        let record = AttributionRecord::new();
        assert_eq!(infer_source(&record, "", "/sobre"), "direct");
    }
}
