#![forbid(unsafe_code)]

//! Non-destructive query merging for links that already target the redirect
//! endpoint.

use std::collections::HashSet;

use url::Url;

use crate::record::AttributionRecord;

/// Append each record entry to `href`'s query unless the key is already
/// present. Existing parameters are never overwritten, so repeated passes are
/// idempotent at the key level. Returns `None` when `href` does not parse.
#[must_use]
pub fn merge_missing(href: &str, additions: &AttributionRecord) -> Option<String> {
    let mut url = Url::parse(href).ok()?;
    let existing: HashSet<String> = url
        .query_pairs()
        .map(|(key, _)| key.into_owned())
        .collect();
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in additions.iter() {
            if !existing.contains(key) {
                pairs.append_pair(key, value);
            }
        }
    }
    Some(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(pairs: &[(&str, &str)]) -> AttributionRecord {
        let mut record = AttributionRecord::new();
        for (key, value) in pairs {
            record.set(key, value);
        }
        record
    }

    #[test]
    fn fills_only_missing_keys() {
        let additions = record(&[("source", "instagram"), ("plano", "100mb")]);
        let merged = merge_missing(
            "https://example.com/whatsapp?source=popup",
            &additions,
        )
        .unwrap();
        assert_eq!(
            merged,
            "https://example.com/whatsapp?source=popup&plano=100mb"
        );
    }

    #[test]
    fn repeated_merges_are_idempotent() {
        let additions = record(&[("utm_source", "newsletter"), ("cidade", "curitiba")]);
        let once = merge_missing("https://example.com/whatsapp", &additions).unwrap();
        let twice = merge_missing(&once, &additions).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn unparseable_href_is_left_alone() {
        let additions = record(&[("source", "direct")]);
        assert_eq!(merge_missing("::not a url::", &additions), None);
    }
}
