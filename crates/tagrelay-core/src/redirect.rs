#![forbid(unsafe_code)]

//! Redirect URL building.

use url::Url;

use crate::record::AttributionRecord;

/// Serialize `record` onto `base` as its query string.
///
/// Any query the base carried is replaced; values are percent-encoded with
/// standard form-urlencoded rules.
#[must_use]
pub fn build_redirect_url(base: &Url, record: &AttributionRecord) -> String {
    let mut url = base.clone();
    url.set_query(None);
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in record.iter() {
            pairs.append_pair(key, value);
        }
    }
    url.into()
}
