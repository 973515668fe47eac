#![forbid(unsafe_code)]

//! Small DOM helpers shared by interception and enhancement.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlAnchorElement, HtmlElement};

use tagrelay_core::AttributionRecord;

/// Link-level data attributes page authors may set; overlay order matters
/// only in that these always beat same-named captured fields.
pub(crate) const DATASET_KEYS: &[&str] = &[
    "source",
    "campaign",
    "plano",
    "velocidade",
    "promo",
    "cidade",
    "bairro",
];

/// Overlay the element's `data-*` attributes onto `record`; attributes win.
pub(crate) fn apply_dataset_overrides(record: &mut AttributionRecord, element: &HtmlElement) {
    let dataset = element.dataset();
    for key in DATASET_KEYS {
        if let Some(value) = dataset.get(key) {
            record.set(key, &value);
        }
    }
}

/// Every anchor in the document, resolved to `HtmlAnchorElement`.
pub(crate) fn anchors(document: &Document) -> Vec<HtmlAnchorElement> {
    let Ok(nodes) = document.query_selector_all("a[href]") else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<HtmlAnchorElement>().ok())
        .collect()
}

/// Fire-and-forget full-page navigation.
pub(crate) fn navigate(url: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(url);
    }
}
