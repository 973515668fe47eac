#![forbid(unsafe_code)]

//! Collects the deterministic [`PageSnapshot`] the core consumes.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::JsValue;
use web_time::{SystemTime, UNIX_EPOCH};

use tagrelay_core::PageSnapshot;

/// Current clock reading as Unix epoch milliseconds.
pub(crate) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

/// Snapshot the live page. Outside a window/document context (workers,
/// detached frames) every field degrades to "not present".
pub(crate) fn snapshot() -> PageSnapshot {
    let Some(window) = web_sys::window() else {
        return PageSnapshot::default();
    };
    let Some(document) = window.document() else {
        return PageSnapshot::default();
    };
    let navigator = window.navigator();

    PageSnapshot {
        url: window.location().href().unwrap_or_default(),
        referrer: document.referrer(),
        page_title: document.title(),
        user_agent: navigator.user_agent().unwrap_or_default(),
        language: navigator.language().unwrap_or_default(),
        timezone: resolved_timezone(),
        now_ms: now_ms(),
        entropy: js_sys::Math::random(),
    }
}

/// IANA timezone via `Intl.DateTimeFormat().resolvedOptions().timeZone`.
fn resolved_timezone() -> String {
    let format = js_sys::Intl::DateTimeFormat::new(&Array::new(), &Object::new());
    let options = format.resolved_options();
    Reflect::get(&options, &JsValue::from_str("timeZone"))
        .ok()
        .and_then(|value| value.as_string())
        .unwrap_or_default()
}
