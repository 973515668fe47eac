#![forbid(unsafe_code)]

//! Direct-link enhancement and the mutation observer that re-runs it.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, MutationObserver, MutationObserverInit, MutationRecord};

use tagrelay_core::Tracker;

use crate::console::debug_log;
use crate::dom;
use crate::page;

/// Merge the current capture into every link already pointing at the
/// redirect endpoint. Existing link parameters always win; repeated passes
/// are no-ops once a link carries every capturable key.
pub(crate) fn enhance_direct_links(tracker: &Tracker, document: &Document) {
    for anchor in dom::anchors(document) {
        let href = anchor.href();
        if !tracker.is_redirect_link(&href) {
            continue;
        }
        let mut record = tracker.capture(&page::snapshot());
        dom::apply_dataset_overrides(&mut record, &anchor);
        if let Some(updated) = tracker.enhanced_href(&href, &record)
            && updated != href
        {
            anchor.set_href(&updated);
            debug_log(tracker.config().debug, &format!("enhanced link {updated}"));
        }
    }
}

/// Watch the body subtree for added nodes and schedule a deferred re-scan.
/// The observer runs for the page's lifetime; no teardown.
pub(crate) fn observe_mutations(tracker: Rc<Tracker>, document: &Document) -> Result<(), JsValue> {
    let Some(body) = document.body() else {
        return Ok(());
    };
    let delay_ms = tracker.config().enhance_delay_ms as i32;

    // One re-scan closure reused by every scheduled timeout; it is kept
    // alive by the observer callback that owns it.
    let rescan = {
        let tracker = Rc::clone(&tracker);
        Closure::<dyn FnMut()>::new(move || {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                enhance_direct_links(&tracker, &document);
            }
        })
    };

    let on_mutations = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
        move |mutations: js_sys::Array, _observer: MutationObserver| {
            let added_nodes = mutations
                .iter()
                .filter_map(|entry| entry.dyn_into::<MutationRecord>().ok())
                .any(|record| record.type_() == "childList" && record.added_nodes().length() > 0);
            if !added_nodes {
                return;
            }
            if let Some(window) = web_sys::window() {
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    rescan.as_ref().unchecked_ref(),
                    delay_ms,
                );
            }
        },
    );

    let observer = MutationObserver::new(on_mutations.as_ref().unchecked_ref())?;
    let options = MutationObserverInit::new();
    options.set_child_list(true);
    options.set_subtree(true);
    observer.observe_with_options(&body, &options)?;
    on_mutations.forget();
    Ok(())
}
