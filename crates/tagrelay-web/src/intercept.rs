#![forbid(unsafe_code)]

//! Document-level click interception for outbound messaging links.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, HtmlAnchorElement, MouseEvent};

use tagrelay_core::{Tracker, iso_timestamp};

use crate::console::debug_log;
use crate::dom;
use crate::page;

/// Attach the single click listener. The closure lives for the page's
/// lifetime, so it is intentionally leaked.
pub(crate) fn attach(tracker: Rc<Tracker>, document: &Document) -> Result<(), JsValue> {
    let handler = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        if let Some(anchor) = clicked_anchor(&event) {
            handle_click(&tracker, &event, &anchor);
        }
    });
    document.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

/// Nearest enclosing link of the click target, if any.
fn clicked_anchor(event: &MouseEvent) -> Option<HtmlAnchorElement> {
    let target = event.target()?;
    let element = target.dyn_into::<Element>().ok()?;
    let anchor = element.closest("a[href]").ok()??;
    anchor.dyn_into::<HtmlAnchorElement>().ok()
}

fn handle_click(tracker: &Tracker, event: &MouseEvent, anchor: &HtmlAnchorElement) {
    let href = anchor.href();
    if href.is_empty() {
        return;
    }
    let opted_in = anchor
        .class_list()
        .contains(&tracker.config().opt_in_class);
    if !tracker.should_intercept(&href, opted_in) {
        return;
    }

    event.prevent_default();

    let mut record = tracker.capture(&page::snapshot());
    dom::apply_dataset_overrides(&mut record, anchor);
    if let Some(text) = anchor.text_content() {
        record.set("link_text", text.trim());
    }
    record.set("original_href", &href);
    record.set("click_timestamp", &iso_timestamp(page::now_ms()));

    let destination = tracker.redirect_url(&record);
    debug_log(
        tracker.config().debug,
        &format!("intercepted {href} -> {destination}"),
    );
    dom::navigate(&destination);
}
