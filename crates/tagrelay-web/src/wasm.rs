#![forbid(unsafe_code)]

//! `wasm-bindgen` exports: the [`TagRelay`] class, the `start` entry point,
//! and the `window.TagRelay` namespace for inline page scripts.

use std::rc::Rc;

use js_sys::{Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use tagrelay_core::{AttributionRecord, Tracker};

use crate::console::{console_error, debug_log, install_panic_hook};
use crate::dom;
use crate::enhance_dom;
use crate::intercept;
use crate::page;
use crate::setup;

const GLOBAL_CONFIG_KEY: &str = "TAGRELAY_CONFIG";
const NAMESPACE_KEY: &str = "TagRelay";

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

fn set_js(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

fn to_js_error(err: impl core::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn record_to_js(record: &AttributionRecord) -> JsValue {
    let obj = Object::new();
    for (key, value) in record.iter() {
        set_js(&obj, key, JsValue::from_str(value));
    }
    obj.into()
}

/// JS values are stringified the way the query string will carry them;
/// objects and functions are dropped rather than serialized as `[object ...]`.
fn stringify(value: &JsValue) -> Option<String> {
    if let Some(text) = value.as_string() {
        return Some(text);
    }
    if let Some(number) = value.as_f64() {
        return Some(format!("{number}"));
    }
    value.as_bool().map(|flag| flag.to_string())
}

fn overrides_from_js(value: &JsValue) -> Vec<(String, String)> {
    let mut overrides = Vec::new();
    if value.is_undefined() || value.is_null() {
        return overrides;
    }
    let Ok(object) = value.clone().dyn_into::<Object>() else {
        return overrides;
    };
    for entry in Object::entries(&object).iter() {
        let Ok(pair) = entry.dyn_into::<js_sys::Array>() else {
            continue;
        };
        let Some(key) = pair.get(0).as_string() else {
            continue;
        };
        if let Some(text) = stringify(&pair.get(1)) {
            overrides.push((key, text));
        }
    }
    overrides
}

/// Page-global configuration: either a JSON string or a plain object.
fn page_global_config() -> Option<String> {
    let window = web_sys::window()?;
    let value = Reflect::get(&window, &JsValue::from_str(GLOBAL_CONFIG_KEY)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    if let Some(text) = value.as_string() {
        return Some(text);
    }
    js_sys::JSON::stringify(&value).ok().map(String::from)
}

/// Browser-embedded attribution tracker.
///
/// Construct with a JSON configuration (or set a `TAGRELAY_CONFIG` page
/// global) and call [`TagRelay::install`] to wire the page, or use the
/// [`start`] convenience export.
#[wasm_bindgen]
pub struct TagRelay {
    tracker: Rc<Tracker>,
}

#[wasm_bindgen]
impl TagRelay {
    /// Create a tracker from a JSON configuration string. Falls back to the
    /// `TAGRELAY_CONFIG` page global when no argument is given.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<TagRelay, JsValue> {
        install_panic_hook();
        let config = setup::resolve_config(config_json.as_deref(), page_global_config())
            .map_err(to_js_error)?;
        let tracker = Tracker::new(config).map_err(to_js_error)?;
        Ok(Self {
            tracker: Rc::new(tracker),
        })
    }

    /// Capture the current attribution data as a plain object.
    #[wasm_bindgen(js_name = getData)]
    pub fn get_data(&self) -> JsValue {
        record_to_js(&self.tracker.capture(&page::snapshot()))
    }

    /// Build a redirect URL; `overrides` entries win over captured fields.
    #[wasm_bindgen(js_name = createLink)]
    pub fn create_link(&self, overrides: &JsValue) -> String {
        self.tracker
            .create_link(&page::snapshot(), overrides_from_js(overrides))
    }

    /// Navigate to the redirect endpoint immediately.
    pub fn redirect(&self, overrides: &JsValue) {
        let destination = self.create_link(overrides);
        debug_log(
            self.tracker.config().debug,
            &format!("redirecting to {destination}"),
        );
        dom::navigate(&destination);
    }

    /// Read-only configuration snapshot.
    #[wasm_bindgen(getter)]
    pub fn config(&self) -> JsValue {
        config_to_js(&self.tracker)
    }

    /// Wire the page: click interception, one enhancement pass, the mutation
    /// observer, and the `window.TagRelay` namespace. Waits for
    /// `DOMContentLoaded` when the document is still loading.
    pub fn install(&self) -> Result<(), JsValue> {
        let Some(window) = web_sys::window() else {
            return Err(JsValue::from_str("no window to install into"));
        };
        let Some(document) = window.document() else {
            return Err(JsValue::from_str("no document to install into"));
        };

        if document.ready_state() == "loading" {
            let tracker = Rc::clone(&self.tracker);
            let on_ready = Closure::<dyn FnMut()>::new(move || {
                if let Some(window) = web_sys::window() {
                    if let Some(document) = window.document() {
                        if let Err(err) = wire(&tracker, &window, &document) {
                            console_error(&format!("tagrelay install failed: {err:?}"));
                        }
                    }
                }
            });
            document.add_event_listener_with_callback(
                "DOMContentLoaded",
                on_ready.as_ref().unchecked_ref(),
            )?;
            on_ready.forget();
            return Ok(());
        }
        wire(&self.tracker, &window, &document)
    }
}

fn config_to_js(tracker: &Tracker) -> JsValue {
    match serde_json::to_string(tracker.config()) {
        Ok(json) => js_sys::JSON::parse(&json).unwrap_or(JsValue::NULL),
        Err(_) => JsValue::NULL,
    }
}

fn wire(tracker: &Rc<Tracker>, window: &Window, document: &Document) -> Result<(), JsValue> {
    intercept::attach(Rc::clone(tracker), document)?;
    enhance_dom::enhance_direct_links(tracker, document);
    enhance_dom::observe_mutations(Rc::clone(tracker), document)?;
    register_namespace(tracker, window);
    debug_log(tracker.config().debug, "initialized");
    Ok(())
}

/// Mirror the public API onto `window.TagRelay` so inline page scripts can
/// call it without holding the wasm module handle.
fn register_namespace(tracker: &Rc<Tracker>, window: &Window) {
    let namespace = Object::new();

    let get_data = {
        let tracker = Rc::clone(tracker);
        Closure::<dyn FnMut() -> JsValue>::new(move || {
            record_to_js(&tracker.capture(&page::snapshot()))
        })
    };
    set_js(&namespace, "getData", get_data.as_ref().clone());
    get_data.forget();

    let create_link = {
        let tracker = Rc::clone(tracker);
        Closure::<dyn FnMut(JsValue) -> JsValue>::new(move |overrides: JsValue| {
            JsValue::from_str(
                &tracker.create_link(&page::snapshot(), overrides_from_js(&overrides)),
            )
        })
    };
    set_js(&namespace, "createLink", create_link.as_ref().clone());
    create_link.forget();

    let redirect = {
        let tracker = Rc::clone(tracker);
        Closure::<dyn FnMut(JsValue)>::new(move |overrides: JsValue| {
            let destination =
                tracker.create_link(&page::snapshot(), overrides_from_js(&overrides));
            dom::navigate(&destination);
        })
    };
    set_js(&namespace, "redirect", redirect.as_ref().clone());
    redirect.forget();

    set_js(&namespace, "config", config_to_js(tracker));

    let _ = Reflect::set(
        window,
        &JsValue::from_str(NAMESPACE_KEY),
        &namespace.into(),
    );
}

/// Create a tracker and wire the page in one call.
#[wasm_bindgen]
pub fn start(config_json: Option<String>) -> Result<TagRelay, JsValue> {
    let relay = TagRelay::new(config_json)?;
    relay.install()?;
    Ok(relay)
}
