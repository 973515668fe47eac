#![forbid(unsafe_code)]

//! Console shim and panic hook.
//!
//! Goes through `Reflect` rather than `web_sys::console` so a host that
//! stubs out `console` cannot break the tracker.

use js_sys::Reflect;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;

fn console_call(method: &str, msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(func) = Reflect::get(&console, &method.into()) else {
        return;
    };
    let Ok(func) = func.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = func.call1(&console, &JsValue::from_str(msg));
}

pub(crate) fn console_error(msg: &str) {
    console_call("error", msg);
}

/// Mirror a tracker event to the console when debug logging is enabled.
pub(crate) fn debug_log(enabled: bool, msg: &str) {
    tracing::debug!("{msg}");
    if enabled {
        console_call("log", &format!("[TagRelay] {msg}"));
    }
}

pub(crate) fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}
