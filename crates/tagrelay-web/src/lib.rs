#![forbid(unsafe_code)]

//! `tagrelay-web` is the browser face of TagRelay.
//!
//! It wraps the deterministic [`tagrelay_core::Tracker`] with a
//! `wasm-bindgen` API and owns all DOM wiring: the document-level click
//! interceptor, the direct-link enhancement pass, the mutation observer that
//! re-runs it, and the `window.TagRelay` namespace for page authors.
//!
//! Everything touching the DOM only compiles on `wasm32`; configuration
//! resolution stays portable so it tests natively.

#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod enhance_dom;
#[cfg(target_arch = "wasm32")]
mod intercept;
#[cfg(target_arch = "wasm32")]
mod page;
mod setup;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{TagRelay, start};
