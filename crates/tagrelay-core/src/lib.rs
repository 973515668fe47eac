#![forbid(unsafe_code)]

//! `tagrelay-core` implements the attribution semantics of TagRelay as pure,
//! deterministic Rust.
//!
//! Design goals:
//! - **Host-driven inputs**: the embedding environment supplies a
//!   [`PageSnapshot`] (URL, referrer, user agent, clock reading, entropy);
//!   this crate never reads ambient time or randomness itself.
//! - **No DOM types**: everything here runs and tests natively. The
//!   `tagrelay-web` crate owns browser wiring and wraps [`Tracker`] with a
//!   stable JS API.
//! - **Infallible capture**: absent or malformed page inputs degrade to
//!   missing fields, never to errors.

pub mod capture;
pub mod config;
pub mod device;
pub mod enhance;
pub mod error;
pub mod record;
pub mod redirect;
pub mod session;
pub mod snapshot;
mod source;
pub mod tracker;

pub use capture::{capture, extract_domain, iso_timestamp};
pub use config::{DEFAULT_MESSAGING_HOSTS, DEFAULT_TRACK_PARAMS, TrackerConfig};
pub use device::{DeviceClass, is_mobile};
pub use error::ConfigError;
pub use record::AttributionRecord;
pub use session::session_id;
pub use snapshot::PageSnapshot;
pub use tracker::Tracker;
