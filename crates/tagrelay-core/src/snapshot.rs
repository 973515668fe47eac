#![forbid(unsafe_code)]

//! Host-provided view of the page at capture time.
//!
//! The host collects these values (from `window`, `document`, `navigator`,
//! and its clock) and hands them to the core, which stays deterministic:
//! identical snapshots produce identical captures.

/// Everything a capture reads about the embedding page.
///
/// Empty strings mean "not present" and are omitted from the capture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSnapshot {
    /// Full current URL, including the query string.
    pub url: String,
    /// Referrer URL; empty when the visit has none.
    pub referrer: String,
    /// Document title.
    pub page_title: String,
    /// Browser user-agent string.
    pub user_agent: String,
    /// Browser-reported language tag (e.g. `pt-BR`).
    pub language: String,
    /// Resolved IANA timezone name (e.g. `America/Sao_Paulo`).
    pub timezone: String,
    /// Clock reading as Unix epoch milliseconds.
    pub now_ms: u64,
    /// Entropy sample in `[0, 1)` for session-token generation.
    pub entropy: f64,
}
