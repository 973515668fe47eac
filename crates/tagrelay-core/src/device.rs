#![forbid(unsafe_code)]

//! Coarse device classification from the user-agent string.

use std::sync::OnceLock;

use regex_lite::Regex;

/// Coarse device class reported in the attribution record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Tablet,
    Mobile,
    Desktop,
}

impl DeviceClass {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tablet => "tablet",
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
        }
    }

    /// Classify a user agent. Tablet checks run first: an Android UA without
    /// the `Mobile` token is a tablet, with it a phone. Unrecognized agents
    /// fall back to desktop.
    #[must_use]
    pub fn classify(user_agent: &str) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        if ua.contains("ipad") || (ua.contains("android") && !ua.contains("mobile")) || ua.contains("tablet") {
            return Self::Tablet;
        }
        const PHONE_TOKENS: [&str; 5] = ["mobile", "android", "iphone", "ipod", "blackberry"];
        if PHONE_TOKENS.iter().any(|token| ua.contains(token)) {
            return Self::Mobile;
        }
        Self::Desktop
    }
}

/// Mobile flag emitted separately from the device class. Intentionally a
/// different pattern: iPads count as mobile here but classify as tablets.
#[must_use]
pub fn is_mobile(user_agent: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"(?i)mobile|android|iphone|ipad").expect("mobile pattern is valid")
        })
        .is_match(user_agent)
}
