#![forbid(unsafe_code)]

//! The Attribution Record: a flat, insertion-ordered string map.
//!
//! Built fresh on each capture and consumed immediately to produce a redirect
//! URL; never persisted. Last write wins on key collision, and empty values
//! are dropped so a redirect URL never carries blank fields.

/// Flat key/value mapping describing a visitor's traffic origin and context
/// at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributionRecord {
    entries: Vec<(String, String)>,
}

impl AttributionRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert `key=value`. A re-set key keeps its original position but takes
    /// the new value; empty values are ignored.
    pub fn set(&mut self, key: &str, value: &str) {
        if value.is_empty() {
            return;
        }
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => {
                existing.clear();
                existing.push_str(value);
            }
            None => self.entries.push((key.to_owned(), value.to_owned())),
        }
    }

    /// Overlay `pairs` onto the record; overlay values win on collision.
    pub fn merge_overriding(&mut self, pairs: impl IntoIterator<Item = (String, String)>) {
        for (key, value) in pairs {
            self.set(&key, &value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
