//! Cross-block URL deduplication.
//!
//! News queries overlap heavily (the brand query and the sector query often
//! return the same article), so every news block is filtered against the
//! URLs accepted from the blocks before it.

use std::collections::HashSet;

use crate::record::{extract_url, RECORD_MARKER};

/// URLs accepted so far in one pipeline run.
///
/// Only grows. Its final length is the "unique sources" figure shown in the
/// report header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenUrls {
    urls: HashSet<String>,
}

impl SeenUrls {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    /// Record `url`; returns `false` if it was already present.
    pub fn insert(&mut self, url: &str) -> bool {
        if self.urls.contains(url) {
            return false;
        }
        self.urls.insert(url.to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }
}

/// Remove every record of `block` whose URL is already in `seen`.
///
/// Kept records have their URL added to `seen`, so a URL repeated inside the
/// same block survives only at its first position. Records without a URL are
/// always kept. Whitespace-only records are dropped. Text before the first
/// `ITEM_` marker is filtered like a record but kept without a marker prefix.
/// A block with no marker at all (for example a provider error sentinel) is
/// returned unchanged.
///
/// URLs are compared byte for byte; links that differ only in tracking
/// parameters count as distinct.
pub fn dedupe(block: &str, seen: &mut SeenUrls) -> String {
    if !block.contains(RECORD_MARKER) {
        return block.to_string();
    }

    let mut segments = block.split(RECORD_MARKER);
    let mut cleaned = String::with_capacity(block.len());

    let lead = segments.next().unwrap_or_default();
    if !lead.trim().is_empty() && extract_url(lead).is_none_or(|url| seen.insert(url)) {
        cleaned.push_str(lead);
    }

    for record in segments {
        if record.trim().is_empty() {
            continue;
        }
        if let Some(url) = extract_url(record) {
            if !seen.insert(url) {
                tracing::debug!(url, "dropping record already seen in an earlier block");
                continue;
            }
        }
        cleaned.push_str(RECORD_MARKER);
        cleaned.push_str(record);
    }

    cleaned
}

#[cfg(test)]
#[path = "dedup_test.rs"]
mod tests;
