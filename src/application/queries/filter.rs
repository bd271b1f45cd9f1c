//! In-memory narrowing of a loaded station snapshot.
//!
//! Pure and side-effect free: never touches the store, so it can run on every
//! keystroke against the last full or searched load.

use crate::domain::{Station, StationStatus};

/// Text + status predicate over stations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationFilter {
    /// Trimmed, lowercased. Empty matches everything.
    text: String,
    status: Option<StationStatus>,
}

impl StationFilter {
    pub fn new(text: &str, status: Option<StationStatus>) -> Self {
        Self {
            text: text.trim().to_lowercase(),
            status,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn status(&self) -> Option<StationStatus> {
        self.status
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.status.is_none()
    }

    pub fn matches(&self, station: &Station) -> bool {
        let text_ok = self.text.is_empty() || station.matches_text(&self.text);
        let status_ok = self.status.map_or(true, |s| station.status == s);
        text_ok && status_ok
    }

    /// Ordered sub-sequence of `snapshot` matching the filter.
    pub fn apply(&self, snapshot: &[Station]) -> Vec<Station> {
        snapshot
            .iter()
            .filter(|s| self.matches(s))
            .cloned()
            .collect()
    }
}

/// Convenience wrapper around [`StationFilter::apply`].
pub fn filter_stations(
    snapshot: &[Station],
    text: &str,
    status: Option<StationStatus>,
) -> Vec<Station> {
    StationFilter::new(text, status).apply(snapshot)
}
