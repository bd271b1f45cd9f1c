//! Station domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operational status of a station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StationStatus {
    /// Free and ready to charge
    Available,
    /// A vehicle is currently charging
    Charging,
    /// Unusable (fault, maintenance). Also the fallback for unparseable input.
    OutOfService,
}

impl StationStatus {
    /// All statuses in declaration order.
    pub const ALL: [StationStatus; 3] = [Self::Available, Self::Charging, Self::OutOfService];

    /// Stable persisted token. Changing one of these requires a data migration.
    pub fn storage_token(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Charging => "CHARGING",
            Self::OutOfService => "OUT_OF_SERVICE",
        }
    }

    pub fn display_label(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Charging => "Charging",
            Self::OutOfService => "Out of service",
        }
    }

    /// Case-insensitive match against either the storage token or the display label.
    ///
    /// Fails open: anything unrecognised maps to [`StationStatus::OutOfService`].
    /// Use [`StationStatus::try_parse`] to detect malformed input.
    pub fn parse(text: &str) -> Self {
        Self::try_parse(text).unwrap_or(Self::OutOfService)
    }

    /// Strict variant of [`StationStatus::parse`].
    pub fn try_parse(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL.into_iter().find(|s| {
            s.storage_token().eq_ignore_ascii_case(text)
                || s.display_label().eq_ignore_ascii_case(text)
        })
    }

    /// Display labels in declaration order, for selection lists.
    pub fn all_display_labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.display_label()).collect()
    }
}

impl Default for StationStatus {
    fn default() -> Self {
        Self::OutOfService
    }
}

impl std::fmt::Display for StationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_label())
    }
}

impl From<&str> for StationStatus {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for StationStatus {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

/// Station entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Store-assigned identifier. Zero until the station has been inserted.
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub status: StationStatus,
    /// Set by the store on every write
    pub last_updated: Option<DateTime<Utc>>,
}

impl Station {
    pub fn new(
        name: impl Into<String>,
        location: Option<String>,
        status: StationStatus,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            location,
            status,
            last_updated: None,
        }
    }

    /// Case-insensitive substring match against name or location.
    ///
    /// `needle` is expected to be lowercase already.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .location
                .as_deref()
                .is_some_and(|l| l.to_lowercase().contains(needle))
    }
}
