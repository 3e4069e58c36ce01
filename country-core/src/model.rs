use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder shown when the upstream record has no capital or languages.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// One element of a country-info response, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryMatch {
    pub common_name: String,
    pub capitals: Option<Vec<String>>,
    /// Language names in upstream order.
    pub languages: Option<Vec<String>>,
    pub flag_svg: Option<String>,
}

/// The normalized record the widget displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub name: String,
    pub capital: String,
    pub languages: String,
    pub flag_url: String,
}

/// What triggered a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Invocation {
    /// Driven by the geolocation flow on mount.
    Default,
    /// Driven by a search submission.
    Manual,
}

impl Invocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Invocation::Default => "current location",
            Invocation::Manual => "search",
        }
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content of the display slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Displayed {
    pub record: CountryRecord,
    pub origin: Invocation,
    pub updated_at: DateTime<Utc>,
}
