//! Region catalogue, time ranges and signal cache keys

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Slug of the synthetic global entry; never aggregated into itself
pub const WORLD_REGION: &str = "world";

/// Known region slugs and their display names
pub const KNOWN_REGIONS: [(&str, &str); 7] = [
    ("world", "the World"),
    ("usa", "USA"),
    ("canada", "Canada"),
    ("australia-nz", "Australia/NZ"),
    ("europe", "Europe"),
    ("asia", "Asia"),
    ("south-america", "South America"),
];

/// Portion of the day a batch was sampled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Day,
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Day => "day",
            TimeRange::Morning => "morning",
            TimeRange::Afternoon => "afternoon",
            TimeRange::Evening => "evening",
            TimeRange::Night => "night",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "day" => Some(TimeRange::Day),
            "morning" => Some(TimeRange::Morning),
            "afternoon" => Some(TimeRange::Afternoon),
            "evening" => Some(TimeRange::Evening),
            "night" => Some(TimeRange::Night),
            _ => None,
        }
    }

    pub fn all() -> [TimeRange; 5] {
        [
            TimeRange::Day,
            TimeRange::Morning,
            TimeRange::Afternoon,
            TimeRange::Evening,
            TimeRange::Night,
        ]
    }

    /// Partial-day samples favour the most recent posts
    pub fn uses_time_decay(&self) -> bool {
        !matches!(self, TimeRange::Day)
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::Day
    }
}

/// Human-readable region name; unknown slugs are returned unchanged
pub fn display_name(slug: &str) -> &str {
    KNOWN_REGIONS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(slug))
        .map_or(slug, |(_, name)| *name)
}

pub fn is_world(region: &str) -> bool {
    region.trim().eq_ignore_ascii_case(WORLD_REGION)
}

/// Key the persistence layer files a signal under: `{region}-{range}-{YYYY-MM-DD}`
pub fn signal_cache_key(region: &str, range: TimeRange, date: NaiveDate) -> String {
    format!("{}-{}-{}", region, range.as_str(), date.format("%Y-%m-%d"))
}
