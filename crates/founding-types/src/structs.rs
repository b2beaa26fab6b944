//! Founding records and derived per-region counts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A nation being founded (or refounded) in a region.
///
/// Produced only by the happenings parser. The timestamp has second
/// precision and serializes as RFC 3339, so a record written to the day
/// cache reads back identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Founding {
    /// When the founding happened.
    pub time: DateTime<Utc>,
    /// Identifier of the founded nation.
    pub nation: String,
    /// Identifier of the region the nation was founded in.
    pub region: String,
}

/// Number of foundings attributed to one region.
///
/// Recomputed for every aggregation request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCount {
    /// Region identifier.
    pub name: String,
    /// Foundings in the region over the aggregated span.
    #[serde(rename = "foundings")]
    pub count: u64,
}

/// Headline figures for an assembled window of foundings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSummary {
    /// When the window was assembled.
    pub generated_at: DateTime<Utc>,
    /// Number of foundings in the window.
    pub sample_size: u64,
    /// Timestamp of the oldest founding, if any.
    pub data_from: Option<DateTime<Utc>>,
    /// Timestamp of the newest founding, if any.
    pub data_to: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn founding_json_keeps_exact_timestamp() {
        let founding = Founding {
            time: Utc.timestamp_opt(1_700_000_123, 0).unwrap(),
            nation: String::from("testlandia"),
            region: String::from("the_pacific"),
        };

        let json = serde_json::to_string(&founding).unwrap();
        let back: Founding = serde_json::from_str(&json).unwrap();
        assert_eq!(back, founding);
        assert_eq!(back.time.timestamp(), 1_700_000_123);
    }

    #[test]
    fn region_count_uses_foundings_field() {
        let count = RegionCount {
            name: String::from("the_north_pacific"),
            count: 12,
        };
        let json = serde_json::to_value(&count).unwrap();
        assert_eq!(json["name"], "the_north_pacific");
        assert_eq!(json["foundings"], 12);
    }
}
