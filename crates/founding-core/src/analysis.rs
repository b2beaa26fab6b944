//! Aggregations over an assembled window of foundings.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use founding_types::{Founding, RegionCount, WindowSummary};

/// Count foundings per region.
///
/// Sorted by descending count; regions with equal counts are ordered
/// alphabetically by name.
pub fn region_counts(foundings: &[Founding]) -> Vec<RegionCount> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for founding in foundings {
        let count = counts.entry(founding.region.as_str()).or_insert(0);
        *count = count.saturating_add(1);
    }

    let mut regions: Vec<RegionCount> = counts
        .into_iter()
        .map(|(name, count)| RegionCount {
            name: name.to_owned(),
            count,
        })
        .collect();
    regions.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    regions
}

/// Sample size and covered time span of a window.
pub fn summarize(foundings: &[Founding], generated_at: DateTime<Utc>) -> WindowSummary {
    WindowSummary {
        generated_at,
        sample_size: u64::try_from(foundings.len()).unwrap_or(u64::MAX),
        data_from: foundings.iter().map(|f| f.time).min(),
        data_to: foundings.iter().map(|f| f.time).max(),
    }
}
