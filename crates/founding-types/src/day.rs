//! UTC calendar days.
//!
//! All day arithmetic in the workspace goes through [`Day`] so caching
//! and backfill agree on where a day starts and ends. Boundaries are
//! always UTC; local midnight never enters the picture.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Last whole second of a calendar day.
const LAST_SECOND: NaiveTime = match NaiveTime::from_hms_opt(23, 59, 59) {
    Some(time) => time,
    None => NaiveTime::MIN,
};

/// A calendar day in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Day(NaiveDate);

impl Day {
    /// Wrap a calendar date.
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The day containing the given instant.
    pub fn containing(instant: DateTime<Utc>) -> Self {
        Self(instant.date_naive())
    }

    /// Return the inner [`NaiveDate`].
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// Start of the day (00:00:00 UTC).
    pub fn start(self) -> DateTime<Utc> {
        self.0.and_time(NaiveTime::MIN).and_utc()
    }

    /// End of the day (23:59:59 UTC), the last whole second it contains.
    pub fn end(self) -> DateTime<Utc> {
        self.0.and_time(LAST_SECOND).and_utc()
    }

    /// Canonical cache key: the start of the day in unix seconds.
    ///
    /// Every instant within the day maps to the same key.
    pub fn key(self) -> i64 {
        self.start().timestamp()
    }

    /// Recover a day from its cache key.
    ///
    /// Returns `None` unless `key` is exactly the start of some day.
    pub fn from_key(key: i64) -> Option<Self> {
        let instant = DateTime::<Utc>::from_timestamp(key, 0)?;
        let day = Self::containing(instant);
        (day.key() == key).then_some(day)
    }

    /// The day before this one, if representable.
    pub fn previous(self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// The day `n` days before this one, if representable.
    pub fn minus_days(self, n: u64) -> Option<Self> {
        self.0.checked_sub_days(Days::new(n)).map(Self)
    }
}

impl core::fmt::Display for Day {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Day {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> Day {
        Day::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn any_instant_in_a_day_maps_to_same_key() {
        let morning = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        let night = Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 59).unwrap();
        assert_eq!(Day::containing(morning).key(), Day::containing(night).key());
        assert_eq!(Day::containing(morning).key(), morning.timestamp());
    }

    #[test]
    fn end_is_last_second_of_day() {
        let d = day(2024, 3, 10);
        assert_eq!(d.end().timestamp() - d.start().timestamp(), 86_399);
        assert_eq!(Day::containing(d.end()), d);
    }

    #[test]
    fn from_key_accepts_only_day_starts() {
        let d = day(2023, 12, 31);
        assert_eq!(Day::from_key(d.key()), Some(d));
        assert_eq!(Day::from_key(d.key() + 1), None);
        assert_eq!(Day::from_key(i64::MAX), None);
    }

    #[test]
    fn previous_crosses_month_and_year() {
        assert_eq!(day(2024, 1, 1).previous(), Some(day(2023, 12, 31)));
        assert_eq!(day(2024, 3, 1).previous(), Some(day(2024, 2, 29)));
        assert_eq!(day(2024, 3, 8).minus_days(7), Some(day(2024, 3, 1)));
    }

    #[test]
    fn display_is_iso_date() {
        assert_eq!(day(2024, 3, 9).to_string(), "2024-03-09");
    }
}
