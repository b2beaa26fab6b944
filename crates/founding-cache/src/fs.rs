//! Filesystem day cache: one JSON file per day.
//!
//! Files are named by the day's start-of-day unix timestamp (seconds),
//! for example `1709856000`. Writes go to a dot-prefixed temp file that
//! is fsynced and renamed into place, so a crash mid-write leaves either
//! the old entry or none at all.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use founding_types::{Day, Founding};
use tracing::{debug, warn};

use crate::error::CacheError;
use crate::store::DayCache;

/// Day cache backed by a directory of JSON files.
#[derive(Debug, Clone)]
pub struct FsDayCache {
    dir: PathBuf,
}

impl FsDayCache {
    /// Create a cache rooted at `dir`. The directory is created lazily on
    /// the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the entry for `day`.
    pub fn entry_path(&self, day: Day) -> PathBuf {
        self.dir.join(day.key().to_string())
    }

    fn temp_path(&self, day: Day) -> PathBuf {
        self.dir.join(format!(".{}.tmp", day.key()))
    }
}

/// Whether a directory entry name belongs to a day before `before`, or is
/// not a day key at all.
fn is_stale(name: &str, before: Day) -> bool {
    name.parse::<i64>()
        .ok()
        .and_then(Day::from_key)
        .is_none_or(|day| day < before)
}

impl DayCache for FsDayCache {
    fn get(&self, day: Day) -> Option<Vec<Founding>> {
        let path = self.entry_path(day);

        let contents = match fs::read(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(%day, path = %path.display(), error = %e, "unreadable cache entry, treating as miss");
                return None;
            }
        };

        match serde_json::from_slice(&contents) {
            Ok(foundings) => Some(foundings),
            Err(e) => {
                warn!(%day, path = %path.display(), error = %e, "corrupt cache entry, treating as miss");
                None
            }
        }
    }

    fn set(&self, day: Day, foundings: &[Founding]) -> Result<(), CacheError> {
        let contents = serde_json::to_vec(foundings)?;
        fs::create_dir_all(&self.dir)?;

        let temp = self.temp_path(day);
        let write_result = File::create(&temp).and_then(|mut file| {
            file.write_all(&contents)?;
            file.sync_all()
        });
        if let Err(e) = write_result.and_then(|()| fs::rename(&temp, self.entry_path(day))) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        debug!(%day, foundings = foundings.len(), "cached day");
        Ok(())
    }

    fn prune(&self, before: Day) -> Result<usize, CacheError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut removed: usize = 0;
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();

            if !is_stale(&name, before) {
                continue;
            }

            if entry.file_type()?.is_dir() {
                fs::remove_dir_all(entry.path())?;
            } else {
                fs::remove_file(entry.path())?;
            }
            debug!(entry = %name, cutoff = %before, "pruned cache entry");
            removed = removed.saturating_add(1);
        }

        Ok(removed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> Day {
        Day::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn founding(secs: i64, nation: &str, region: &str) -> Founding {
        Founding {
            time: Utc.timestamp_opt(secs, 0).unwrap(),
            nation: nation.to_owned(),
            region: region.to_owned(),
        }
    }

    #[test]
    fn set_then_get_round_trips_exactly() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = FsDayCache::new(tmp.path().join("cache"));
        let d = day(2024, 3, 8);
        let foundings = vec![
            founding(1_709_900_001, "b", "the_pacific"),
            founding(1_709_856_000, "a", "lazarus"),
        ];

        cache.set(d, &foundings).unwrap();
        assert_eq!(cache.get(d), Some(foundings));
        assert!(cache.entry_path(d).ends_with("1709856000"));
    }

    #[test]
    fn empty_day_is_a_hit_not_a_miss() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = FsDayCache::new(tmp.path());
        let d = day(2024, 3, 8);

        assert_eq!(cache.get(d), None);
        cache.set(d, &[]).unwrap();
        assert_eq!(cache.get(d), Some(Vec::new()));
    }

    #[test]
    fn set_overwrites_previous_entry_and_leaves_no_temp_file() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = FsDayCache::new(tmp.path());
        let d = day(2024, 3, 8);

        cache.set(d, &[founding(1_709_856_001, "a", "r")]).unwrap();
        cache.set(d, &[founding(1_709_856_002, "b", "r")]).unwrap();

        let got = cache.get(d).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got.first().unwrap().nation, "b");
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn corrupt_entry_reads_as_miss() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = FsDayCache::new(tmp.path());
        let d = day(2024, 3, 8);

        fs::write(cache.entry_path(d), b"[{\"time\":").unwrap();
        assert_eq!(cache.get(d), None);
    }

    #[test]
    fn prune_removes_old_days_and_garbage_keeps_the_rest() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = FsDayCache::new(tmp.path());
        let cutoff = day(2024, 3, 1);

        for d in [day(2024, 2, 28), day(2024, 2, 29), cutoff, day(2024, 3, 7)] {
            cache.set(d, &[]).unwrap();
        }
        fs::write(tmp.path().join("not-a-day"), b"x").unwrap();
        fs::write(tmp.path().join("1709856001"), b"[]").unwrap();
        fs::write(tmp.path().join(".1709856000.tmp"), b"[").unwrap();

        let removed = cache.prune(cutoff).unwrap();
        assert_eq!(removed, 5);

        assert_eq!(cache.get(day(2024, 2, 28)), None);
        assert_eq!(cache.get(day(2024, 2, 29)), None);
        assert_eq!(cache.get(cutoff), Some(Vec::new()));
        assert_eq!(cache.get(day(2024, 3, 7)), Some(Vec::new()));
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 2);
    }

    #[test]
    fn prune_of_missing_directory_is_a_no_op() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = FsDayCache::new(tmp.path().join("never-created"));
        assert_eq!(cache.prune(day(2024, 3, 1)).unwrap(), 0);
    }

    #[test]
    fn stale_names() {
        let cutoff = day(2024, 3, 1);
        assert!(is_stale("abc", cutoff));
        assert!(is_stale("", cutoff));
        assert!(is_stale(&day(2024, 2, 29).key().to_string(), cutoff));
        assert!(!is_stale(&cutoff.key().to_string(), cutoff));
        assert!(!is_stale(&day(2025, 1, 1).key().to_string(), cutoff));
    }
}
