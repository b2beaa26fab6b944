//! In-memory day cache.
//!
//! Holds entries in a `BTreeMap` for the lifetime of the process. Used by
//! tests and by deployments that deliberately skip disk persistence.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use founding_types::{Day, Founding};

use crate::error::CacheError;
use crate::store::DayCache;

/// Day cache held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryDayCache {
    entries: Mutex<BTreeMap<Day, Vec<Founding>>>,
}

impl MemoryDayCache {
    /// Create an empty cache.
    pub const fn new() -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    /// Days currently cached, oldest first.
    pub fn days(&self) -> Vec<Day> {
        self.lock().keys().copied().collect()
    }

    /// Whether `day` has an entry.
    pub fn contains(&self, day: Day) -> bool {
        self.lock().contains_key(&day)
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<Day, Vec<Founding>>> {
        // Entries are replaced whole, so a poisoned map is still consistent.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DayCache for MemoryDayCache {
    fn get(&self, day: Day) -> Option<Vec<Founding>> {
        self.lock().get(&day).cloned()
    }

    fn set(&self, day: Day, foundings: &[Founding]) -> Result<(), CacheError> {
        self.lock().insert(day, foundings.to_vec());
        Ok(())
    }

    fn prune(&self, before: Day) -> Result<usize, CacheError> {
        let mut entries = self.lock();
        let kept = entries.split_off(&before);
        let removed = entries.len();
        *entries = kept;
        Ok(removed)
    }
}
