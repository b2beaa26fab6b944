//! The day cache interface.

use founding_types::{Day, Founding};

use crate::error::CacheError;

/// Storage for complete per-day founding lists.
pub trait DayCache {
    /// Return the cached foundings for `day`, or `None` on a miss.
    ///
    /// Unreadable or corrupt entries are misses, never errors.
    fn get(&self, day: Day) -> Option<Vec<Founding>>;

    /// Store the complete list of foundings for `day`, replacing any
    /// previous entry. Readers never observe a partially written entry.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the entry could not be written.
    fn set(&self, day: Day, foundings: &[Founding]) -> Result<(), CacheError>;

    /// Delete every entry for days strictly before `before`, plus any
    /// entry whose key is not a valid day. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backing store could not be listed
    /// or an entry could not be deleted.
    fn prune(&self, before: Day) -> Result<usize, CacheError>;
}
