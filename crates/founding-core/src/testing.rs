//! Scripted founding sources shared by the unit tests.

#![allow(
    clippy::unwrap_used,
    clippy::arithmetic_side_effects,
    clippy::cast_possible_wrap
)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use founding_client::{ClientError, FoundingSource};
use founding_types::{Day, Founding};

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

pub fn day(y: i32, m: u32, d: u32) -> Day {
    Day::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

pub fn founding(secs: i64, nation: &str, region: &str) -> Founding {
    Founding {
        time: at(secs),
        nation: nation.to_owned(),
        region: region.to_owned(),
    }
}

/// `count` foundings one second apart, newest first, starting at `newest`.
pub fn page(newest: i64, count: usize, region: &str) -> Vec<Founding> {
    (0..count)
        .map(|i| founding(newest - i as i64, &format!("nation_{newest}_{i}"), region))
        .collect()
}

/// Serves queued pages in order, then empty pages forever.
pub struct PagedSource {
    pages: Mutex<VecDeque<Result<Vec<Founding>, ClientError>>>,
    calls: Mutex<Vec<(DateTime<Utc>, DateTime<Utc>)>>,
}

impl PagedSource {
    pub fn new(pages: Vec<Result<Vec<Founding>, ClientError>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl FoundingSource for PagedSource {
    async fn fetch_range(
        &self,
        since: DateTime<Utc>,
        before: DateTime<Utc>,
    ) -> Result<Vec<Founding>, ClientError> {
        self.calls.lock().unwrap().push((since, before));
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Produces `per_day` foundings for every day before `quiet_from`,
/// alternating between regions `Alpha` and `Beta`.
pub struct DailySource {
    per_day: usize,
    quiet_from: Day,
    calls: AtomicUsize,
}

impl DailySource {
    pub const fn new(per_day: usize, quiet_from: Day) -> Self {
        Self {
            per_day,
            quiet_from,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FoundingSource for DailySource {
    async fn fetch_range(
        &self,
        since: DateTime<Utc>,
        before: DateTime<Utc>,
    ) -> Result<Vec<Founding>, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // `since` sits one second before the day, so key on `before`.
        let day = Day::containing(before);
        if day >= self.quiet_from {
            return Ok(Vec::new());
        }

        let base = day.start().timestamp();
        let mut foundings: Vec<Founding> = (0..self.per_day)
            .map(|i| {
                let region = if i % 2 == 0 { "Alpha" } else { "Beta" };
                founding(base + 60 * (i as i64 + 1), &format!("{day}_{i}"), region)
            })
            .filter(|f| f.time > since && f.time <= before)
            .collect();
        foundings.reverse();
        Ok(foundings)
    }
}
