//! Posting-time statistics
//!
//! Counts items by the UTC hour of day they were created.

use crate::thing::Normalized;
use chrono::{DateTime, Timelike, Utc};
use serde::Serialize;

/// Item counts per UTC hour of day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HourHistogram {
    /// `counts[h]` = items created during hour `h`
    pub counts: [u64; 24],
    /// Items without a usable `created_utc`
    pub skipped: u64,
}

impl HourHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one item
    pub fn record(&mut self, item: &Normalized) {
        match created_at(item) {
            Some(created) => self.counts[created.hour() as usize] += 1,
            None => self.skipped += 1,
        }
    }

    /// Total of counted (not skipped) items
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Busiest hour, earliest on ties; `None` when empty
    pub fn peak_hour(&self) -> Option<u32> {
        let (hour, count) = self
            .counts
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|(_, count)| **count)?;
        (*count > 0).then_some(hour as u32)
    }
}

/// Histogram over any sequence of items
pub fn hour_histogram<'a>(items: impl IntoIterator<Item = &'a Normalized>) -> HourHistogram {
    let mut histogram = HourHistogram::new();
    for item in items {
        histogram.record(item);
    }
    histogram
}

/// Creation time from the `created_utc` epoch-seconds field
pub fn created_at(item: &Normalized) -> Option<DateTime<Utc>> {
    let seconds = item.get("created_utc")?.as_f64()?;
    DateTime::from_timestamp(seconds.trunc() as i64, 0)
}
