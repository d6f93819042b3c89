use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A booked stretch of calendar days, half-open: `[start, end)`.
///
/// `end` is the checkout day, which stays free for the next arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookedRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BookedRange {
    /// Build a range, rejecting zero or negative lengths.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// Whether any day of the inclusive span `[first, last]` falls inside this range.
    pub fn intersects_days(&self, first: NaiveDate, last: NaiveDate) -> bool {
        self.start <= last && self.end > first
    }

    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}
