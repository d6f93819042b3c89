use chrono::NaiveDate;

use crate::domain::BookedRange;

/// Whether `date` falls inside any booked range.
///
/// The checkout day of a range is not booked.
pub fn is_booked(date: NaiveDate, ranges: &[BookedRange]) -> bool {
    ranges.iter().any(|range| range.contains(date))
}

/// Whether any day in the inclusive span `[first, last]` is booked.
pub fn has_booking_between(first: NaiveDate, last: NaiveDate, ranges: &[BookedRange]) -> bool {
    ranges.iter().any(|range| range.intersects_days(first, last))
}

/// Booked ranges of one accommodation, merged from all of its feeds.
///
/// Ranges from different feeds may overlap or repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Availability {
    ranges: Vec<BookedRange>,
}

impl Availability {
    pub fn new(ranges: Vec<BookedRange>) -> Self {
        Self { ranges }
    }

    pub fn ranges(&self) -> &[BookedRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn is_booked(&self, date: NaiveDate) -> bool {
        is_booked(date, &self.ranges)
    }

    pub fn has_booking_between(&self, first: NaiveDate, last: NaiveDate) -> bool {
        has_booking_between(first, last, &self.ranges)
    }
}
