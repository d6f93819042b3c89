//! Month grid arithmetic for the availability calendar.
//!
//! Months are zero-based (`0` = January) throughout this module.

use chrono::{Datelike, NaiveDate};

use crate::availability::is_booked;
use crate::domain::BookedRange;
use crate::selector::{DayClick, SelectionState};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Fold month overflow into the year, so month 12 of 2024 is January 2025.
fn normalize(year: i32, month: u32) -> (i32, u32) {
    (year + (month / 12) as i32, month % 12)
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    let (year, month) = normalize(year, month);
    NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Number of days in the month: the day before the first of the next month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next = first_of_month(year, month + 1);
    next.pred_opt().map(|last| last.day()).unwrap_or(31)
}

/// Weekday index of the 1st, with Sunday as 0.
pub fn first_weekday_offset(year: i32, month: u32) -> u32 {
    first_of_month(year, month).weekday().num_days_from_sunday()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub is_booked: bool,
    pub is_past: bool,
    pub is_today: bool,
    pub is_selected_start: bool,
    pub is_selected_end: bool,
    pub is_in_range: bool,
}

impl CalendarCell {
    pub fn is_selectable(&self) -> bool {
        !self.is_booked && !self.is_past
    }

    /// The click event this cell produces.
    pub fn click(&self) -> DayClick {
        DayClick {
            date: self.date,
            is_booked: self.is_booked,
            is_past: self.is_past,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Blank cells before the 1st.
    pub offset: u32,
    pub cells: Vec<CalendarCell>,
}

impl MonthGrid {
    /// Cells laid out row by row, seven per week, `None` for padding.
    pub fn weeks(&self) -> Vec<Vec<Option<&CalendarCell>>> {
        let padded: Vec<Option<&CalendarCell>> = std::iter::repeat_n(None, self.offset as usize)
            .chain(self.cells.iter().map(Some))
            .collect();

        padded
            .chunks(7)
            .map(|week| {
                let mut week = week.to_vec();
                week.resize(7, None);
                week
            })
            .collect()
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&CalendarCell> {
        self.cells.iter().find(|cell| cell.date == date)
    }

    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.month as usize], self.year)
    }
}

/// Build the annotated grid for one month.
pub fn build_month_grid(
    year: i32,
    month: u32,
    ranges: &[BookedRange],
    selection: &SelectionState,
    today: NaiveDate,
) -> MonthGrid {
    let (year, month) = normalize(year, month);
    let first = first_of_month(year, month);
    let start = selection.start();
    let end = selection.end();

    let cells = first
        .iter_days()
        .take(days_in_month(year, month) as usize)
        .map(|date| CalendarCell {
            date,
            is_booked: is_booked(date, ranges),
            is_past: date < today,
            is_today: date == today,
            is_selected_start: start == Some(date),
            is_selected_end: end == Some(date),
            is_in_range: matches!((start, end), (Some(s), Some(e)) if s < date && date < e),
        })
        .collect();

    MonthGrid {
        year,
        month,
        offset: first_weekday_offset(year, month),
        cells,
    }
}

/// The month currently shown by a calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    pub year: i32,
    pub month: u32,
}

impl MonthCursor {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    pub fn next(self) -> Self {
        let (year, month) = normalize(self.year, self.month + 1);
        Self { year, month }
    }

    pub fn prev(self) -> Self {
        if self.month == 0 {
            Self {
                year: self.year - 1,
                month: 11,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn first_day(self) -> NaiveDate {
        first_of_month(self.year, self.month)
    }

    pub fn last_day(self) -> NaiveDate {
        let (year, month) = normalize(self.year, self.month);
        NaiveDate::from_ymd_opt(year, month + 1, days_in_month(year, month))
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month
    }

    pub fn name(self) -> &'static str {
        MONTH_NAMES[self.month as usize % 12]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2023, 1), 28);
        assert_eq!(days_in_month(2025, 0), 31);
        assert_eq!(days_in_month(2025, 3), 30);
        assert_eq!(days_in_month(2025, 11), 31);
        assert_eq!(days_in_month(1900, 1), 28);
        assert_eq!(days_in_month(2000, 1), 29);
    }

    #[test]
    fn test_first_weekday_offset() {
        // 1 Feb 2024 was a Thursday
        assert_eq!(first_weekday_offset(2024, 1), 4);
        // 1 Jun 2025 was a Sunday
        assert_eq!(first_weekday_offset(2025, 5), 0);
        // 1 Mar 2025 was a Saturday
        assert_eq!(first_weekday_offset(2025, 2), 6);
    }

    #[test]
    fn test_february_cell_counts() {
        let today = d(2020, 1, 1);
        let leap = build_month_grid(2024, 1, &[], &SelectionState::Empty, today);
        assert_eq!(leap.cells.len(), 29);
        let common = build_month_grid(2023, 1, &[], &SelectionState::Empty, today);
        assert_eq!(common.cells.len(), 28);
    }

    #[test]
    fn test_month_overflow_rolls_into_next_year() {
        let grid = build_month_grid(2024, 12, &[], &SelectionState::Empty, d(2020, 1, 1));
        assert_eq!(grid.year, 2025);
        assert_eq!(grid.month, 0);
        assert_eq!(grid.cells[0].date, d(2025, 1, 1));
    }

    #[test]
    fn test_cell_flags() {
        let ranges = vec![BookedRange::new(d(2025, 6, 10), d(2025, 6, 12)).unwrap()];
        let selection = SelectionState::Complete {
            start: d(2025, 6, 20),
            end: d(2025, 6, 23),
        };
        let today = d(2025, 6, 5);
        let grid = build_month_grid(2025, 5, &ranges, &selection, today);

        let cell = |day: u32| *grid.cell(d(2025, 6, day)).unwrap();

        assert!(cell(4).is_past);
        assert!(!cell(5).is_past);
        assert!(cell(5).is_today);
        assert!(cell(10).is_booked);
        assert!(cell(11).is_booked);
        assert!(!cell(12).is_booked);
        assert!(cell(20).is_selected_start);
        assert!(!cell(20).is_in_range);
        assert!(cell(21).is_in_range);
        assert!(cell(22).is_in_range);
        assert!(cell(23).is_selected_end);
        assert!(!cell(23).is_in_range);
        assert!(!cell(10).is_selectable());
        assert!(cell(12).is_selectable());
    }

    #[test]
    fn test_partial_selection_has_no_range() {
        let selection = SelectionState::Partial { start: d(2025, 6, 20) };
        let grid = build_month_grid(2025, 5, &[], &selection, d(2025, 6, 1));
        assert!(grid.cells.iter().all(|c| !c.is_in_range && !c.is_selected_end));
        assert!(grid.cell(d(2025, 6, 20)).unwrap().is_selected_start);
    }

    #[test]
    fn test_weeks_layout() {
        // Feb 2024: offset 4, 29 days -> 33 slots -> 5 rows
        let grid = build_month_grid(2024, 1, &[], &SelectionState::Empty, d(2020, 1, 1));
        let weeks = grid.weeks();
        assert_eq!(weeks.len(), 5);
        assert!(weeks.iter().all(|w| w.len() == 7));
        assert!(weeks[0][3].is_none());
        assert_eq!(weeks[0][4].unwrap().date, d(2024, 2, 1));
        assert_eq!(weeks[4][4].unwrap().date, d(2024, 2, 29));
        assert!(weeks[4][5].is_none());
    }

    #[test]
    fn test_month_cursor_navigation() {
        let cursor = MonthCursor::containing(d(2025, 12, 15));
        assert_eq!(cursor.month, 11);
        let next = cursor.next();
        assert_eq!((next.year, next.month), (2026, 0));
        assert_eq!(next.prev(), cursor);
        assert_eq!(next.name(), "January");
        assert_eq!(cursor.first_day(), d(2025, 12, 1));
        assert_eq!(cursor.last_day(), d(2025, 12, 31));
        assert!(cursor.contains(d(2025, 12, 31)));
        assert!(!cursor.contains(d(2026, 1, 1)));
    }

    #[test]
    fn test_grid_title() {
        let grid = build_month_grid(2024, 1, &[], &SelectionState::Empty, d(2020, 1, 1));
        assert_eq!(grid.title(), "February 2024");
    }
}
