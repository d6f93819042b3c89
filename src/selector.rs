//! Check-in/check-out selection as a pure state machine.

use chrono::NaiveDate;

use crate::availability::Availability;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Empty,
    Partial {
        start: NaiveDate,
    },
    /// Always `start < end`.
    Complete {
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl SelectionState {
    pub fn start(&self) -> Option<NaiveDate> {
        match *self {
            SelectionState::Empty => None,
            SelectionState::Partial { start } | SelectionState::Complete { start, .. } => {
                Some(start)
            }
        }
    }

    pub fn end(&self) -> Option<NaiveDate> {
        match *self {
            SelectionState::Complete { end, .. } => Some(end),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, SelectionState::Complete { .. })
    }
}

/// A click on a rendered day, with the flags the grid computed for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayClick {
    pub date: NaiveDate,
    pub is_booked: bool,
    pub is_past: bool,
}

/// Next selection after a day click.
///
/// Booked and past days are ignored. A click that would span a booked
/// day restarts the selection at the clicked day instead of completing it.
/// Clicking the check-in day again never completes a range; the selection
/// stays `Partial` on that day.
pub fn select_day(click: DayClick, current: SelectionState, availability: &Availability) -> SelectionState {
    if click.is_booked || click.is_past {
        return current;
    }

    let date = click.date;
    match current {
        SelectionState::Partial { start }
            if date > start && !availability.has_booking_between(start, date) =>
        {
            SelectionState::Complete { start, end: date }
        }
        SelectionState::Partial { start } if date > start => {
            tracing::debug!("Range {} - {} crosses a booking, restarting", start, date);
            SelectionState::Partial { start: date }
        }
        _ => SelectionState::Partial { start: date },
    }
}
