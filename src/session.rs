//! State owned by one open calendar.
//!
//! Every load is tagged with a generation. Reopening the calendar or
//! switching accommodation starts a new generation, so a response that
//! arrives for an older one is dropped instead of applied.

use chrono::NaiveDate;

use crate::availability::Availability;
use crate::domain::BookedRange;
use crate::grid::{build_month_grid, MonthCursor, MonthGrid};
use crate::selector::{select_day, DayClick, SelectionState};

/// Proof that a load was started for a particular generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct CalendarSession {
    availability: Availability,
    selection: SelectionState,
    loading: bool,
    generation: u64,
    view: MonthCursor,
}

impl CalendarSession {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            availability: Availability::default(),
            selection: SelectionState::Empty,
            loading: false,
            generation: 0,
            view: MonthCursor::containing(today),
        }
    }

    pub fn availability(&self) -> &Availability {
        &self.availability
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn view(&self) -> MonthCursor {
        self.view
    }

    /// Start a fresh load, invalidating any load still in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        self.availability = Availability::default();
        self.selection = SelectionState::Empty;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Apply loaded ranges. Returns `false` and changes nothing when the
    /// ticket belongs to a superseded load.
    pub fn finish_load(&mut self, ticket: LoadTicket, ranges: Vec<BookedRange>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                "Discarding stale availability (generation {}, current {})",
                ticket.generation,
                self.generation
            );
            return false;
        }

        self.availability = Availability::new(ranges);
        self.loading = false;
        true
    }

    /// Forget the selection, e.g. when the calendar is closed.
    pub fn reset_selection(&mut self) {
        self.selection = SelectionState::Empty;
    }

    /// Route a click through the range selector. Ignored while loading.
    pub fn click(&mut self, click: DayClick) -> Option<SelectionState> {
        if self.loading {
            return None;
        }
        self.selection = select_day(click, self.selection, &self.availability);
        Some(self.selection)
    }

    /// Click a date as the grid would present it on `today`.
    pub fn click_date(&mut self, date: NaiveDate, today: NaiveDate) -> Option<SelectionState> {
        let click = DayClick {
            date,
            is_booked: self.availability.is_booked(date),
            is_past: date < today,
        };
        self.click(click)
    }

    pub fn next_month(&mut self) {
        self.view = self.view.next();
    }

    pub fn prev_month(&mut self) {
        self.view = self.view.prev();
    }

    pub fn show_month_of(&mut self, date: NaiveDate) {
        self.view = MonthCursor::containing(date);
    }

    pub fn grid(&self, today: NaiveDate) -> MonthGrid {
        build_month_grid(
            self.view.year,
            self.view.month,
            self.availability.ranges(),
            &self.selection,
            today,
        )
    }
}
