use chrono::{Duration, NaiveDate};

use crate::domain::{Accommodation, BookingInquiry};
use crate::session::CalendarSession;

pub struct TuiApp {
    pub accommodations: Vec<Accommodation>,
    pub accommodation_index: usize,
    pub session: CalendarSession,
    /// Day under the keyboard cursor.
    pub cursor: NaiveDate,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub inquiry: Option<BookingInquiry>,
}

impl TuiApp {
    pub fn new(accommodations: Vec<Accommodation>, today: NaiveDate) -> Self {
        Self {
            accommodations,
            accommodation_index: 0,
            session: CalendarSession::new(today),
            cursor: today,
            should_quit: false,
            status_message: None,
            inquiry: None,
        }
    }

    pub fn selected_accommodation(&self) -> Option<&Accommodation> {
        self.accommodations.get(self.accommodation_index)
    }

    /// Move the cursor by `days`, following it into other months.
    pub fn move_cursor(&mut self, days: i64) {
        if let Some(next) = self.cursor.checked_add_signed(Duration::days(days)) {
            self.cursor = next;
            if !self.session.view().contains(next) {
                self.session.show_month_of(next);
            }
        }
    }

    /// Show the next month and keep the cursor inside it.
    pub fn next_month(&mut self) {
        self.session.next_month();
        self.cursor = self.session.view().first_day();
    }

    pub fn prev_month(&mut self) {
        self.session.prev_month();
        self.cursor = self.session.view().first_day();
    }

    pub fn jump_to(&mut self, date: NaiveDate) {
        self.cursor = date;
        self.session.show_month_of(date);
    }

    /// Cycle to the next accommodation; the caller must start a new load.
    pub fn next_accommodation(&mut self) -> bool {
        if self.accommodations.len() < 2 {
            return false;
        }
        self.accommodation_index = (self.accommodation_index + 1) % self.accommodations.len();
        self.inquiry = None;
        true
    }

    pub fn prev_accommodation(&mut self) -> bool {
        if self.accommodations.len() < 2 {
            return false;
        }
        self.accommodation_index = self
            .accommodation_index
            .checked_sub(1)
            .unwrap_or(self.accommodations.len() - 1);
        self.inquiry = None;
        true
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::default_accommodations;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_cursor_follows_into_next_month() {
        let mut app = TuiApp::new(default_accommodations(), d(2025, 1, 30));
        app.move_cursor(7);
        assert_eq!(app.cursor, d(2025, 2, 6));
        assert_eq!(app.session.view().month, 1);
        app.move_cursor(-7);
        assert_eq!(app.session.view().month, 0);
    }

    #[test]
    fn test_month_paging_moves_cursor() {
        let mut app = TuiApp::new(default_accommodations(), d(2025, 12, 20));
        app.next_month();
        assert_eq!(app.cursor, d(2026, 1, 1));
        app.prev_month();
        app.prev_month();
        assert_eq!(app.cursor, d(2025, 11, 1));
    }

    #[test]
    fn test_accommodation_cycling() {
        let mut app = TuiApp::new(default_accommodations(), d(2025, 1, 1));
        assert!(app.next_accommodation());
        assert_eq!(app.selected_accommodation().unwrap().id, "2");
        assert!(app.next_accommodation());
        assert_eq!(app.selected_accommodation().unwrap().id, "1");
        assert!(app.prev_accommodation());
        assert_eq!(app.selected_accommodation().unwrap().id, "2");
    }

    #[test]
    fn test_single_accommodation_does_not_cycle() {
        let mut accommodations = default_accommodations();
        accommodations.truncate(1);
        let mut app = TuiApp::new(accommodations, d(2025, 1, 1));
        assert!(!app.next_accommodation());
        assert!(!app.prev_accommodation());
    }
}
