use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::Accommodation;
use crate::selector::SelectionState;

/// What the booking form receives once a stay has been picked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingInquiry {
    pub accommodation_id: String,
    pub title: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub estimated_total: i64,
}

impl BookingInquiry {
    /// Only a complete selection can become an inquiry.
    pub fn from_selection(accommodation: &Accommodation, selection: &SelectionState) -> Option<Self> {
        let SelectionState::Complete { start, end } = *selection else {
            return None;
        };

        let nights = (end - start).num_days();
        Some(Self {
            accommodation_id: accommodation.id.clone(),
            title: accommodation.title.clone(),
            check_in: start,
            check_out: end,
            nights,
            estimated_total: nights * i64::from(accommodation.price),
        })
    }

    pub fn display_period(&self) -> String {
        format!(
            "{} - {}",
            self.check_in.format("%d.%m.%Y"),
            self.check_out.format("%d.%m.%Y")
        )
    }

    pub fn summary(&self) -> String {
        let unit = if self.nights == 1 { "night" } else { "nights" };
        format!(
            "{}: {} ({} {}, approx. {} EUR)",
            self.title,
            self.display_period(),
            self.nights,
            unit,
            self.estimated_total
        )
    }
}
