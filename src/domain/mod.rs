pub mod accommodation;
pub mod inquiry;
pub mod range;

pub use accommodation::{default_accommodations, Accommodation, AccommodationKind};
pub use inquiry::BookingInquiry;
pub use range::BookedRange;
