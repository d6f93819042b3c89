use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccommodationKind {
    House,
    Apartment,
}

impl AccommodationKind {
    pub fn label(self) -> &'static str {
        match self {
            AccommodationKind::House => "House",
            AccommodationKind::Apartment => "Apartment",
        }
    }
}

/// A bookable unit. Its availability is the union of all `feeds`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Accommodation {
    pub id: String,
    pub title: String,
    pub kind: AccommodationKind,
    pub guests: u32,
    pub bedrooms: u32,
    /// Nightly price in EUR.
    pub price: u32,
    pub rating: f32,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub feeds: Vec<String>,
}

impl Accommodation {
    pub fn summary_line(&self) -> String {
        format!(
            "{} ({}, {} guests, {} bedrooms, {} EUR/night, {:.1}★)",
            self.title,
            self.kind.label(),
            self.guests,
            self.bedrooms,
            self.price,
            self.rating
        )
    }
}

/// The two listings the site launched with.
pub fn default_accommodations() -> Vec<Accommodation> {
    vec![
        Accommodation {
            id: "1".to_string(),
            title: "Waldhaus \"Fuchsbau\"".to_string(),
            kind: AccommodationKind::House,
            guests: 6,
            bedrooms: 3,
            price: 145,
            rating: 4.9,
            features: vec!["Fireplace".into(), "Sauna".into(), "Forest edge".into()],
            feeds: vec![
                "https://www.airbnb.com/calendar/ical/1345608403986703089.ics?s=ec334041650d51a74b6320bad50d39fe&locale=de".to_string(),
            ],
        },
        Accommodation {
            id: "2".to_string(),
            title: "Apartment \"Tannenzapfen\"".to_string(),
            kind: AccommodationKind::Apartment,
            guests: 4,
            bedrooms: 2,
            price: 95,
            rating: 4.8,
            features: vec!["Balcony".into(), "WiFi".into(), "Kid friendly".into()],
            feeds: vec![
                "https://www.airbnb.com/calendar/ical/947626755793190991.ics?s=3395a9b3a16d5e736b454360ff356602&locale=de".to_string(),
            ],
        },
    ]
}
