//! Color configuration for the calendar view.

use ratatui::style::Color;
use serde::{de, Deserialize, Deserializer};

/// Configuration for all calendar colors.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub header: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub weekday: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub free_day: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub booked_day: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub past_day: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub today: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub range_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub cursor_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_bg: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            border: Color::Green,
            header: Color::White,
            weekday: Color::DarkGray,
            free_day: Color::White,
            booked_day: Color::LightRed,
            past_day: Color::DarkGray,
            today: Color::Yellow,
            selection_bg: Color::Green,
            selection_fg: Color::Black,
            range_bg: Color::DarkGray,
            cursor_bg: Color::Blue,
            status_fg: Color::White,
            status_bg: Color::DarkGray,
        }
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color_string(&s).map_err(de::Error::custom)
}

const NAMED_COLORS: [(&str, Color); 17] = [
    ("black", Color::Black),
    ("red", Color::Red),
    ("green", Color::Green),
    ("yellow", Color::Yellow),
    ("blue", Color::Blue),
    ("magenta", Color::Magenta),
    ("cyan", Color::Cyan),
    ("gray", Color::Gray),
    ("darkgray", Color::DarkGray),
    ("lightred", Color::LightRed),
    ("lightgreen", Color::LightGreen),
    ("lightyellow", Color::LightYellow),
    ("lightblue", Color::LightBlue),
    ("lightmagenta", Color::LightMagenta),
    ("lightcyan", Color::LightCyan),
    ("white", Color::White),
    ("reset", Color::Reset),
];

/// Parse a named color (case-insensitive, "grey" accepted) or a
/// `#RRGGBB` / `#RGB` hex code.
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| format!("Invalid hex color: {}", s));
    }

    let name = s.to_lowercase().replace("grey", "gray");
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, c)| *c)
        .ok_or_else(|| format!("Unknown color: {}", s))
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        // #RGB doubles each digit
        3 => Some(Color::Rgb(
            channel(&hex[0..1])? * 17,
            channel(&hex[1..2])? * 17,
            channel(&hex[2..3])? * 17,
        )),
        _ => None,
    }
}
