//! All-day event extraction from iCalendar feeds.
//!
//! Content lines are unfolded and tokenized by the `ical` crate. Only
//! `DTSTART`/`DTEND` properties carrying `VALUE=DATE` inside `VEVENT`
//! blocks matter; every other property is skipped.

use ::ical::property::Property;
use ::ical::{LineReader, PropertyParser};
use chrono::NaiveDate;

use crate::domain::BookedRange;

const EVENT: &str = "VEVENT";

/// Parse a feed into booked ranges, in source order.
///
/// Blocks lacking a start or end, or whose end is not after the start,
/// are dropped without affecting the rest of the feed.
pub fn parse(raw: &str) -> Vec<BookedRange> {
    let normalized = normalize_line_endings(raw);
    let properties = PropertyParser::new(LineReader::new(normalized.as_bytes()));

    let mut ranges = Vec::new();
    let mut start: Option<NaiveDate> = None;
    let mut end: Option<NaiveDate> = None;

    for property in properties {
        let property = match property {
            Ok(property) => property,
            Err(e) => {
                tracing::debug!("Skipping malformed content line: {}", e);
                continue;
            }
        };

        let name = property.name.as_str();
        if name.eq_ignore_ascii_case("BEGIN") && has_value(&property, EVENT) {
            start = None;
            end = None;
        } else if name.eq_ignore_ascii_case("DTSTART") && is_all_day(&property) {
            start = property.value.as_deref().and_then(decode_date);
        } else if name.eq_ignore_ascii_case("DTEND") && is_all_day(&property) {
            end = property.value.as_deref().and_then(decode_date);
        } else if name.eq_ignore_ascii_case("END") && has_value(&property, EVENT) {
            match (start.take(), end.take()) {
                (Some(s), Some(e)) => match BookedRange::new(s, e) {
                    Some(range) => ranges.push(range),
                    None => tracing::debug!("Dropping empty event {} - {}", s, e),
                },
                _ => tracing::debug!("Dropping event without all-day start and end"),
            }
        }
    }

    ranges
}

fn has_value(property: &Property, expected: &str) -> bool {
    property
        .value
        .as_deref()
        .is_some_and(|value| value.trim().eq_ignore_ascii_case(expected))
}

/// `true` when the property carries a `VALUE=DATE` parameter.
fn is_all_day(property: &Property) -> bool {
    property.params.as_ref().is_some_and(|params| {
        params.iter().any(|(key, values)| {
            key.eq_ignore_ascii_case("VALUE") && values.iter().any(|v| v.eq_ignore_ascii_case("DATE"))
        })
    })
}

// The line reader only splits on `\n`; some feeds end lines with a bare `\r`.
fn normalize_line_endings(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

/// Decode a `YYYYMMDD` token as a plain calendar date.
///
/// Anything that is not exactly eight ASCII digits naming a real date
/// (date-times, truncated tokens, `20250230`) yields `None`.
pub fn decode_date(token: &str) -> Option<NaiveDate> {
    let token = token.trim();
    if token.len() != 8 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year: i32 = token[0..4].parse().ok()?;
    let month: u32 = token[4..6].parse().ok()?;
    let day: u32 = token[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AIRBNB_SAMPLE: &str = "BEGIN:VCALENDAR\r\n\
PRODID:-//Airbnb Inc//Hosting Calendar 1.0//EN\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
DTEND;VALUE=DATE:20250305\r\n\
DTSTART;VALUE=DATE:20250301\r\n\
UID:a1@airbnb.com\r\n\
SUMMARY:Reserved\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
DTEND;VALUE=DATE:20250320\r\n\
DTSTART;VALUE=DATE:20250315\r\n\
UID:a2@airbnb.com\r\n\
SUMMARY:Airbnb (Not available)\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_airbnb_feed() {
        let ranges = parse(AIRBNB_SAMPLE);
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].start, d(2025, 3, 1));
        assert_eq!(ranges[0].end, d(2025, 3, 5));
        assert_eq!(ranges[1].start, d(2025, 3, 15));
        assert_eq!(ranges[1].end, d(2025, 3, 20));
    }

    #[test]
    fn test_parse_is_deterministic() {
        assert_eq!(parse(AIRBNB_SAMPLE), parse(AIRBNB_SAMPLE));
    }

    #[test]
    fn test_parse_handles_all_line_endings() {
        let lf = AIRBNB_SAMPLE.replace("\r\n", "\n");
        let cr = AIRBNB_SAMPLE.replace("\r\n", "\r");
        assert_eq!(parse(&lf), parse(AIRBNB_SAMPLE));
        assert_eq!(parse(&cr), parse(AIRBNB_SAMPLE));
    }

    #[test]
    fn test_block_without_end_is_dropped() {
        let raw = "BEGIN:VEVENT\n\
DTSTART;VALUE=DATE:20250101\n\
DTEND;VALUE=DATE:20250103\n\
END:VEVENT\n\
BEGIN:VEVENT\n\
DTSTART;VALUE=DATE:20250110\n\
END:VEVENT\n\
BEGIN:VEVENT\n\
DTSTART;VALUE=DATE:20250120\n\
DTEND;VALUE=DATE:20250122\n\
END:VEVENT\n";

        let ranges = parse(raw);
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].start, d(2025, 1, 1));
        assert_eq!(ranges[1].start, d(2025, 1, 20));
    }

    #[test]
    fn test_unterminated_block_does_not_leak_into_next() {
        let raw = "BEGIN:VEVENT\n\
DTSTART;VALUE=DATE:20250110\n\
BEGIN:VEVENT\n\
DTEND;VALUE=DATE:20250122\n\
END:VEVENT\n";

        assert!(parse(raw).is_empty());
    }

    #[test]
    fn test_datetime_and_truncated_tokens_ignored() {
        let raw = "BEGIN:VEVENT\n\
DTSTART:20250110T140000Z\n\
DTEND;VALUE=DATE:20250112\n\
END:VEVENT\n\
BEGIN:VEVENT\n\
DTSTART;VALUE=DATE:202501\n\
DTEND;VALUE=DATE:20250112\n\
END:VEVENT\n";

        assert!(parse(raw).is_empty());
    }

    #[test]
    fn test_zero_length_event_dropped() {
        let raw = "BEGIN:VEVENT\n\
DTSTART;VALUE=DATE:20250110\n\
DTEND;VALUE=DATE:20250110\n\
END:VEVENT\n";

        assert!(parse(raw).is_empty());
    }

    #[test]
    fn test_folded_start_line_is_unfolded() {
        let raw = "BEGIN:VEVENT\r\n\
DTSTART;VALUE=DATE:2025\r\n 0301\r\n\
DTEND;VALUE=DATE:20250305\r\n\
END:VEVENT\r\n";

        let ranges = parse(raw);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].start, d(2025, 3, 1));
        assert_eq!(ranges[0].end, d(2025, 3, 5));
    }

    #[test]
    fn test_params_and_names_are_case_insensitive() {
        let raw = "begin:vevent\r\n\
DTSTART;value=date:20250301\r\n\
dtend;Value=Date:20250305\r\n\
end:vevent\r\n";

        let ranges = parse(raw);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].start, d(2025, 3, 1));
        assert_eq!(ranges[0].end, d(2025, 3, 5));
    }

    #[test]
    fn test_extra_params_still_count_as_all_day() {
        let raw = "BEGIN:VEVENT\n\
DTSTART;TZID=Europe/Berlin;VALUE=DATE:20250301\n\
DTEND;VALUE=DATE:20250302\n\
END:VEVENT\n";

        assert_eq!(parse(raw).len(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_decode_date() {
        assert_eq!(decode_date("20250301"), Some(d(2025, 3, 1)));
        assert_eq!(decode_date("20240229"), Some(d(2024, 2, 29)));
        assert_eq!(decode_date(" 20251231 "), Some(d(2025, 12, 31)));
    }

    #[test]
    fn test_decode_date_rejects_bad_tokens() {
        assert_eq!(decode_date("20250230"), None);
        assert_eq!(decode_date("2025031"), None);
        assert_eq!(decode_date("20250301T000000"), None);
        assert_eq!(decode_date("2025-3-01"), None);
        assert_eq!(decode_date(""), None);
    }
}
