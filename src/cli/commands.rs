use chrono::{Datelike, Local, NaiveDate};

use crate::app::{AppContext, ForestayError, Result};
use crate::availability::Availability;
use crate::config::Config;
use crate::domain::{BookedRange, BookingInquiry};
use crate::grid::{build_month_grid, MonthCursor, MonthGrid, WEEKDAYS};
use crate::selector::{select_day, DayClick, SelectionState};

pub fn list_accommodations(config: &Config) -> Result<()> {
    if config.accommodations.is_empty() {
        println!("No accommodations configured");
        return Ok(());
    }

    for acc in &config.accommodations {
        println!("[{}] {}", acc.id, acc.summary_line());
        if !acc.features.is_empty() {
            println!("  {}", acc.features.join(", "));
        }
        println!("  {} calendar feed(s)", acc.feeds.len());
    }

    Ok(())
}

pub async fn show_availability(
    ctx: &AppContext,
    config: &Config,
    id: &str,
    month: Option<&str>,
) -> Result<()> {
    let acc = config.accommodation(id)?;
    let today = Local::now().date_naive();
    let cursor = match month {
        Some(m) => parse_month(m)?,
        None => MonthCursor::containing(today),
    };

    let ranges = ctx.parallel_fetcher.load_availability(&acc.feeds).await;
    tracing::info!("Loaded {} bookings for {}", ranges.len(), acc.title);

    let grid = build_month_grid(cursor.year, cursor.month, &ranges, &SelectionState::Empty, today);
    println!("{}", acc.title);
    print!("{}", render_month_text(&grid));

    let visible: Vec<&BookedRange> = ranges
        .iter()
        .filter(|r| r.start <= cursor.last_day() && r.end > cursor.first_day())
        .collect();
    if visible.is_empty() {
        println!("No bookings this month");
    } else {
        for range in visible {
            println!(
                "  booked {} - {} ({} nights)",
                range.start.format("%d.%m.%Y"),
                range.end.format("%d.%m.%Y"),
                range.nights()
            );
        }
    }

    Ok(())
}

pub async fn check_stay(
    ctx: &AppContext,
    config: &Config,
    id: &str,
    check_in: &str,
    check_out: &str,
    json: bool,
) -> Result<()> {
    let acc = config.accommodation(id)?;
    let check_in = parse_date(check_in)?;
    let check_out = parse_date(check_out)?;
    let today = Local::now().date_naive();

    let availability = Availability::new(ctx.parallel_fetcher.load_availability(&acc.feeds).await);

    match evaluate_stay(&availability, check_in, check_out, today) {
        StayCheck::Available(selection) => {
            if let Some(inquiry) = BookingInquiry::from_selection(acc, &selection) {
                if json {
                    println!("{}", serde_json::to_string_pretty(&inquiry)?);
                } else {
                    println!("Available: {}", inquiry.summary());
                }
            }
        }
        rejected => println!("Not available: {}", rejected.reason()),
    }

    Ok(())
}

pub async fn ask_guide(ctx: &AppContext, query: &[String]) -> Result<()> {
    let query = query.join(" ");
    let answer = ctx.guide.ask(&query).await;
    println!("{}", answer);
    Ok(())
}

/// Outcome of replaying a check-in click and a check-out click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StayCheck {
    Available(SelectionState),
    InPast,
    CheckInBooked,
    CheckOutBooked,
    NotAfterCheckIn,
    CrossesBooking,
}

impl StayCheck {
    pub fn reason(&self) -> &'static str {
        match self {
            StayCheck::Available(_) => "available",
            StayCheck::InPast => "dates lie in the past",
            StayCheck::CheckInBooked => "check-in day is already booked",
            StayCheck::CheckOutBooked => "check-out day is already booked",
            StayCheck::NotAfterCheckIn => "check-out must be after check-in",
            StayCheck::CrossesBooking => "the stay overlaps an existing booking",
        }
    }
}

pub fn evaluate_stay(
    availability: &Availability,
    check_in: NaiveDate,
    check_out: NaiveDate,
    today: NaiveDate,
) -> StayCheck {
    let click = |date: NaiveDate| DayClick {
        date,
        is_booked: availability.is_booked(date),
        is_past: date < today,
    };

    let (first, second) = (click(check_in), click(check_out));
    if first.is_past || second.is_past {
        return StayCheck::InPast;
    }
    if first.is_booked {
        return StayCheck::CheckInBooked;
    }
    if second.is_booked {
        return StayCheck::CheckOutBooked;
    }
    if check_out <= check_in {
        return StayCheck::NotAfterCheckIn;
    }

    let selection = select_day(first, SelectionState::Empty, availability);
    match select_day(second, selection, availability) {
        complete @ SelectionState::Complete { .. } => StayCheck::Available(complete),
        _ => StayCheck::CrossesBooking,
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ForestayError::InvalidDate(format!("{} (expected YYYY-MM-DD)", s)))
}

/// Parse `YYYY-MM` into a month cursor.
pub fn parse_month(s: &str) -> Result<MonthCursor> {
    parse_date(&format!("{}-01", s.trim()))
        .map(MonthCursor::containing)
        .map_err(|_| ForestayError::InvalidDate(format!("{} (expected YYYY-MM)", s)))
}

/// Plain-text month: booked days carry `*`, past days `.`, today `!`.
pub fn render_month_text(grid: &MonthGrid) -> String {
    let mut out = format!("{:^28}\n", grid.title());
    for day in WEEKDAYS {
        out.push_str(&format!("{:>4}", day));
    }
    out.push('\n');

    for week in grid.weeks() {
        let line: String = week
            .iter()
            .map(|slot| match slot {
                Some(cell) => {
                    let marker = if cell.is_booked {
                        '*'
                    } else if cell.is_past {
                        '.'
                    } else if cell.is_today {
                        '!'
                    } else {
                        ' '
                    };
                    format!("{:>3}{}", cell.date.day(), marker)
                }
                None => "    ".to_string(),
            })
            .collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn availability() -> Availability {
        Availability::new(vec![BookedRange::new(d(2025, 7, 10), d(2025, 7, 14)).unwrap()])
    }

    #[test]
    fn test_evaluate_free_stay() {
        let today = d(2025, 7, 1);
        let result = evaluate_stay(&availability(), d(2025, 7, 14), d(2025, 7, 18), today);
        assert_eq!(
            result,
            StayCheck::Available(SelectionState::Complete {
                start: d(2025, 7, 14),
                end: d(2025, 7, 18)
            })
        );
    }

    #[test]
    fn test_evaluate_rejections() {
        let today = d(2025, 7, 5);
        let avail = availability();
        assert_eq!(evaluate_stay(&avail, d(2025, 7, 1), d(2025, 7, 3), today), StayCheck::InPast);
        assert_eq!(evaluate_stay(&avail, d(2025, 7, 11), d(2025, 7, 20), today), StayCheck::CheckInBooked);
        assert_eq!(evaluate_stay(&avail, d(2025, 7, 6), d(2025, 7, 10), today), StayCheck::CheckOutBooked);
        assert_eq!(evaluate_stay(&avail, d(2025, 7, 8), d(2025, 7, 8), today), StayCheck::NotAfterCheckIn);
        assert_eq!(evaluate_stay(&avail, d(2025, 7, 6), d(2025, 7, 20), today), StayCheck::CrossesBooking);
    }

    #[test]
    fn test_parse_date_and_month() {
        assert_eq!(parse_date("2025-03-01").unwrap(), d(2025, 3, 1));
        assert!(matches!(parse_date("01.03.2025"), Err(ForestayError::InvalidDate(_))));

        let cursor = parse_month("2024-02").unwrap();
        assert_eq!((cursor.year, cursor.month), (2024, 1));
        assert!(parse_month("2024-13").is_err());
    }

    #[test]
    fn test_render_month_text() {
        let ranges = vec![BookedRange::new(d(2024, 2, 10), d(2024, 2, 12)).unwrap()];
        let grid = build_month_grid(2024, 1, &ranges, &SelectionState::Empty, d(2024, 2, 5));
        let text = render_month_text(&grid);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0].trim(), "February 2024");
        assert_eq!(lines[1], "  Su  Mo  Tu  We  Th  Fr  Sa");
        // Thursday start: four blank cells, then 1st to 3rd as past days
        assert_eq!(lines[2], "                  1.  2.  3.");
        assert!(lines[3].contains(" 5!"));
        assert!(lines[3].contains("10*"));
        assert!(lines[4].contains("11*"));
        assert!(lines[4].contains("12 "));
        assert_eq!(lines.len(), 7);
    }
}
