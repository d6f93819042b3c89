//! # forestay
//!
//! Availability calendar for forest holiday homes.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → iCal parser → Availability → Range selector → Calendar UI
//! ```
//!
//! Calendar feeds are fetched through a relay, reduced to booked date
//! ranges, and shown as a month grid on which a visitor picks a check-in
//! and check-out day. Feeds are only ever read.
//!
//! ## Quick Start
//!
//! ```bash
//! # List accommodations
//! forestay list
//!
//! # Show this month for accommodation 1
//! forestay availability 1
//!
//! # Can we stay from the 3rd to the 7th?
//! forestay check 1 2025-08-03 2025-08-07
//!
//! # Launch the calendar
//! forestay tui
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the fetchers
/// and the guide client.
pub mod app;

/// Booked-day lookups over a set of [`BookedRange`](domain::BookedRange)s.
pub mod availability;

/// Command-line interface using clap.
///
/// - `list` - List accommodations
/// - `availability <id>` - Print a month grid
/// - `check <id> <in> <out>` - Validate a stay
/// - `guide <query>` - Ask the local guide
/// - `tui` - Launch the calendar
pub mod cli;

/// Configuration loaded from `~/.config/forestay/config.toml`:
/// relay, guide, accommodations, colors and keybindings.
pub mod config;

/// Core domain models.
///
/// - [`BookedRange`](domain::BookedRange): half-open booked interval
/// - [`Accommodation`](domain::Accommodation): a bookable unit and its feeds
/// - [`BookingInquiry`](domain::BookingInquiry): a finished selection
pub mod domain;

/// Feed fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for feed fetching
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based, relay aware
/// - [`ParallelFetcher`](fetcher::parallel::ParallelFetcher): concurrent, fault tolerant
pub mod fetcher;

/// Month grid arithmetic.
pub mod grid;

/// The local guide client.
pub mod guide;

/// iCalendar all-day event parsing.
pub mod ical;

/// Check-in/check-out state machine.
pub mod selector;

/// Per-calendar state with stale-load protection.
pub mod session;

/// Terminal calendar built with ratatui.
///
/// Keybindings: hjkl move, n/p change month, Enter selects,
/// Esc clears, b prepares an inquiry, Tab switches accommodation, q quits.
pub mod tui;
