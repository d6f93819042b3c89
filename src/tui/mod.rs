pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::app::{AppContext, Result};
use crate::config::Config;
use crate::domain::{BookedRange, BookingInquiry};
use crate::selector::SelectionState;
use crate::session::LoadTicket;

use self::app::TuiApp;
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

type LoadResult = (LoadTicket, Vec<BookedRange>);

pub async fn run(ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx, config).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    let today = Local::now().date_naive();
    let mut tui_app = TuiApp::new(config.accommodations.clone(), today);
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let (tx, mut rx) = unbounded_channel::<LoadResult>();

    start_load(&mut tui_app, &ctx, &tx);

    loop {
        // Re-read the clock every frame so the grid rolls over at midnight
        let today = Local::now().date_naive();
        terminal.draw(|frame| layout::render(frame, &tui_app, &config.colors, today))?;

        if let AppEvent::Key(key) = event_handler.next()? {
            tui_app.clear_status();
            match config.keybindings.get_action(&key) {
                Action::Quit => {
                    tui_app.should_quit = true;
                }
                Action::MoveLeft => tui_app.move_cursor(-1),
                Action::MoveRight => tui_app.move_cursor(1),
                Action::MoveUp => tui_app.move_cursor(-7),
                Action::MoveDown => tui_app.move_cursor(7),
                Action::NextMonth => tui_app.next_month(),
                Action::PrevMonth => tui_app.prev_month(),
                Action::Today => tui_app.jump_to(today),
                Action::NextAccommodation => {
                    if tui_app.next_accommodation() {
                        start_load(&mut tui_app, &ctx, &tx);
                    }
                }
                Action::PrevAccommodation => {
                    if tui_app.prev_accommodation() {
                        start_load(&mut tui_app, &ctx, &tx);
                    }
                }
                Action::Reload => {
                    start_load(&mut tui_app, &ctx, &tx);
                }
                Action::Select => select_cursor_day(&mut tui_app, today),
                Action::ClearSelection => {
                    tui_app.session.reset_selection();
                    tui_app.inquiry = None;
                }
                Action::Book => prepare_inquiry(&mut tui_app),
                Action::None => {}
            }
        }

        drain_loads(&mut tui_app, &mut rx);

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Spawn a load for the current accommodation. Any older load still in
/// flight becomes stale.
fn start_load(tui_app: &mut TuiApp, ctx: &AppContext, tx: &UnboundedSender<LoadResult>) {
    let feeds = tui_app
        .selected_accommodation()
        .map(|a| a.feeds.clone())
        .unwrap_or_default();
    tui_app.inquiry = None;
    let ticket = tui_app.session.begin_load();

    let parallel = ctx.parallel_fetcher.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let ranges = parallel.load_availability(&feeds).await;
        // The receiver is gone once the TUI has exited
        let _ = tx.send((ticket, ranges));
    });
}

fn drain_loads(tui_app: &mut TuiApp, rx: &mut UnboundedReceiver<LoadResult>) {
    while let Ok((ticket, ranges)) = rx.try_recv() {
        let count = ranges.len();
        if tui_app.session.finish_load(ticket, ranges) {
            let title = tui_app
                .selected_accommodation()
                .map(|a| a.title.clone())
                .unwrap_or_default();
            tracing::info!("Loaded {} bookings for {}", count, title);
            tui_app.set_status(format!("{}: {} bookings loaded", title, count));
        }
    }
}

fn select_cursor_day(tui_app: &mut TuiApp, today: chrono::NaiveDate) {
    let grid = tui_app.session.grid(today);
    let Some(cell) = grid.cell(tui_app.cursor).copied() else {
        return;
    };

    if cell.is_past {
        tui_app.set_status("That day is in the past".to_string());
        return;
    }
    if cell.is_booked {
        tui_app.set_status(format!("{} is already booked", cell.date.format("%d.%m.%Y")));
        return;
    }

    tui_app.inquiry = None;
    match tui_app.session.click(cell.click()) {
        None => tui_app.set_status("Still loading availability...".to_string()),
        Some(SelectionState::Partial { start }) => tui_app.set_status(format!(
            "Check-in {}. Choose a check-out date...",
            start.format("%d.%m.%Y")
        )),
        Some(SelectionState::Complete { start, end }) => tui_app.set_status(format!(
            "{} - {} selected. Press b to request booking",
            start.format("%d.%m.%Y"),
            end.format("%d.%m.%Y")
        )),
        Some(SelectionState::Empty) => {}
    }
}

fn prepare_inquiry(tui_app: &mut TuiApp) {
    let selection = tui_app.session.selection();
    let inquiry = tui_app
        .selected_accommodation()
        .and_then(|acc| BookingInquiry::from_selection(acc, &selection));

    match inquiry {
        Some(inquiry) => {
            tracing::info!("Booking inquiry prepared: {}", inquiry.summary());
            tui_app.set_status(format!("Inquiry ready: {}", inquiry.summary()));
            tui_app.inquiry = Some(inquiry);
        }
        None => tui_app.set_status("Select a check-in and check-out date first".to_string()),
    }
}
