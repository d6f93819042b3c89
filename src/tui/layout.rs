use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::grid::{CalendarCell, WEEKDAYS};
use crate::selector::SelectionState;
use crate::tui::app::TuiApp;

const CELL_WIDTH: usize = 4;

pub fn render(frame: &mut Frame, app: &TuiApp, colors: &ColorConfig, today: NaiveDate) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Accommodation header
            Constraint::Length(11), // Month grid
            Constraint::Min(4),     // Selection / inquiry
            Constraint::Length(1),  // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, colors, chunks[0]);
    render_calendar(frame, app, colors, today, chunks[1]);
    render_selection(frame, app, colors, chunks[2]);
    render_status_bar(frame, app, colors, chunks[3]);
}

fn bordered(title: String, colors: &ColorConfig) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
}

fn render_header(frame: &mut Frame, app: &TuiApp, colors: &ColorConfig, area: Rect) {
    let text = match app.selected_accommodation() {
        Some(acc) => acc.summary_line(),
        None => "No accommodations configured".to_string(),
    };
    let title = format!(
        " Accommodation {}/{} ",
        (app.accommodation_index + 1).min(app.accommodations.len()),
        app.accommodations.len()
    );

    let paragraph = Paragraph::new(Span::styled(
        text,
        Style::default().fg(colors.header).add_modifier(Modifier::BOLD),
    ))
    .block(bordered(title, colors));
    frame.render_widget(paragraph, area);
}

fn render_calendar(frame: &mut Frame, app: &TuiApp, colors: &ColorConfig, today: NaiveDate, area: Rect) {
    let view = app.session.view();
    let title = format!(" {} {} ", view.name(), view.year);
    let block = bordered(title, colors);

    if app.session.is_loading() {
        let paragraph = Paragraph::new("Loading availability...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(colors.weekday))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let grid = app.session.grid(today);
    let mut lines = Vec::new();

    lines.push(Line::from(
        WEEKDAYS
            .iter()
            .map(|day| {
                Span::styled(
                    format!("{:>width$}", day, width = CELL_WIDTH),
                    Style::default().fg(colors.weekday),
                )
            })
            .collect::<Vec<_>>(),
    ));

    for week in grid.weeks() {
        let spans: Vec<Span> = week
            .into_iter()
            .map(|slot| match slot {
                Some(cell) => Span::styled(
                    format!("{:>width$}", cell.date.day(), width = CELL_WIDTH),
                    cell_style(cell, cell.date == app.cursor, colors),
                ),
                None => Span::raw(" ".repeat(CELL_WIDTH)),
            })
            .collect();
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  ■ ", Style::default().fg(colors.selection_bg)),
        Span::raw("Selection  "),
        Span::styled("■ ", Style::default().fg(colors.booked_day)),
        Span::raw("Booked"),
    ]));

    let paragraph = Paragraph::new(Text::from(lines)).block(block);
    frame.render_widget(paragraph, area);
}

fn cell_style(cell: &CalendarCell, is_cursor: bool, colors: &ColorConfig) -> Style {
    let mut style = if cell.is_past {
        Style::default().fg(colors.past_day)
    } else if cell.is_booked {
        Style::default()
            .fg(colors.booked_day)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(colors.free_day)
    };

    if cell.is_today && !cell.is_booked {
        style = style.fg(colors.today).add_modifier(Modifier::BOLD);
    }
    if cell.is_in_range {
        style = style.bg(colors.range_bg);
    }
    if cell.is_selected_start || cell.is_selected_end {
        style = style
            .bg(colors.selection_bg)
            .fg(colors.selection_fg)
            .add_modifier(Modifier::BOLD);
    }
    if is_cursor {
        style = style.bg(colors.cursor_bg).add_modifier(Modifier::UNDERLINED);
    }

    style
}

fn render_selection(frame: &mut Frame, app: &TuiApp, colors: &ColorConfig, area: Rect) {
    let mut lines = Vec::new();

    match app.session.selection() {
        SelectionState::Empty => lines.push(Line::from("Pick a check-in date")),
        SelectionState::Partial { start } => {
            lines.push(Line::from(format!("Check-in:  {}", start.format("%d.%m.%Y"))));
            lines.push(Line::from(Span::styled(
                "Choose a check-out date...",
                Style::default().add_modifier(Modifier::ITALIC),
            )));
        }
        SelectionState::Complete { start, end } => {
            lines.push(Line::from(format!("Check-in:  {}", start.format("%d.%m.%Y"))));
            lines.push(Line::from(format!("Check-out: {}", end.format("%d.%m.%Y"))));
            lines.push(Line::from(format!("Nights:    {}", (end - start).num_days())));
        }
    }

    if let Some(inquiry) = &app.inquiry {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Inquiry: {}", inquiry.summary()),
            Style::default().fg(colors.today).add_modifier(Modifier::BOLD),
        )));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(bordered(" Your stay ".to_string(), colors))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, colors: &ColorConfig, area: Rect) {
    let status = if let Some(ref msg) = app.status_message {
        msg.clone()
    } else if app.session.is_loading() {
        "Loading availability...".to_string()
    } else {
        "hjkl:Move  n/p:Month  Enter:Select  Esc:Clear  b:Book  Tab:House  R:Reload  q:Quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}
