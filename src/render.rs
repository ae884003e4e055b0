pub mod create_fish;
pub mod fish_page;
pub mod name_modal;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use self::create_fish::render_create_fish;
use self::fish_page::render_fish_page;
use self::name_modal::render_name_modal;
use self::status_bar::{render_footer, render_header};
use crate::app::App;
use crate::router::Route;

/// Render a full frame.
///
/// Header and footer are always shown; the body is the page for the current
/// route, and the name modal is drawn over everything while it is open.
pub fn ui(frame: &mut ratatui::Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    match app.route {
        Route::Listing => render_fish_page(frame, chunks[1], app),
        Route::Create => render_create_fish(frame, chunks[1], app),
    }
    render_footer(frame, chunks[2], app);

    if app.show_modal {
        render_name_modal(frame, frame.area(), app);
    }
}

/// Column just past `text` typed from `start`, kept at or before `limit`.
pub(crate) fn cursor_column(start: u16, text: &str, limit: u16) -> u16 {
    let typed = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
    start.saturating_add(typed).min(limit)
}

/// A rectangle of the given percentage size, centered in `area`.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}
