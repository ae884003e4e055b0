use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::{centered_rect, cursor_column};
use crate::app::App;

/// Render the name dialog over `area`.
///
/// There is no confirm control: the name is already stored as it is typed,
/// and "X" only hides the dialog.
pub(crate) fn render_name_modal(frame: &mut ratatui::Frame<'_>, area: Rect, app: &App) {
    let popup = centered_rect(50, 20, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Log in")
        .title(Line::from("X [Esc]").right_aligned());
    let inner = block.inner(popup);

    let input = if app.modal_input.is_empty() {
        Span::styled("Enter name here", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.modal_input.as_str())
    };
    frame.render_widget(Paragraph::new(Line::from(input)).block(block), popup);

    if inner.height > 0 {
        let x = cursor_column(inner.x, &app.modal_input, inner.right().saturating_sub(1));
        frame.set_cursor_position(Position::new(x, inner.y));
    }
}
