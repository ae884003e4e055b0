use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::cursor_column;
use crate::app::App;
use crate::record::DraftField;

/// Render the add-fish form. Every input shows the draft value it is bound to.
pub(crate) fn render_create_fish(frame: &mut ratatui::Frame<'_>, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        "Add a new fish",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, chunks[0]);

    for (field, slot) in DraftField::ALL.into_iter().zip(&chunks[1..4]) {
        let focused = app.focus == field && !app.show_modal;
        let border = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let value = app.new_fish.get(field);
        let input = Paragraph::new(value).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(field.label()),
        );
        frame.render_widget(input, *slot);

        if focused {
            let x = cursor_column(slot.x + 1, value, slot.right().saturating_sub(2));
            frame.set_cursor_position(Position::new(x, slot.y + 1));
        }
    }

    let submit = Paragraph::new(Line::from(vec![
        Span::styled("[Enter] ", Style::default().fg(Color::DarkGray)),
        Span::styled("Add Fish", Style::default().add_modifier(Modifier::BOLD)),
    ]));
    frame.render_widget(submit, chunks[4]);
}
