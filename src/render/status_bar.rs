use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;
use crate::router::Route;

/// Render the header: the two route links, then the greeting or "Log in".
pub(crate) fn render_header(frame: &mut ratatui::Frame<'_>, area: Rect, app: &App) {
    let link = |label: &'static str, key: &'static str, route: Route| {
        let style = if app.route == route {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Cyan)
        };
        [
            Span::styled(label, style),
            Span::styled(format!(" [{}]", key), Style::default().fg(Color::DarkGray)),
            Span::raw("   "),
        ]
    };

    let mut spans = Vec::new();
    spans.extend(link("Fish!", "1", Route::Listing));
    spans.extend(link("Add a Fish!", "2", Route::Create));
    if app.name.is_empty() {
        spans.push(Span::styled(
            "[l] Log in",
            Style::default().fg(Color::Black).bg(Color::Gray),
        ));
    } else {
        spans.push(Span::styled(
            format!("Hello {}", app.name),
            Style::default().fg(Color::Green),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

/// Render key hints for whatever currently has the keyboard.
pub(crate) fn render_footer(frame: &mut ratatui::Frame<'_>, area: Rect, app: &App) {
    let hints = if app.show_modal {
        "type a name  Esc close  Ctrl-C quit"
    } else {
        match app.route {
            Route::Listing => "↑/↓ select  d delete  m more fish  2 add  q quit",
            Route::Create => "Tab next field  Enter add fish  Esc back  Ctrl-C quit",
        }
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        hints,
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(footer, area);
}
