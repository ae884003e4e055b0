use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::app::App;
use crate::record::FishRecord;

/// Render the listing: one card per fish, then the "Get More Fish" control.
pub(crate) fn render_fish_page(frame: &mut ratatui::Frame<'_>, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    let items: Vec<ListItem> = app.fishes.iter().map(fish_card).collect();
    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::Rgb(30, 40, 60)))
        .highlight_symbol("▌ ");
    let mut state = ListState::default();
    if !app.fishes.is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let more = Paragraph::new(Line::from(vec![
        Span::styled("Get More Fish", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(" [m]", Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(more, chunks[1]);
}

fn fish_card(fish: &FishRecord) -> ListItem<'_> {
    ListItem::new(Text::from(vec![
        Line::from(Span::styled(
            fish.species.as_str(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  image: ", Style::default().fg(Color::DarkGray)),
            Span::raw(fish.display_image()),
        ]),
        Line::from(format!("  {}", fish.display_comments())),
        Line::from(Span::styled("  Delete Fish [d]", Style::default().fg(Color::Red))),
        Line::default(),
    ]))
}
