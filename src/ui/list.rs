// Posts list rendering.
// Styled list view with idle, loading, error, and empty states.

use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::store::QueryState;

/// Render a loading indicator.
fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(text, area);
}

/// Render an error message.
fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let text = Paragraph::new(format!("❌ {}", error))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red));
    frame.render_widget(text, area);
}

/// Render an empty state message.
fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(text, area);
}

/// Render the posts list, matching on the cache query state.
pub fn render_posts_list(frame: &mut Frame, app: &mut App, area: Rect) {
    match &app.slice.query {
        QueryState::Idle => render_empty(frame, area, "Press r to load posts"),
        QueryState::Loading => render_loading(frame, area, "Loading posts"),
        QueryState::Error(e) => render_error(frame, area, e),
        QueryState::Success(posts) | QueryState::Refetching(posts) => {
            if posts.is_empty() {
                render_empty(frame, area, "No posts");
                return;
            }

            let items: Vec<ListItem> = posts
                .iter()
                .map(|post| {
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            format!("{:>4}  ", post.id),
                            Style::default().fg(Color::DarkGray),
                        ),
                        Span::raw(post.title.clone()),
                        Span::styled(
                            format!("  by {}", post.author),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]))
                })
                .collect();

            let title = if app.slice.query.is_fetching() {
                format!(" Posts ({}) refreshing... ", posts.len())
            } else {
                format!(" Posts ({}) ", posts.len())
            };

            let list_widget = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(title))
                .highlight_style(
                    Style::default()
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("> ");

            frame.render_stateful_widget(list_widget, area, &mut app.list_state);
        }
    }
}
