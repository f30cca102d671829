// UI module for rendering the TUI.
// Contains the frame layout, posts list, console pane, and status bar.

mod list;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, ConsoleLevel};

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(3),    // Posts list
            Constraint::Length(7), // Console
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    list::render_posts_list(frame, app, chunks[1]);
    draw_console(frame, app, chunks[2]);
    draw_status_bar(frame, app, chunks[3]);

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Draw the header with the app name and backend URL.
fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            " postdeck ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.base_url(), Style::default().fg(Color::DarkGray)),
    ]);
    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Draw the console pane with the most recent messages.
fn draw_console(frame: &mut Frame, app: &App, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = app
        .console
        .iter()
        .rev()
        .take(visible)
        .rev()
        .map(|msg| {
            let level_style = match msg.level {
                ConsoleLevel::Info => Style::default().fg(Color::Green),
                ConsoleLevel::Warn => Style::default().fg(Color::Yellow),
                ConsoleLevel::Error => Style::default().fg(Color::Red),
            };
            let label = match msg.level {
                ConsoleLevel::Info => " INFO",
                ConsoleLevel::Warn => " WARN",
                ConsoleLevel::Error => "ERROR",
            };
            Line::from(vec![
                Span::styled(
                    format!("{} ", msg.timestamp.format("%H:%M:%S")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(format!("{label} "), level_style),
                Span::raw(msg.text.clone()),
            ])
        })
        .collect();

    let console = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Console "));
    frame.render_widget(console, area);
}

/// Draw the status bar with the query state and key hints.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let query = &app.slice.query;
    let (state_text, state_color) = if query.is_loading() {
        ("loading".to_string(), Color::Yellow)
    } else if query.is_fetching() {
        ("refreshing".to_string(), Color::Yellow)
    } else if let Some(message) = query.error() {
        (format!("error: {message}"), Color::Red)
    } else if let Some(posts) = query.data() {
        if app.slice.stale {
            (format!("{} posts (stale)", posts.len()), Color::Yellow)
        } else {
            (format!("{} posts", posts.len()), Color::Green)
        }
    } else {
        ("idle".to_string(), Color::DarkGray)
    };

    let line = Line::from(vec![
        Span::styled(format!(" {state_text} "), Style::default().fg(state_color)),
        Span::styled(
            "| a add | u update | d delete | r reload | ? help | q quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the help overlay listing key bindings.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();
    let modal_width = 44;
    let modal_height = 12;
    let modal_x = (area.width.saturating_sub(modal_width)) / 2;
    let modal_y = (area.height.saturating_sub(modal_height)) / 2;
    let modal_area = Rect::new(modal_x, modal_y, modal_width, modal_height);

    // Clear the area behind the modal
    frame.render_widget(Clear, modal_area);

    let rows = [
        ("a", "add the sample post"),
        ("u", "update the sample post"),
        ("d", "delete the sample post"),
        ("r", "reload the posts list"),
        ("j / Down", "select next post"),
        ("k / Up", "select previous post"),
        ("?", "toggle this help"),
        ("q", "quit"),
    ];
    let lines: Vec<Line> = rows
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(
                    format!(" {key:>8}  "),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(*desc),
            ])
        })
        .collect();

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Keys "),
    );
    frame.render_widget(help, modal_area);
}
