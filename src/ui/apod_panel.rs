//! Astronomy Picture of the Day panel rendering
//!
//! Renders the home view: title, date, image location, and explanation of
//! today's picture, or a fallback message when the fetch failed.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

/// Renders the APOD panel
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(5),    // content
            Constraint::Length(1), // footer hints
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_content(frame, app, chunks[1]);
    render_footer(frame, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " Astronomy Picture of the Day ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    if let Some(refreshed) = app.last_refresh {
        spans.push(Span::styled(
            format!("updated {}", refreshed.format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);

    frame.render_widget(header, area);
}

fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    // Error state replaces the whole panel body
    if let Some(ref message) = app.apod_error {
        let fallback = Paragraph::new(message.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(fallback, centered_line(area));
        return;
    }

    let Some(ref apod) = app.apod else {
        let loading = Paragraph::new("Loading today's picture...")
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        frame.render_widget(loading, centered_line(area));
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            apod.title.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            apod.date.format("%Y-%m-%d").to_string(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    if !apod.is_image() {
        lines.push(Line::from(Span::styled(
            format!("Today's picture is a {}, not an image.", apod.media_type),
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("Image: ", Style::default().fg(Color::DarkGray)),
        Span::styled(apod.url.clone(), Style::default().fg(Color::Blue)),
    ]));
    lines.push(Line::from(""));

    for text_line in apod.explanation.lines() {
        lines.push(Line::from(text_line.to_string()));
    }

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });

    frame.render_widget(content, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::styled(" g", Style::default().fg(Color::Yellow)),
        Span::raw(" gallery  "),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::raw(" refresh  "),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::raw(" help  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" quit"),
    ]);

    frame.render_widget(Paragraph::new(hints), area);
}

/// Picks the middle line of an area for short centered messages
fn centered_line(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);
    chunks[1]
}
