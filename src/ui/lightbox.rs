//! Lightbox overlay for gallery tiles
//!
//! Renders a centered modal with the selected image's location, title,
//! description, and archive date on top of the gallery view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

/// Renders the lightbox overlay on top of the current view
pub fn render(frame: &mut Frame, app: &App) {
    let Some(item) = app.lightbox_tile() else {
        return;
    };

    let area = frame.area();
    let overlay_area = centered_rect(
        area.width.saturating_sub(10).min(72),
        area.height.saturating_sub(4).min(20),
        area,
    );

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let mut lines = vec![
        Line::from(Span::styled(
            item.title.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Image: ", Style::default().fg(Color::DarkGray)),
            Span::styled(item.href.clone(), Style::default().fg(Color::Blue)),
        ]),
    ];

    if let Some(created) = item.date_created {
        lines.push(Line::from(Span::styled(
            created.format("%Y-%m-%d").to_string(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines.push(Line::from(""));

    match item.description {
        Some(ref description) => {
            for text_line in description.lines() {
                lines.push(Line::from(text_line.to_string()));
            }
        }
        None => lines.push(Line::from(Span::styled(
            "No description available.",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Esc to close",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .title(" Image ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, overlay_area);
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
