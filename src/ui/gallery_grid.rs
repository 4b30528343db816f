//! Gallery grid rendering
//!
//! Renders the image library view: a grid of tiles for the current page,
//! a selection highlight, and a pagination footer. Empty pages and fetch
//! failures get explicit messages in place of the grid.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, GRID_COLS};
use crate::data::PAGE_SIZE;

/// Number of tile rows in the grid
const GRID_ROWS: usize = PAGE_SIZE / GRID_COLS;

/// Renders the gallery view
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(6),    // grid
            Constraint::Length(1), // pagination footer
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_grid(frame, app, chunks[1]);
    render_pagination(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        format!(" NASA Image Library: {} ", app.query),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(title, area);
}

fn render_grid(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(ref message) = app.gallery_error {
        render_notice(frame, area, message, Color::Red);
        return;
    }

    if !app.gallery_loaded {
        render_notice(frame, area, "Loading images...", Color::Cyan);
        return;
    }

    if app.gallery_items.is_empty() {
        render_notice(frame, area, "No images found", Color::Yellow);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, GRID_ROWS as u32); GRID_ROWS])
        .split(area);

    for (row_index, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, GRID_COLS as u32); GRID_COLS])
            .split(*row_area);

        for (col_index, col_area) in cols.iter().enumerate() {
            let tile_index = row_index * GRID_COLS + col_index;
            if let Some(item) = app.gallery_items.get(tile_index) {
                render_tile(frame, *col_area, &item.title, tile_index == app.selected_tile);
            }
        }
    }
}

/// Renders one bordered tile with an image placeholder and the title
fn render_tile(frame: &mut Frame, area: Rect, title: &str, selected: bool) {
    let border_style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let lines = vec![
        Line::from(Span::styled(
            "\u{1F5BC}", // 🖼
            Style::default().fg(Color::Blue),
        )),
        Line::from(Span::styled(
            title.to_string(),
            if selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            },
        )),
    ];

    let tile = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).border_style(border_style))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(tile, area);
}

fn render_pagination(frame: &mut Frame, app: &App, area: Rect) {
    let prev_style = if app.page > 1 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let footer = Line::from(vec![
        Span::styled(format!(" Page {} ", app.page), Style::default().fg(Color::Cyan)),
        Span::raw("| "),
        Span::styled("p", prev_style),
        Span::styled(" prev  ", prev_style),
        Span::styled("n", Style::default().fg(Color::Yellow)),
        Span::raw(" next  "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" view  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" back  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" quit"),
    ]);

    frame.render_widget(Paragraph::new(footer), area);
}

/// Renders a short centered message in place of the grid
fn render_notice(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);

    let notice = Paragraph::new(message)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(notice, chunks[1]);
}
