//! NASA View - Astronomy Picture of the Day and image library in the terminal
//!
//! A terminal UI application that displays NASA's daily picture and a
//! paginated gallery of the NASA image library, backed by a time-expiring
//! response cache on disk.

mod app;
mod cache;
mod cli;
mod data;
mod ui;

use std::io;
use std::panic;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::{App, AppState};
use cache::CacheStore;
use cli::{Cli, StartupConfig};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Renders the UI based on the current application state
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    match app.state {
        AppState::Loading => {
            render_loading(frame);
        }
        AppState::Apod => {
            ui::render_apod_panel(frame, app);
        }
        AppState::Gallery => {
            ui::render_gallery_grid(frame, app);
        }
    }

    if app.lightbox_item.is_some() {
        ui::render_lightbox(frame, app);
    }
    if app.show_help {
        ui::render_help_overlay(frame);
    }
}

/// Renders a loading message while data is being fetched
fn render_loading(frame: &mut ratatui::Frame) {
    use ratatui::{
        layout::{Alignment, Constraint, Direction, Layout},
        style::{Color, Style},
        widgets::Paragraph,
    };

    let area = frame.area();

    // Center the loading message vertically
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);

    let loading_text = Paragraph::new("Loading NASA imagery...")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, chunks[1]);
}

/// Evicts expired cache entries left over from earlier runs
fn sweep_cache(config: &StartupConfig) {
    if !config.use_cache {
        return;
    }
    if let Some(store) = CacheStore::new().map(|s| s.with_ttl_hours(config.cache_ttl_hours)) {
        let removed = store.sweep();
        if removed > 0 {
            log::info!("removed {removed} expired cache entries");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    sweep_cache(&config);

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app instance
    let mut app = App::new(&config);

    // Initial render to show loading state
    terminal.draw(|f| render_ui(f, &app))?;

    // Trigger initial data load
    app.load_all_data().await;

    // Main event loop
    loop {
        // Render UI
        terminal.draw(|f| render_ui(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        // A page change re-runs the gallery fetch path
        if app.gallery_fetch_queued {
            app.gallery_fetch_queued = false;
            terminal.draw(|f| render_ui(f, &app))?;
            app.load_gallery().await;
        }

        // User-initiated refresh re-runs both fetch paths
        if app.refresh_requested {
            app.refresh_requested = false;
            app.load_all_data().await;
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
