//! Application state management for NASA View
//!
//! This module contains the main application state, handling keyboard input,
//! data loading, pagination, and state transitions between the APOD panel
//! and the gallery view.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};

use crate::cache::CacheStore;
use crate::cli::StartupConfig;
use crate::data::{Apod, ApodClient, ApodError, GalleryClient, GalleryError, GalleryItem};

/// Number of tile columns in the gallery grid
pub const GRID_COLS: usize = 4;

/// Application state enum representing the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Initial loading state while fetching data
    Loading,
    /// Astronomy Picture of the Day panel
    Apod,
    /// Image library gallery grid
    Gallery,
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Today's picture, once loaded
    pub apod: Option<Apod>,
    /// Fallback message shown in place of the APOD panel content
    pub apod_error: Option<String>,
    /// Tiles of the current gallery page
    pub gallery_items: Vec<GalleryItem>,
    /// Fallback message shown in place of the gallery grid
    pub gallery_error: Option<String>,
    /// Whether the current page's fetch has resolved (even to an empty page)
    pub gallery_loaded: bool,
    /// Current gallery page, 1-based
    pub page: u32,
    /// Image library search query (drives titles and cache keys)
    pub query: String,
    /// Index of the selected tile in the gallery grid
    pub selected_tile: usize,
    /// Index of the tile open in the lightbox, if any
    pub lightbox_item: Option<usize>,
    /// Flag to show the help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag indicating a refresh has been requested
    pub refresh_requested: bool,
    /// Flag indicating the gallery needs a (re)fetch for the current page
    pub gallery_fetch_queued: bool,
    /// Timestamp of last data refresh
    pub last_refresh: Option<DateTime<Local>>,
    /// Flag to transition to Gallery after data loads (from --gallery)
    pending_gallery: bool,
    /// APOD API client
    apod_client: ApodClient,
    /// Image library API client
    gallery_client: GalleryClient,
}

impl App {
    /// Creates a new App instance from the startup configuration
    pub fn new(config: &StartupConfig) -> Self {
        let cache = if config.use_cache {
            CacheStore::new().map(|store| store.with_ttl_hours(config.cache_ttl_hours))
        } else {
            None
        };

        Self {
            state: AppState::Loading,
            apod: None,
            apod_error: None,
            gallery_items: Vec::new(),
            gallery_error: None,
            gallery_loaded: false,
            page: config.initial_page,
            query: config.query.clone(),
            selected_tile: 0,
            lightbox_item: None,
            show_help: false,
            should_quit: false,
            refresh_requested: false,
            gallery_fetch_queued: false,
            last_refresh: None,
            pending_gallery: config.start_in_gallery,
            apod_client: ApodClient::with_cache(config.api_key.clone(), cache.clone()),
            gallery_client: GalleryClient::with_cache(config.query.clone(), cache),
        }
    }

    /// Creates a new App instance with custom clients (for testing)
    #[cfg(test)]
    pub fn with_clients(apod_client: ApodClient, gallery_client: GalleryClient) -> Self {
        Self {
            state: AppState::Loading,
            apod: None,
            apod_error: None,
            gallery_items: Vec::new(),
            gallery_error: None,
            gallery_loaded: false,
            page: 1,
            query: "galaxy".to_string(),
            selected_tile: 0,
            lightbox_item: None,
            show_help: false,
            should_quit: false,
            refresh_requested: false,
            gallery_fetch_queued: false,
            last_refresh: None,
            pending_gallery: false,
            apod_client,
            gallery_client,
        }
    }

    /// Returns the tile currently open in the lightbox, if any
    pub fn lightbox_tile(&self) -> Option<&GalleryItem> {
        self.lightbox_item.and_then(|i| self.gallery_items.get(i))
    }

    /// Loads the APOD record and the current gallery page concurrently
    ///
    /// Used for the initial load and for user-requested refreshes; each
    /// fetcher consults the cache before touching the network. Transitions
    /// out of Loading once both results are in.
    pub async fn load_all_data(&mut self) {
        let (apod_result, gallery_result) = futures::future::join(
            self.apod_client.fetch_apod(),
            self.gallery_client.fetch_page(self.page),
        )
        .await;

        self.apply_apod_result(apod_result);
        self.apply_gallery_result(gallery_result);
        self.last_refresh = Some(Local::now());

        if self.state == AppState::Loading {
            self.state = if self.pending_gallery {
                AppState::Gallery
            } else {
                AppState::Apod
            };
            self.pending_gallery = false;
        }
    }

    /// Fetches the current gallery page (after pagination)
    pub async fn load_gallery(&mut self) {
        let result = self.gallery_client.fetch_page(self.page).await;
        self.apply_gallery_result(result);
    }

    /// Records an APOD fetch result on the app state
    fn apply_apod_result(&mut self, result: Result<Apod, ApodError>) {
        match result {
            Ok(apod) => {
                self.apod = Some(apod);
                self.apod_error = None;
            }
            Err(err) => {
                log::error!("failed to load APOD: {err}");
                self.apod_error =
                    Some("Could not load the picture of the day. Try again later.".to_string());
            }
        }
    }

    /// Records a gallery fetch result on the app state
    fn apply_gallery_result(&mut self, result: Result<Vec<GalleryItem>, GalleryError>) {
        match result {
            Ok(items) => {
                self.gallery_items = items;
                self.gallery_error = None;
                if self.selected_tile >= self.gallery_items.len() {
                    self.selected_tile = 0;
                }
            }
            Err(err) => {
                log::error!("failed to load gallery page {}: {err}", self.page);
                self.gallery_items.clear();
                self.gallery_error =
                    Some("Could not load images. Try again later.".to_string());
            }
        }
        self.gallery_loaded = true;
    }

    /// Advances to the next gallery page and queues its fetch
    pub fn next_page(&mut self) {
        self.page += 1;
        self.queue_gallery_fetch();
    }

    /// Goes back one gallery page; a no-op on page 1
    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
            self.queue_gallery_fetch();
        }
    }

    /// Resets per-page view state and marks the current page for fetching
    fn queue_gallery_fetch(&mut self) {
        self.selected_tile = 0;
        self.lightbox_item = None;
        self.gallery_items.clear();
        self.gallery_error = None;
        self.gallery_loaded = false;
        self.gallery_fetch_queued = true;
    }

    /// Opens the lightbox on the selected tile, if there is one
    fn open_lightbox(&mut self) {
        if self.selected_tile < self.gallery_items.len() {
            self.lightbox_item = Some(self.selected_tile);
        }
    }

    /// Closes the lightbox overlay
    fn close_lightbox(&mut self) {
        self.lightbox_item = None;
    }

    fn move_selection_left(&mut self) {
        if self.selected_tile > 0 {
            self.selected_tile -= 1;
        }
    }

    fn move_selection_right(&mut self) {
        if self.selected_tile + 1 < self.gallery_items.len() {
            self.selected_tile += 1;
        }
    }

    fn move_selection_up(&mut self) {
        self.selected_tile = self.selected_tile.saturating_sub(GRID_COLS);
    }

    fn move_selection_down(&mut self) {
        if self.gallery_items.is_empty() {
            return;
        }
        self.selected_tile = (self.selected_tile + GRID_COLS).min(self.gallery_items.len() - 1);
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q`: Quit the application
    /// - `?`: Toggle the help overlay
    /// - `r`: Re-run the fetch path for both views
    /// - `g`/`Tab` (in Apod): Switch to the gallery
    /// - `a`/`Tab`/`Esc` (in Gallery): Back to the APOD panel
    /// - Arrows or `h/j/k/l` (in Gallery): Move tile selection
    /// - `n`/`p` (in Gallery): Next / previous page
    /// - `Enter` (in Gallery): Open the lightbox on the selected tile
    /// - `Esc` (in lightbox or help): Close the overlay
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // The lightbox intercepts keys the same way
        if self.lightbox_item.is_some() {
            match key_event.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                    self.close_lightbox();
                }
                _ => {}
            }
            return;
        }

        match self.state {
            AppState::Loading => {
                // Only quit is allowed during loading
                if key_event.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
            }
            AppState::Apod => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Char('g') | KeyCode::Tab => {
                    self.state = AppState::Gallery;
                }
                KeyCode::Char('r') => {
                    self.refresh_requested = true;
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
            AppState::Gallery => match key_event.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Esc | KeyCode::Char('a') | KeyCode::Tab => {
                    self.state = AppState::Apod;
                }
                KeyCode::Left | KeyCode::Char('h') => {
                    self.move_selection_left();
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    self.move_selection_right();
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.move_selection_up();
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.move_selection_down();
                }
                KeyCode::Char('n') => {
                    self.next_page();
                }
                KeyCode::Char('p') => {
                    self.prev_page();
                }
                KeyCode::Enter => {
                    self.open_lightbox();
                }
                KeyCode::Char('r') => {
                    self.refresh_requested = true;
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
        }
    }
}
