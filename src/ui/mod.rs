//! UI rendering module for NASA View
//!
//! This module contains all the rendering logic for the terminal user
//! interface, using the ratatui library for TUI components.

pub mod apod_panel;
pub mod gallery_grid;
pub mod help_overlay;
pub mod lightbox;

pub use apod_panel::render as render_apod_panel;
pub use gallery_grid::render as render_gallery_grid;
pub use help_overlay::render as render_help_overlay;
pub use lightbox::render as render_lightbox;
