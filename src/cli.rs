//! Command-line interface parsing for NASA View
//!
//! This module handles parsing of CLI arguments using clap, including the
//! --gallery flag for direct gallery access with an optional starting page,
//! and resolution of the API key from flag, environment, or default.

use clap::Parser;
use thiserror::Error;

use crate::cache::DEFAULT_TTL_HOURS;

/// API key used when neither --api-key nor NASA_API_KEY is provided
///
/// NASA's shared demo key; it is heavily rate limited but works without
/// registration.
pub const DEFAULT_API_KEY: &str = "DEMO_KEY";

/// Default search query for the image library
pub const DEFAULT_QUERY: &str = "galaxy";

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The requested gallery page is out of range
    #[error("Invalid page: {0}. Gallery pages start at 1")]
    InvalidPage(u32),
}

/// NASA View - Astronomy Picture of the Day and image library in the terminal
#[derive(Parser, Debug)]
#[command(name = "nasaview")]
#[command(about = "NASA's picture of the day and image gallery in your terminal")]
#[command(version)]
pub struct Cli {
    /// Open directly in the gallery view, optionally at a specific page
    ///
    /// Examples:
    ///   nasaview --gallery       # Open in the gallery view
    ///   nasaview --gallery 3     # Open the gallery at page 3
    #[arg(long, value_name = "PAGE")]
    pub gallery: Option<Option<u32>>,

    /// NASA API key (defaults to the NASA_API_KEY environment variable,
    /// then the shared DEMO_KEY)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Search query for the image library
    #[arg(long, value_name = "QUERY", default_value = DEFAULT_QUERY)]
    pub query: String,

    /// How long cached API responses stay fresh, in hours
    #[arg(long, value_name = "HOURS", default_value_t = DEFAULT_TTL_HOURS)]
    pub cache_ttl: u64,

    /// Skip the on-disk response cache entirely
    #[arg(long)]
    pub no_cache: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Whether to start directly in the gallery view
    pub start_in_gallery: bool,
    /// Gallery page to open first (1-based)
    pub initial_page: u32,
    /// Resolved API key for api.nasa.gov
    pub api_key: String,
    /// Image library search query
    pub query: String,
    /// Cache TTL in hours
    pub cache_ttl_hours: u64,
    /// Whether the disk cache is used at all
    pub use_cache: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            start_in_gallery: false,
            initial_page: 1,
            api_key: DEFAULT_API_KEY.to_string(),
            query: DEFAULT_QUERY.to_string(),
            cache_ttl_hours: DEFAULT_TTL_HOURS,
            use_cache: true,
        }
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with resolved settings
    /// * `Err(CliError)` if a page below 1 was requested
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let (start_in_gallery, initial_page) = match cli.gallery {
            None => (false, 1),
            Some(None) => (true, 1),
            Some(Some(page)) => {
                if page < 1 {
                    return Err(CliError::InvalidPage(page));
                }
                (true, page)
            }
        };

        let env_key = std::env::var("NASA_API_KEY").ok();

        Ok(StartupConfig {
            start_in_gallery,
            initial_page,
            api_key: resolve_api_key(cli.api_key.clone(), env_key),
            query: cli.query.clone(),
            cache_ttl_hours: cli.cache_ttl,
            use_cache: !cli.no_cache,
        })
    }
}

/// Picks the API key: explicit flag, then environment, then the demo key
fn resolve_api_key(flag: Option<String>, env: Option<String>) -> String {
    flag.or(env)
        .filter(|key| !key.is_empty())
        .unwrap_or_else(|| DEFAULT_API_KEY.to_string())
}
