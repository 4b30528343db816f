//! NASA image library search client
//!
//! Fetches one page of search results from images-api.nasa.gov, flattens the
//! nested collection shape into gallery tiles, and keeps each page in the
//! disk cache under a page- and query-scoped key.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::GalleryItem;
use crate::cache::CacheStore;

/// Base URL for the image library search API
const IMAGE_LIBRARY_BASE_URL: &str = "https://images-api.nasa.gov/search";

/// How many tiles one gallery page shows
pub const PAGE_SIZE: usize = 12;

/// Errors that can occur when fetching gallery pages
#[derive(Debug, Error)]
pub enum GalleryError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("unexpected HTTP status: {0}")]
    Status(reqwest::StatusCode),

    /// Failed to parse the JSON response
    #[error("Failed to parse search response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Response from the image library search API
#[derive(Debug, Deserialize)]
struct SearchResponse {
    collection: SearchCollection,
}

#[derive(Debug, Deserialize)]
struct SearchCollection {
    #[serde(default)]
    items: Vec<SearchItem>,
}

/// One raw search result; links and metadata arrive in parallel arrays
#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    links: Vec<SearchLink>,
    #[serde(default)]
    data: Vec<SearchData>,
}

#[derive(Debug, Deserialize)]
struct SearchLink {
    href: String,
}

#[derive(Debug, Deserialize)]
struct SearchData {
    title: String,
    description: Option<String>,
    date_created: Option<String>,
}

/// Client for fetching pages of the NASA image library
#[derive(Debug, Clone)]
pub struct GalleryClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Cache store for persisting pages
    cache: Option<CacheStore>,
    /// Base URL for the API (allows override for testing)
    base_url: String,
    /// Search query sent with every request
    query: String,
}

impl GalleryClient {
    /// Creates a new GalleryClient with the default cache location
    #[allow(dead_code)]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            cache: CacheStore::new(),
            base_url: IMAGE_LIBRARY_BASE_URL.to_string(),
            query: query.into(),
        }
    }

    /// Creates a new GalleryClient with a specific cache store (or none)
    pub fn with_cache(query: impl Into<String>, cache: Option<CacheStore>) -> Self {
        Self {
            http_client: Client::new(),
            cache,
            base_url: IMAGE_LIBRARY_BASE_URL.to_string(),
            query: query.into(),
        }
    }

    /// Creates a new GalleryClient with a custom base URL (for testing)
    #[cfg(test)]
    pub fn with_base_url(base_url: String, cache: Option<CacheStore>) -> Self {
        Self {
            http_client: Client::new(),
            cache,
            base_url,
            query: "galaxy".to_string(),
        }
    }

    /// Generates the cache key for a page of this client's query
    ///
    /// The key carries both the query and the page number, so neither another
    /// page nor another query can satisfy the lookup.
    fn cache_key(&self, page: u32) -> String {
        format!(
            "gallery_{}_page_{}",
            self.query.replace(' ', "_").to_lowercase(),
            page
        )
    }

    /// Fetches one page of gallery tiles
    ///
    /// # Arguments
    /// * `page` - 1-based page number
    ///
    /// # Returns
    /// * `Ok(Vec<GalleryItem>)` - Up to `PAGE_SIZE` tiles (possibly empty)
    /// * `Err(GalleryError)` - If the request or parsing fails
    ///
    /// # Behavior
    /// - A fresh cache entry for the page short-circuits the network call
    /// - On a miss, issues one GET, validates the status, parses the JSON
    /// - Empty pages are returned but never cached, so the next visit asks
    ///   the API again
    pub async fn fetch_page(&self, page: u32) -> Result<Vec<GalleryItem>, GalleryError> {
        let cache_key = self.cache_key(page);

        if let Some(ref cache) = self.cache {
            if let Some(items) = cache.get::<Vec<GalleryItem>>(&cache_key) {
                return Ok(items);
            }
        }

        let items = self.fetch_from_api(page).await?;
        self.store_page(&cache_key, &items);

        Ok(items)
    }

    /// Caches a fetched page, unless it came back empty
    ///
    /// Empty pages are not worth keeping; the next visit asks the API again.
    fn store_page(&self, cache_key: &str, items: &[GalleryItem]) {
        if items.is_empty() {
            return;
        }
        if let Some(ref cache) = self.cache {
            if let Err(err) = cache.set(cache_key, items) {
                log::warn!("failed to cache gallery page under {cache_key}: {err}");
            }
        }
    }

    /// Fetches one page directly from the API
    async fn fetch_from_api(&self, page: u32) -> Result<Vec<GalleryItem>, GalleryError> {
        let url = format!(
            "{}?q={}&media_type=image&page={}",
            self.base_url,
            urlencoded(&self.query),
            page
        );

        let response = self.http_client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GalleryError::Status(status));
        }

        let text = response.text().await?;
        let search: SearchResponse = serde_json::from_str(&text)?;

        Ok(flatten_items(search))
    }
}

/// Keeps the first `PAGE_SIZE` results and flattens them into gallery tiles
///
/// Results missing a preview link or a metadata record are skipped.
fn flatten_items(search: SearchResponse) -> Vec<GalleryItem> {
    search
        .collection
        .items
        .into_iter()
        .take(PAGE_SIZE)
        .filter_map(flatten_item)
        .collect()
}

/// Flattens one raw result into a gallery tile, if it is complete enough
fn flatten_item(item: SearchItem) -> Option<GalleryItem> {
    let href = item.links.into_iter().next()?.href;
    let data = item.data.into_iter().next()?;
    let date_created = data.date_created.as_deref().and_then(parse_created);

    Some(GalleryItem {
        href,
        title: data.title,
        description: data.description,
        date_created,
    })
}

/// Parses the archive's RFC 3339 creation timestamps, tolerating absence
fn parse_created(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// URL-encodes a string for use in query parameters
fn urlencoded(s: &str) -> String {
    s.replace(' ', "%20").replace('\'', "%27")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const UNREACHABLE_URL: &str = "http://127.0.0.1:9/search";

    fn create_test_cache() -> (CacheStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = CacheStore::with_dir(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    fn sample_item(title: &str) -> GalleryItem {
        GalleryItem {
            href: format!("https://images-assets.nasa.gov/image/{title}/thumb.jpg"),
            title: title.to_string(),
            description: Some("A sample description".to_string()),
            date_created: None,
        }
    }

    fn search_json(item_count: usize) -> String {
        let items: Vec<String> = (0..item_count)
            .map(|i| {
                format!(
                    r#"{{
                        "links": [{{"href": "https://images-assets.nasa.gov/image/{i}/thumb.jpg"}}],
                        "data": [{{
                            "title": "Image {i}",
                            "description": "Description {i}",
                            "date_created": "2015-03-21T00:00:00Z"
                        }}]
                    }}"#
                )
            })
            .collect();
        format!(r#"{{"collection": {{"items": [{}]}}}}"#, items.join(","))
    }

    #[test]
    fn test_flatten_keeps_first_page_size_items() {
        let search: SearchResponse = serde_json::from_str(&search_json(20)).unwrap();

        let items = flatten_items(search);

        assert_eq!(items.len(), PAGE_SIZE);
        assert_eq!(items[0].title, "Image 0");
        assert_eq!(items[PAGE_SIZE - 1].title, format!("Image {}", PAGE_SIZE - 1));
    }

    #[test]
    fn test_flatten_parses_creation_dates() {
        let search: SearchResponse = serde_json::from_str(&search_json(1)).unwrap();

        let items = flatten_items(search);

        let created = items[0].date_created.expect("Date should parse");
        assert_eq!(created.to_rfc3339(), "2015-03-21T00:00:00+00:00");
    }

    #[test]
    fn test_flatten_skips_incomplete_items() {
        let json = r#"{
            "collection": {
                "items": [
                    {"links": [], "data": [{"title": "No link"}]},
                    {"links": [{"href": "https://x/thumb.jpg"}], "data": []},
                    {"links": [{"href": "https://y/thumb.jpg"}], "data": [{"title": "Complete"}]}
                ]
            }
        }"#;
        let search: SearchResponse = serde_json::from_str(json).unwrap();

        let items = flatten_items(search);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Complete");
        assert!(items[0].description.is_none());
    }

    #[test]
    fn test_flatten_empty_collection() {
        let search: SearchResponse =
            serde_json::from_str(r#"{"collection": {"items": []}}"#).unwrap();

        assert!(flatten_items(search).is_empty());
    }

    #[test]
    fn test_flatten_tolerates_bad_dates() {
        let json = r#"{
            "collection": {
                "items": [{
                    "links": [{"href": "https://x/thumb.jpg"}],
                    "data": [{"title": "Odd date", "date_created": "yesterday"}]
                }]
            }
        }"#;
        let search: SearchResponse = serde_json::from_str(json).unwrap();

        let items = flatten_items(search);

        assert_eq!(items.len(), 1);
        assert!(items[0].date_created.is_none());
    }

    #[test]
    fn test_cache_keys_are_page_and_query_scoped() {
        let client = GalleryClient::with_cache("galaxy", None);
        assert_eq!(client.cache_key(1), "gallery_galaxy_page_1");
        assert_eq!(client.cache_key(2), "gallery_galaxy_page_2");

        let nebulas = GalleryClient::with_cache("Crab Nebula", None);
        assert_eq!(nebulas.cache_key(1), "gallery_crab_nebula_page_1");
    }

    #[tokio::test]
    async fn test_fresh_cached_page_skips_network() {
        let (cache, _temp_dir) = create_test_cache();
        let items = vec![sample_item("PIA12348"), sample_item("PIA09178")];
        cache
            .set("gallery_galaxy_page_1", &items)
            .expect("Seeding cache should succeed");

        let client = GalleryClient::with_base_url(UNREACHABLE_URL.to_string(), Some(cache));

        let result = client.fetch_page(1).await.expect("Cache hit should succeed");
        assert_eq!(result, items);
    }

    #[tokio::test]
    async fn test_cached_page_does_not_satisfy_other_pages() {
        let (cache, _temp_dir) = create_test_cache();
        cache
            .set("gallery_galaxy_page_1", &vec![sample_item("PIA12348")])
            .expect("Seeding cache should succeed");

        let client = GalleryClient::with_base_url(UNREACHABLE_URL.to_string(), Some(cache));

        // Page 2 misses the cache and has to hit the unreachable API
        let result = client.fetch_page(2).await;
        assert!(result.is_err(), "Page 1's entry must not satisfy page 2");
    }

    #[test]
    fn test_empty_pages_are_not_cached() {
        let (cache, _temp_dir) = create_test_cache();
        let client = GalleryClient::with_cache("galaxy", Some(cache.clone()));

        client.store_page("gallery_galaxy_page_2", &[]);

        let cached: Option<Vec<GalleryItem>> = cache.get("gallery_galaxy_page_2");
        assert!(cached.is_none(), "An empty page must not be cached");
    }

    #[test]
    fn test_non_empty_pages_are_cached() {
        let (cache, _temp_dir) = create_test_cache();
        let client = GalleryClient::with_cache("galaxy", Some(cache.clone()));
        let items = vec![sample_item("PIA12348")];

        client.store_page("gallery_galaxy_page_1", &items);

        let cached: Vec<GalleryItem> = cache
            .get("gallery_galaxy_page_1")
            .expect("Page should be cached");
        assert_eq!(cached, items);
    }

    #[tokio::test]
    async fn test_cache_miss_with_unreachable_api_fails() {
        let (cache, _temp_dir) = create_test_cache();
        let client = GalleryClient::with_base_url(UNREACHABLE_URL.to_string(), Some(cache));

        let result = client.fetch_page(1).await;
        assert!(matches!(result, Err(GalleryError::RequestFailed(_))));
    }

    #[test]
    fn test_urlencoded_escapes_spaces_and_quotes() {
        assert_eq!(urlencoded("crab nebula"), "crab%20nebula");
        assert_eq!(urlencoded("barnard's loop"), "barnard%27s%20loop");
        assert_eq!(urlencoded("galaxy"), "galaxy");
    }
}
