//! Time-expiring cache for API responses persisted to disk
//!
//! Provides a `CacheStore` that keeps serializable data in JSON files with an
//! insertion timestamp. Entries older than the store's TTL are evicted lazily
//! on read, or eagerly by `sweep` at startup. Unreadable entries are treated
//! the same as missing ones.

use chrono::{DateTime, Duration, Utc};
use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default time-to-live for cache entries in hours
pub const DEFAULT_TTL_HOURS: u64 = 24;

/// Filename prefix for every entry this store writes.
///
/// The sweep only ever inspects files carrying this prefix, so other files
/// that end up in the same directory are left alone.
const FILE_PREFIX: &str = "nasaview-";

/// Wrapper struct for cached data stored on disk
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    /// The cached data
    data: T,
    /// When the data was cached
    cached_at: DateTime<Utc>,
}

/// Manages reading and writing cached API responses to disk
///
/// The store keeps one JSON file per key in an XDG-compliant cache directory
/// (`~/.cache/nasaview/` on Linux). Each file wraps its payload in a
/// timestamp envelope; a `get` within the TTL window returns the payload,
/// while an expired or unparseable entry is deleted and reported as a miss.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
    /// How long entries stay fresh
    ttl: Duration,
}

impl CacheStore {
    /// Creates a new CacheStore using the XDG-compliant cache directory
    ///
    /// Uses `~/.cache/nasaview/` on Linux, or the equivalent XDG path on other
    /// platforms. Returns `None` if the cache directory cannot be determined
    /// (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "nasaview")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self {
            cache_dir,
            ttl: Duration::hours(DEFAULT_TTL_HOURS as i64),
        })
    }

    /// Creates a new CacheStore with a custom cache directory
    ///
    /// Useful for testing or when a specific cache location is needed.
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            ttl: Duration::hours(DEFAULT_TTL_HOURS as i64),
        }
    }

    /// Overrides how long entries stay fresh
    pub fn with_ttl_hours(mut self, hours: u64) -> Self {
        self.ttl = Duration::hours(hours as i64);
        self
    }

    /// Returns the path to the cache file for the given key
    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}{}.json", FILE_PREFIX, key))
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Writes data to the cache, stamped with the current time
    ///
    /// Overwrites any existing entry at `key`. Serialization failures are
    /// reported to the caller rather than dropped.
    ///
    /// # Arguments
    /// * `key` - Unique identifier for the cache entry (e.g., "apod")
    /// * `data` - The data to cache (must implement Serialize)
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if serialization, directory creation, or file writing fails
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, data: &T) -> std::io::Result<()> {
        self.ensure_dir()?;

        let entry = CacheEntry {
            data,
            cached_at: Utc::now(),
        };

        let json = serde_json::to_string_pretty(&entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(self.cache_path(key), json)
    }

    /// Reads data from the cache
    ///
    /// Returns `None` if there is no entry under `key`. An entry that cannot
    /// be parsed, or whose timestamp is older than the store's TTL, is
    /// deleted and reported as a miss.
    ///
    /// # Arguments
    /// * `key` - The cache key to read
    ///
    /// # Returns
    /// * `Some(data)` if a fresh, parseable entry exists
    /// * `None` otherwise
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.cache_path(key);
        let content = fs::read_to_string(&path).ok()?;

        let entry: CacheEntry<T> = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(_) => {
                // Corrupt entries look like misses to callers
                let _ = fs::remove_file(&path);
                return None;
            }
        };

        if Utc::now() - entry.cached_at > self.ttl {
            let _ = fs::remove_file(&path);
            return None;
        }

        Some(entry.data)
    }

    /// Evicts every expired or unparseable entry this store owns
    ///
    /// Scans the cache directory once and deletes each namespace file whose
    /// contents cannot be parsed as a cache entry or whose timestamp is older
    /// than the TTL. Files without the namespace prefix are never touched,
    /// even when the directory is shared. Intended to run once at startup.
    ///
    /// # Returns
    /// The number of entries removed
    pub fn sweep(&self) -> usize {
        let Ok(entries) = fs::read_dir(&self.cache_dir) else {
            return 0;
        };

        let now = Utc::now();
        let mut removed = 0;

        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if !name.starts_with(FILE_PREFIX) || !name.ends_with(".json") {
                continue;
            }

            let path = entry.path();
            let stale = match fs::read_to_string(&path) {
                Ok(content) => {
                    match serde_json::from_str::<CacheEntry<serde_json::Value>>(&content) {
                        Ok(parsed) => now - parsed.cached_at > self.ttl,
                        Err(_) => true,
                    }
                }
                Err(_) => true,
            };

            if stale && fs::remove_file(&path).is_ok() {
                removed += 1;
            }
        }

        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::thread;
    use std::time::Duration as StdDuration;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    fn create_test_store() -> (CacheStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = CacheStore::with_dir(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    fn sample() -> TestData {
        TestData {
            name: "test".to_string(),
            value: 42,
        }
    }

    #[test]
    fn test_set_creates_namespaced_file() {
        let (store, temp_dir) = create_test_store();

        store.set("test_key", &sample()).expect("Set should succeed");

        let expected_path = temp_dir.path().join("nasaview-test_key.json");
        assert!(expected_path.exists(), "Cache file should exist");

        let content = fs::read_to_string(&expected_path).expect("Should read file");
        assert!(content.contains("\"name\""));
        assert!(content.contains("\"cached_at\""));
        assert!(content.contains("42"));
    }

    #[test]
    fn test_get_returns_none_for_missing_key() {
        let (store, _temp_dir) = create_test_store();

        let result: Option<TestData> = store.get("nonexistent_key");

        assert!(result.is_none(), "Should return None for missing key");
    }

    #[test]
    fn test_get_after_set_roundtrips() {
        let (store, _temp_dir) = create_test_store();
        let data = sample();

        store.set("roundtrip_key", &data).expect("Set should succeed");

        let result: TestData = store.get("roundtrip_key").expect("Should read fresh entry");
        assert_eq!(result, data, "Data should survive roundtrip");
    }

    #[test]
    fn test_get_removes_expired_entry() {
        let (store, temp_dir) = create_test_store();
        let store = store.with_ttl_hours(0);

        store.set("expired_key", &sample()).expect("Set should succeed");

        // Small delay so the entry's age exceeds the zero-hour TTL
        thread::sleep(StdDuration::from_millis(10));

        let result: Option<TestData> = store.get("expired_key");
        assert!(result.is_none(), "Expired entry should be a miss");
        assert!(
            !temp_dir.path().join("nasaview-expired_key.json").exists(),
            "Expired entry should be deleted on read"
        );
    }

    #[test]
    fn test_get_removes_corrupt_entry() {
        let (store, temp_dir) = create_test_store();
        let path = temp_dir.path().join("nasaview-corrupt_key.json");
        fs::create_dir_all(temp_dir.path()).unwrap();
        fs::write(&path, "{ not valid json").unwrap();

        let result: Option<TestData> = store.get("corrupt_key");

        assert!(result.is_none(), "Corrupt entry should be a miss");
        assert!(!path.exists(), "Corrupt entry should be deleted on read");
    }

    #[test]
    fn test_get_within_ttl_keeps_entry() {
        let (store, temp_dir) = create_test_store();

        store.set("fresh_key", &sample()).expect("Set should succeed");

        let first: Option<TestData> = store.get("fresh_key");
        let second: Option<TestData> = store.get("fresh_key");

        assert!(first.is_some());
        assert!(second.is_some(), "Fresh entry should survive repeated reads");
        assert!(temp_dir.path().join("nasaview-fresh_key.json").exists());
    }

    #[test]
    fn test_set_overwrites_existing_entry() {
        let (store, _temp_dir) = create_test_store();
        let first = TestData {
            name: "first".to_string(),
            value: 1,
        };
        let second = TestData {
            name: "second".to_string(),
            value: 2,
        };

        store.set("overwrite_key", &first).expect("First set should succeed");
        store.set("overwrite_key", &second).expect("Second set should succeed");

        let result: TestData = store.get("overwrite_key").expect("Should read entry");
        assert_eq!(result, second, "Store should contain latest data");
    }

    #[test]
    fn test_set_creates_directory_if_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested_path = temp_dir.path().join("nested").join("cache").join("dir");
        let store = CacheStore::with_dir(nested_path.clone());

        store.set("nested_key", &sample()).expect("Set should succeed");

        assert!(nested_path.exists(), "Nested directory should be created");
        assert!(nested_path.join("nasaview-nested_key.json").exists());
    }

    #[test]
    fn test_sweep_removes_expired_entries() {
        let (store, temp_dir) = create_test_store();
        let expiring = store.clone().with_ttl_hours(0);

        expiring.set("old_key", &sample()).expect("Set should succeed");
        thread::sleep(StdDuration::from_millis(10));

        let removed = expiring.sweep();

        assert_eq!(removed, 1, "Sweep should report one eviction");
        assert!(!temp_dir.path().join("nasaview-old_key.json").exists());
    }

    #[test]
    fn test_sweep_removes_corrupt_entries() {
        let (store, temp_dir) = create_test_store();
        fs::create_dir_all(temp_dir.path()).unwrap();
        fs::write(temp_dir.path().join("nasaview-bad.json"), "not json at all").unwrap();

        let removed = store.sweep();

        assert_eq!(removed, 1);
        assert!(!temp_dir.path().join("nasaview-bad.json").exists());
    }

    #[test]
    fn test_sweep_keeps_fresh_entries() {
        let (store, temp_dir) = create_test_store();

        store.set("keep_key", &sample()).expect("Set should succeed");

        let removed = store.sweep();

        assert_eq!(removed, 0, "Fresh entries should survive the sweep");
        assert!(temp_dir.path().join("nasaview-keep_key.json").exists());
    }

    #[test]
    fn test_sweep_ignores_files_outside_namespace() {
        let (store, temp_dir) = create_test_store();
        let store = store.with_ttl_hours(0);
        fs::create_dir_all(temp_dir.path()).unwrap();

        // A foreign file sharing the directory, deliberately unparseable
        let foreign = temp_dir.path().join("other-app.json");
        fs::write(&foreign, "definitely not a cache entry").unwrap();

        let removed = store.sweep();

        assert_eq!(removed, 0, "Sweep should not count foreign files");
        assert!(foreign.exists(), "Foreign files must never be deleted");
    }

    #[test]
    fn test_sweep_on_missing_directory_is_noop() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = CacheStore::with_dir(temp_dir.path().join("never_created"));

        assert_eq!(store.sweep(), 0);
    }

    #[test]
    fn test_keys_are_independent() {
        let (store, _temp_dir) = create_test_store();
        let data = sample();

        store.set("gallery_galaxy_page_1", &data).expect("Set should succeed");

        let miss: Option<TestData> = store.get("gallery_galaxy_page_2");
        assert!(miss.is_none(), "One page's entry must not satisfy another");

        let hit: Option<TestData> = store.get("gallery_galaxy_page_1");
        assert!(hit.is_some());
    }

    #[test]
    fn test_new_creates_xdg_compliant_path() {
        if let Some(store) = CacheStore::new() {
            let path_str = store.cache_dir.to_string_lossy();
            assert!(
                path_str.contains("nasaview"),
                "Cache path should contain project name"
            );
        }
        // Test passes if new() returns None (e.g., no home directory in CI)
    }
}
