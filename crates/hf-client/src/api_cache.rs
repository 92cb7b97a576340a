//! Flat-file response cache
//!
//! Responses are keyed by method, URL and sorted query parameters and kept in
//! a single JSON file between runs. Entries older than the configured TTL
//! are treated as misses.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Default time-to-live for cached responses
pub const DEFAULT_TTL_HOURS: i64 = 24;

/// A cached API response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResponse {
    pub body: String,
    pub status_code: u16,
    pub stored_at: DateTime<Utc>,
}

impl CachedResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            status_code: 200,
            stored_at: Utc::now(),
        }
    }
}

/// Hit/miss counters for the current process
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCache {
    entries: HashMap<String, CachedResponse>,
    #[serde(skip, default = "default_ttl")]
    ttl: Duration,
    #[serde(skip)]
    hits: u64,
    #[serde(skip)]
    misses: u64,
}

fn default_ttl() -> Duration {
    Duration::hours(DEFAULT_TTL_HOURS)
}

impl Default for ApiCache {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            ttl: default_ttl(),
            hits: 0,
            misses: 0,
        }
    }
}

impl ApiCache {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            ..Self::default()
        }
    }

    /// Load the cache file, starting empty if it is missing or unreadable
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<ApiCache>(&content) {
                Ok(cache) => {
                    debug!(
                        "Loaded {} cached responses from {:?}",
                        cache.entries.len(),
                        path
                    );
                    cache
                }
                Err(e) => {
                    warn!("Ignoring corrupt API cache {:?}: {}", path, e);
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No API cache at {:?}, starting fresh", path);
                Self::default()
            }
        }
    }

    /// Write the cache file, dropping expired entries first
    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.prune();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string(self).context("Failed to serialize API cache")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write API cache: {:?}", path))?;

        debug!("Saved {} cached responses to {:?}", self.entries.len(), path);
        Ok(())
    }

    pub fn get(&mut self, method: &str, url: &str, params: &[(&str, &str)]) -> Option<CachedResponse> {
        let key = cache_key(method, url, params);
        let fresh = self
            .entries
            .get(&key)
            .filter(|r| Utc::now() - r.stored_at < self.ttl)
            .cloned();

        if fresh.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        fresh
    }

    pub fn set(&mut self, method: &str, url: &str, params: &[(&str, &str)], response: CachedResponse) {
        self.entries.insert(cache_key(method, url, params), response);
    }

    /// Remove every entry whose key contains `pattern`
    ///
    /// Returns the number of removed entries.
    pub fn invalidate_pattern(&mut self, pattern: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.contains(pattern));
        before - self.entries.len()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn prune(&mut self) {
        let ttl = self.ttl;
        let now = Utc::now();
        self.entries.retain(|_, r| now - r.stored_at < ttl);
    }
}

fn cache_key(method: &str, url: &str, params: &[(&str, &str)]) -> String {
    let mut params = params.to_vec();
    params.sort();
    let query: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    format!("{} {}?{}", method, url, query.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_then_get() {
        let mut cache = ApiCache::default();
        cache.set("GET", "/api/models/a/b", &[], CachedResponse::ok("{}"));

        let hit = cache.get("GET", "/api/models/a/b", &[]).unwrap();
        assert_eq!(hit.body, "{}");
        assert!(cache.get("GET", "/api/models/a/c", &[]).is_none());
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );
    }

    #[test]
    fn test_param_order_does_not_matter() {
        let mut cache = ApiCache::default();
        cache.set(
            "GET",
            "/api/models",
            &[("sort", "likes30d"), ("limit", "10")],
            CachedResponse::ok("[]"),
        );
        assert!(cache
            .get("GET", "/api/models", &[("limit", "10"), ("sort", "likes30d")])
            .is_some());
    }

    #[test]
    fn test_expired_entries_miss() {
        let mut cache = ApiCache::with_ttl(Duration::hours(1));
        let mut stale = CachedResponse::ok("old");
        stale.stored_at = Utc::now() - Duration::hours(2);
        cache.set("GET", "/x", &[], stale);

        assert!(cache.get("GET", "/x", &[]).is_none());
    }

    #[test]
    fn test_invalidate_pattern() {
        let mut cache = ApiCache::default();
        cache.set("GET", "/api/models/acme/one", &[], CachedResponse::ok("1"));
        cache.set("GET", "/api/models/acme/one/discussions", &[], CachedResponse::ok("2"));
        cache.set("GET", "/api/models/acme/two", &[], CachedResponse::ok("3"));

        assert_eq!(cache.invalidate_pattern("/acme/one"), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cache.json");

        let mut cache = ApiCache::default();
        cache.set("GET", "/api/whoami-v2", &[], CachedResponse::ok("me"));
        cache.save(&path).unwrap();

        let mut loaded = ApiCache::load(&path);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get("GET", "/api/whoami-v2", &[]).unwrap().body, "me");
    }

    #[test]
    fn test_load_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "not json").unwrap();

        assert!(ApiCache::load(&path).is_empty());
    }
}
