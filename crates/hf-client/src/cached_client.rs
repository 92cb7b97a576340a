//! Cached Hub API client (decorator pattern)
//!
//! Wraps any `HubClient` implementation to add caching behavior.
//! The cache mode determines whether to read from cache, write to cache, or both.

use crate::api_cache::{ApiCache, CachedResponse};
use crate::client::{CacheMode, HubClient};
use crate::types::{CommitInfo, CommitRequest, Discussion, ModelInfo, ModelSummary};
use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cached Hub API client using the decorator pattern
///
/// Wraps an inner `HubClient` and caches the read endpoints according to the
/// configured `CacheMode`. Commits always go to the inner client and drop
/// every cached entry of the affected repository.
///
/// # Example
///
/// ```rust,ignore
/// use hf_client::{ApiCache, CacheMode, CachedHubClient, HttpHubClient, HubConfig};
/// use std::sync::{Arc, Mutex};
///
/// let inner = HttpHubClient::new(&HubConfig::default())?;
/// let cache = Arc::new(Mutex::new(ApiCache::default()));
///
/// let client = CachedHubClient::new(inner, cache, CacheMode::ReadWrite);
/// ```
#[derive(Debug, Clone)]
pub struct CachedHubClient<C: HubClient + Clone> {
    inner: C,
    cache: Arc<Mutex<ApiCache>>,
    mode: CacheMode,
}

impl<C: HubClient + Clone> CachedHubClient<C> {
    pub fn new(inner: C, cache: Arc<Mutex<ApiCache>>, mode: CacheMode) -> Self {
        Self { inner, cache, mode }
    }

    pub fn cache_mode(&self) -> CacheMode {
        self.mode
    }

    /// Create a new client with a different cache mode sharing the same cache
    pub fn with_mode(&self, mode: CacheMode) -> CachedHubClient<C> {
        CachedHubClient {
            inner: self.inner.clone(),
            cache: Arc::clone(&self.cache),
            mode,
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Client that always asks the Hub, for reads that feed a commit
    ///
    /// Fresh responses are still stored unless caching is off entirely.
    pub fn bypass_reads(&self) -> CachedHubClient<C> {
        let mode = if self.mode.should_write() {
            CacheMode::WriteOnly
        } else {
            CacheMode::None
        };
        self.with_mode(mode)
    }

    fn lock_cache(&self) -> MutexGuard<'_, ApiCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn try_cache_get<T: DeserializeOwned>(&self, url: &str, params: &[(&str, &str)]) -> Option<T> {
        if !self.mode.should_read() {
            return None;
        }

        let body = self.lock_cache().get("GET", url, params)?.body;
        match serde_json::from_str(&body) {
            Ok(value) => {
                debug!("Cache HIT for {}", url);
                Some(value)
            }
            Err(e) => {
                debug!("Failed to parse cached {}: {}", url, e);
                None
            }
        }
    }

    fn cache_set<T: Serialize>(&self, url: &str, params: &[(&str, &str)], value: &T) {
        if !self.mode.should_write() {
            return;
        }

        match serde_json::to_string(value) {
            Ok(body) => self
                .lock_cache()
                .set("GET", url, params, CachedResponse::ok(body)),
            Err(e) => debug!("Failed to serialize {} for cache: {}", url, e),
        }
    }

    /// Drop every cached response of the repository
    ///
    /// Patterns end at a path or query boundary so `acme/gpt2` leaves
    /// `acme/gpt2-large` alone.
    fn cache_invalidate_repo(&self, repo_id: &str) {
        let mut cache = self.lock_cache();
        let removed = cache.invalidate_pattern(&format!("/{}/", repo_id))
            + cache.invalidate_pattern(&format!("/{}?", repo_id));
        debug!(
            "Cache invalidation for {}: removed {} entries",
            repo_id, removed
        );
    }
}

#[async_trait]
impl<C: HubClient + Clone> HubClient for CachedHubClient<C> {
    async fn model_info(&self, repo_id: &str) -> anyhow::Result<ModelInfo> {
        let url = format!("/api/models/{}", repo_id);

        if let Some(info) = self.try_cache_get(&url, &[]) {
            return Ok(info);
        }

        let info = self.inner.model_info(repo_id).await?;
        self.cache_set(&url, &[], &info);
        Ok(info)
    }

    async fn list_models(&self, sort: &str, limit: usize) -> anyhow::Result<Vec<ModelSummary>> {
        let url = "/api/models";
        let limit_param = limit.to_string();
        let params = [("sort", sort), ("limit", limit_param.as_str())];

        if let Some(models) = self.try_cache_get(url, &params) {
            return Ok(models);
        }

        let models = self.inner.list_models(sort, limit).await?;
        self.cache_set(url, &params, &models);
        Ok(models)
    }

    async fn fetch_readme(&self, repo_id: &str) -> anyhow::Result<String> {
        let url = format!("/{}/resolve/main/README.md", repo_id);

        if let Some(readme) = self.try_cache_get(&url, &[]) {
            return Ok(readme);
        }

        let readme = self.inner.fetch_readme(repo_id).await?;
        self.cache_set(&url, &[], &readme);
        Ok(readme)
    }

    async fn discussions(&self, repo_id: &str) -> anyhow::Result<Vec<Discussion>> {
        let url = format!("/api/models/{}/discussions", repo_id);

        if let Some(discussions) = self.try_cache_get(&url, &[]) {
            return Ok(discussions);
        }

        let discussions = self.inner.discussions(repo_id).await?;
        self.cache_set(&url, &[], &discussions);
        Ok(discussions)
    }

    async fn whoami(&self) -> anyhow::Result<String> {
        self.inner.whoami().await
    }

    async fn create_commit(
        &self,
        repo_id: &str,
        commit: &CommitRequest,
    ) -> anyhow::Result<CommitInfo> {
        let result = self.inner.create_commit(repo_id, commit).await;
        self.cache_invalidate_repo(repo_id);
        result
    }
}
