//! Hub client trait and cache mode definitions
//!
//! This module defines the core `HubClient` trait that all client
//! implementations must satisfy, as well as the `CacheMode` enum for
//! controlling caching behavior.

use crate::types::{CommitInfo, CommitRequest, Discussion, ModelInfo, ModelSummary};
use async_trait::async_trait;
use std::sync::Arc;

/// Cache behavior mode for Hub API clients
///
/// Controls how the client interacts with the cache layer.
/// This is set at client construction time, not per-request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheMode {
    /// No caching - neither read nor write
    None,

    /// Write-only - skip cache reads, but write responses to cache
    /// Use for "force refresh" to get fresh data while populating cache
    WriteOnly,

    /// Read-only - read from cache, but don't update it
    ReadOnly,

    /// Full caching - read from cache, write to cache
    #[default]
    ReadWrite,
}

impl CacheMode {
    /// Should we attempt to read from cache before making API call?
    pub fn should_read(&self) -> bool {
        matches!(self, CacheMode::ReadOnly | CacheMode::ReadWrite)
    }

    /// Should we write API responses to cache?
    pub fn should_write(&self) -> bool {
        matches!(self, CacheMode::WriteOnly | CacheMode::ReadWrite)
    }
}

/// Hugging Face Hub API client trait
///
/// Implementations can be direct (hitting the API) or decorated
/// with caching.
///
/// # Example
///
/// ```rust,ignore
/// use hf_client::HubClient;
///
/// async fn needs_tags(client: &dyn HubClient, repo_id: &str) -> anyhow::Result<bool> {
///     Ok(!client.model_info(repo_id).await?.is_tagged())
/// }
/// ```
#[async_trait]
pub trait HubClient: Send + Sync {
    /// Fetch repository details including tags and file listing
    async fn model_info(&self, repo_id: &str) -> anyhow::Result<ModelInfo>;

    /// List models ordered by `sort` (e.g., "likes30d", "downloads")
    ///
    /// Returns at most `limit` models, most popular first.
    async fn list_models(&self, sort: &str, limit: usize) -> anyhow::Result<Vec<ModelSummary>>;

    /// Fetch the raw README.md (model card) of a repository
    ///
    /// A repository without a README yields an empty string.
    async fn fetch_readme(&self, repo_id: &str) -> anyhow::Result<String>;

    /// Fetch all discussions and pull requests of a repository
    async fn discussions(&self, repo_id: &str) -> anyhow::Result<Vec<Discussion>>;

    /// Name of the user the token belongs to
    async fn whoami(&self) -> anyhow::Result<String>;

    /// Push a commit, optionally as a pull request
    async fn create_commit(
        &self,
        repo_id: &str,
        commit: &CommitRequest,
    ) -> anyhow::Result<CommitInfo>;
}

/// Shared clients, e.g. one handle kept by the caller and one wrapped in a
/// `CachedHubClient`
#[async_trait]
impl<T: HubClient + ?Sized> HubClient for Arc<T> {
    async fn model_info(&self, repo_id: &str) -> anyhow::Result<ModelInfo> {
        (**self).model_info(repo_id).await
    }

    async fn list_models(&self, sort: &str, limit: usize) -> anyhow::Result<Vec<ModelSummary>> {
        (**self).list_models(sort, limit).await
    }

    async fn fetch_readme(&self, repo_id: &str) -> anyhow::Result<String> {
        (**self).fetch_readme(repo_id).await
    }

    async fn discussions(&self, repo_id: &str) -> anyhow::Result<Vec<Discussion>> {
        (**self).discussions(repo_id).await
    }

    async fn whoami(&self) -> anyhow::Result<String> {
        (**self).whoami().await
    }

    async fn create_commit(
        &self,
        repo_id: &str,
        commit: &CommitRequest,
    ) -> anyhow::Result<CommitInfo> {
        (**self).create_commit(repo_id, commit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_mode_default() {
        assert_eq!(CacheMode::default(), CacheMode::ReadWrite);
    }

    #[test]
    fn test_cache_mode_should_read() {
        assert!(!CacheMode::None.should_read());
        assert!(!CacheMode::WriteOnly.should_read());
        assert!(CacheMode::ReadOnly.should_read());
        assert!(CacheMode::ReadWrite.should_read());
    }

    #[test]
    fn test_cache_mode_should_write() {
        assert!(!CacheMode::None.should_write());
        assert!(CacheMode::WriteOnly.should_write());
        assert!(!CacheMode::ReadOnly.should_write());
        assert!(CacheMode::ReadWrite.should_write());
    }
}
