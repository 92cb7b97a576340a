//! Hugging Face Hub API client with caching support
//!
//! This crate provides a trait-based Hub API client with optional caching.
//! The design follows the decorator pattern, allowing caching behavior to be
//! composed with the base client.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                HubClient trait                   │
//! │  - model_info() / list_models()                  │
//! │  - fetch_readme() / discussions()                │
//! │  - create_commit()                               │
//! └─────────────────────────────────────────────────┘
//!                        │
//!        ┌───────────────┴───────────────┐
//!        ▼                               ▼
//! ┌─────────────────┐         ┌─────────────────────┐
//! │ HttpHubClient   │         │ CachedHubClient     │
//! │ (direct API)    │◄────────│ (decorator)         │
//! └─────────────────┘         └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use hf_client::{connect, ApiCache, CacheMode, HubClient, HubConfig, TokenResolver};
//! use std::sync::{Arc, Mutex};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let token = TokenResolver::from_env(None).resolve();
//! let config = HubConfig::new(hf_client::DEFAULT_ENDPOINT, token);
//! let cache = Arc::new(Mutex::new(ApiCache::default()));
//!
//! let client = connect(&config, cache, CacheMode::ReadWrite)?;
//! let info = client.model_info("openai-community/gpt2").await?;
//! println!("{:?}", info.library_name);
//! # Ok(())
//! # }
//! ```

pub mod api_cache;
pub mod cached_client;
pub mod client;
pub mod http_client;
pub mod hub_config;
pub mod model_card;
pub mod types;

/// Default Hub endpoint
pub const DEFAULT_ENDPOINT: &str = "https://huggingface.co";

pub use api_cache::{ApiCache, CacheStats, CachedResponse};
pub use cached_client::CachedHubClient;
pub use client::{CacheMode, HubClient};
pub use http_client::HttpHubClient;
pub use hub_config::{connect, HubConfig, TokenResolver};
pub use model_card::{MetadataPatch, ModelCard, README_PATH};
pub use types::{
    CommitFile, CommitInfo, CommitRequest, Discussion, DiscussionStatus, ModelInfo, ModelSummary,
    Sibling,
};
