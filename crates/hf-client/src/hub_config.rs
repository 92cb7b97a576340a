//! Hub connection settings and token resolution
//!
//! Credentials are resolved once at process start and handed to the client
//! as part of an explicit [`HubConfig`]. Nothing below the constructor reads
//! the environment.

use crate::{ApiCache, CacheMode, CachedHubClient, HttpHubClient, DEFAULT_ENDPOINT};
use anyhow::Result;
use log::{debug, info};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Environment variables checked for a token, in order
pub const TOKEN_ENV_VARS: [&str; 2] = ["HF_TOKEN", "HUGGING_FACE_HUB_TOKEN"];

/// Where and as whom to talk to the Hub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubConfig {
    /// Base URL (e.g., "https://huggingface.co")
    pub endpoint: String,
    /// Access token; read-only endpoints work without one
    pub token: Option<String>,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: None,
        }
    }
}

impl HubConfig {
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token,
        }
    }
}

/// Resolves the Hub access token
///
/// Tries, in order:
/// 1. `HF_TOKEN`, then `HUGGING_FACE_HUB_TOKEN`
/// 2. The token file written by `huggingface-cli login`
#[derive(Debug, Clone, Default)]
pub struct TokenResolver {
    env_token: Option<String>,
    token_file: Option<PathBuf>,
}

impl TokenResolver {
    pub fn new(env_token: Option<String>, token_file: Option<PathBuf>) -> Self {
        Self {
            env_token,
            token_file,
        }
    }

    /// Capture the token variables of the current environment
    pub fn from_env(token_file: Option<PathBuf>) -> Self {
        let env_token = first_token(TOKEN_ENV_VARS.iter().map(|var| std::env::var(var).ok()));
        Self::new(env_token, token_file)
    }

    pub fn resolve(&self) -> Option<String> {
        if let Some(token) = &self.env_token {
            debug!("Using Hub token from environment");
            return Some(token.trim().to_string());
        }

        let path = self.token_file.as_ref()?;
        match std::fs::read_to_string(path) {
            Ok(content) if !content.trim().is_empty() => {
                debug!("Using Hub token from {:?}", path);
                Some(content.trim().to_string())
            }
            _ => {
                debug!("No Hub token found");
                None
            }
        }
    }
}

/// First non-blank value; a blank variable does not hide the next one
fn first_token(values: impl IntoIterator<Item = Option<String>>) -> Option<String> {
    values
        .into_iter()
        .find_map(|value| value.filter(|t| !t.trim().is_empty()))
}

/// Build the cached HTTP client used by all commands
pub fn connect(
    config: &HubConfig,
    cache: Arc<Mutex<ApiCache>>,
    mode: CacheMode,
) -> Result<CachedHubClient<HttpHubClient>> {
    info!(
        "Connecting to {} ({})",
        config.endpoint,
        if config.token.is_some() {
            "authenticated"
        } else {
            "anonymous"
        }
    );
    let http = HttpHubClient::new(config)?;
    Ok(CachedHubClient::new(http, cache, mode))
}
