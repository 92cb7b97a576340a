//! Configuration and data directory paths
//!
//! Uses XDG directories via `dirs` crate with fallbacks.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/hf-tagger/`, `~/.cache/hf-tagger/`
//! - macOS: `~/Library/Application Support/hf-tagger/`, `~/Library/Caches/hf-tagger/`
//! - Windows: `%APPDATA%\hf-tagger\`, `%LOCALAPPDATA%\hf-tagger\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "hf-tagger";

/// Get the application config directory
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the application cache directory
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get path to API cache file
pub fn api_cache_path() -> Result<PathBuf> {
    Ok(cache_dir()?.join("hub-api-cache.json"))
}

/// Get path to app config file
pub fn app_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Token file written by `huggingface-cli login`
///
/// `$HF_HOME/token`, defaulting to `~/.cache/huggingface/token`.
pub fn hub_token_path() -> Option<PathBuf> {
    hub_token_path_from(std::env::var_os("HF_HOME").map(PathBuf::from))
}

fn hub_token_path_from(hf_home: Option<PathBuf>) -> Option<PathBuf> {
    hf_home
        .or_else(|| dirs::home_dir().map(|home| home.join(".cache").join("huggingface")))
        .map(|dir| dir.join("token"))
}
