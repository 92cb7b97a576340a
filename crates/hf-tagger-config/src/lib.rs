//! Configuration and file management for hf-tagger
//!
//! This crate provides:
//! - File path utilities for config, cache and log files
//! - Configuration file loading (TOML)
//! - Application configuration (AppConfig)

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::{AppConfig, LastPage};
pub use config_file::{load_config_file, load_config_from};
pub use paths::{api_cache_path, cache_dir, config_dir, hub_token_path};
