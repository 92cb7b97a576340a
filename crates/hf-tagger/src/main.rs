use anyhow::{Context, Result};
use clap::Parser;
use hf_client::{connect, ApiCache, CacheMode, HubConfig, TokenResolver};
use hf_tagger_config::AppConfig;
use std::sync::{Arc, Mutex};

mod batch;
mod cli;
mod commands;
mod logger;
mod repo_list;

use cli::{Args, Commands};

fn cache_mode(args: &Args) -> CacheMode {
    if args.no_cache {
        CacheMode::None
    } else if args.refresh {
        CacheMode::WriteOnly
    } else {
        CacheMode::ReadWrite
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // .env may carry HF_TOKEN
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: failed to load .env: {}", e);
        }
    }

    let log_file = logger::init()?;
    log::info!("Starting hf-tagger, logging to {}", log_file.display());

    let config = match &args.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };

    let token = TokenResolver::from_env(hf_tagger_config::hub_token_path()).resolve();
    let hub_config = HubConfig::new(&config.endpoint, token);

    let cache_path = hf_tagger_config::api_cache_path()?;
    let cache = Arc::new(Mutex::new(ApiCache::load(&cache_path)));
    let client = connect(&hub_config, cache.clone(), cache_mode(&args))?;

    let result = match &args.command {
        Commands::Scan(scan) => commands::scan::run(&client, &config, scan).await,
        Commands::Categorize(categorize) => {
            commands::categorize::run(&client, &config, categorize).await
        }
        Commands::Review(review) => commands::review::run(&client, &config, review).await,
        Commands::Update(repo) => commands::update::run(&client, &config, &repo.repo).await,
        Commands::Info(repo) => commands::info::run(&client, &repo.repo).await,
    };

    {
        let mut cache = cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        log::debug!("API cache: {:?}", cache.stats());
        cache
            .save(&cache_path)
            .context("Failed to save API cache")?;
    }

    log::info!("Exiting hf-tagger");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_mode_from_flags() {
        let args = Args::parse_from(["hf-tagger", "info", "a/b"]);
        assert_eq!(cache_mode(&args), CacheMode::ReadWrite);

        let args = Args::parse_from(["hf-tagger", "--refresh", "info", "a/b"]);
        assert_eq!(cache_mode(&args), CacheMode::WriteOnly);

        let args = Args::parse_from(["hf-tagger", "--no-cache", "info", "a/b"]);
        assert_eq!(cache_mode(&args), CacheMode::None);
    }
}
