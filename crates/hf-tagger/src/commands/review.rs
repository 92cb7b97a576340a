//! The review pipeline
//!
//! 1. load repository ids
//! 2. split into already tagged and needing update
//! 3. page through each README and collect a decision
//! 4. drop confirmed repositories that already have a PR by the author
//! 5. open metadata PRs
//! 6. print a summary and write the batch record
//!
//! Only the READMEs shown to the operator may come from the response cache.
//! Tag state, existing PRs and the README that gets committed are read from
//! the Hub.

use crate::batch::BatchRecord;
use crate::cli::ReviewArgs;
use crate::commands::update::{open_metadata_pr, PrTemplate};
use crate::repo_list::load_repo_list;
use anyhow::Result;
use hf_client::{CachedHubClient, HubClient};
use hf_tagger_config::{AppConfig, LastPage};
use readme_pager::{Decision, KeySource, LastPagePolicy, PagedPrompt, ReviewItem};
use std::io::Write;
use std::path::Path;

pub fn last_page_policy(last_page: LastPage) -> LastPagePolicy {
    match last_page {
        LastPage::Finish => LastPagePolicy::Finish,
        LastPage::RequireDecision => LastPagePolicy::RequireDecision,
    }
}

/// Returns `(tagged, needs_update)`
///
/// A repository needs an update when it lacks either field and contains
/// `required_file`. Lookup failures count as needing update.
pub async fn split_by_tags<C: HubClient + ?Sized>(
    client: &C,
    repos: &[String],
    required_file: &str,
) -> (Vec<String>, Vec<String>) {
    let mut tagged = Vec::new();
    let mut needs_update = Vec::new();

    for repo in repos {
        match client.model_info(repo).await {
            Ok(info) if info.is_tagged() => tagged.push(repo.clone()),
            Ok(info) if info.has_file(required_file) => needs_update.push(repo.clone()),
            Ok(_) => log::info!("Skipping {}: untagged but has no {}", repo, required_file),
            Err(e) => {
                log::warn!("Error fetching model info for {}: {:#}", repo, e);
                needs_update.push(repo.clone());
            }
        }
    }

    (tagged, needs_update)
}

/// Page through each README; stops the batch on abort
pub async fn review_readmes<C, K, W>(
    client: &C,
    prompt: &mut PagedPrompt<K, W>,
    repos: &[String],
    record: &mut BatchRecord,
) where
    C: HubClient + ?Sized,
    K: KeySource,
    W: Write,
{
    for repo in repos {
        let readme = match client.fetch_readme(repo).await {
            Ok(readme) => readme,
            Err(e) => {
                log::warn!("Could not load README of {}: {:#}", repo, e);
                record.not_confirmed_repos.push(repo.clone());
                continue;
            }
        };

        let decision = prompt.confirm(&ReviewItem::new(repo.as_str(), readme));
        log::info!("{}: {}", repo, decision);

        if decision.stops_batch() {
            record.aborted = true;
            break;
        }
        match decision {
            Decision::Confirmed => record.confirmed_repos.push(repo.clone()),
            _ => record.not_confirmed_repos.push(repo.clone()),
        }
    }
}

/// The author whose PRs mark a repository as handled
async fn resolve_author<C: HubClient + ?Sized>(client: &C, config: &AppConfig) -> Option<String> {
    if let Some(author) = &config.pr_author {
        return Some(author.clone());
    }
    match client.whoami().await {
        Ok(name) => Some(name),
        Err(e) => {
            log::warn!("Could not determine the current user: {:#}", e);
            None
        }
    }
}

/// Returns `(without_prs, with_existing_prs)`
///
/// Repositories whose discussions cannot be listed are left out of both.
pub async fn partition_by_existing_pr<C: HubClient + ?Sized>(
    client: &C,
    repos: &[String],
    author: &str,
) -> (Vec<String>, Vec<String>) {
    let mut without = Vec::new();
    let mut with = Vec::new();

    for repo in repos {
        match client.discussions(repo).await {
            Ok(discussions) => {
                let exists = discussions
                    .iter()
                    .any(|d| d.is_pull_request && d.author.as_deref() == Some(author));
                if exists {
                    println!("PR by user {} already exists for {}", author, repo);
                    with.push(repo.clone());
                } else {
                    without.push(repo.clone());
                }
            }
            Err(e) => log::warn!("Error checking PRs for {}: {:#}", repo, e),
        }
    }

    (without, with)
}

/// Run steps 2 to 5
///
/// `client` serves the READMEs shown to the operator, `fresh` everything that
/// decides whether and what to commit.
pub async fn run_pipeline<C, F, K, W>(
    client: &C,
    fresh: &F,
    prompt: &mut PagedPrompt<K, W>,
    config: &AppConfig,
    repos: &[String],
    dry_run: bool,
) -> BatchRecord
where
    C: HubClient + ?Sized,
    F: HubClient + ?Sized,
    K: KeySource,
    W: Write,
{
    let mut record = BatchRecord::default();

    let (tagged, needs_update) = split_by_tags(fresh, repos, &config.required_file).await;
    println!("Repos already tagged correctly:\n{:?}", tagged);
    println!("\nRepos that need updating:\n{:?}", needs_update);
    record.filtered_repos = tagged;
    record.repos_without_tags = needs_update;

    let to_review = record.repos_without_tags.clone();
    review_readmes(client, prompt, &to_review, &mut record).await;
    if record.aborted {
        log::warn!("Review aborted, no pull requests will be opened");
        return record;
    }

    let confirmed = record.confirmed_repos.clone();
    match resolve_author(fresh, config).await {
        Some(author) => {
            let (without, with) = partition_by_existing_pr(fresh, &confirmed, &author).await;
            record.repos_without_prs = without;
            record.repos_with_existing_prs = with;
        }
        None => {
            log::warn!("Skipping existing PR check");
            record.repos_without_prs = confirmed;
        }
    }

    let template = PrTemplate::from_config(config);
    for repo in &record.repos_without_prs {
        if dry_run {
            println!("[dry-run] would open a metadata PR for {}", repo);
            continue;
        }

        println!("Updating {}", repo);
        match open_metadata_pr(fresh, repo, &template).await {
            Ok(url) => {
                println!("PR created for {}. PR URL: {}", repo, url);
                record.created_prs.insert(repo.clone(), url);
            }
            Err(e) => {
                log::error!("Error updating {}: {:#}", repo, e);
                record.failed_updates.push(repo.clone());
            }
        }
    }

    record
}

/// Pipeline over the cached client, with cache reads bypassed where it matters
pub async fn review_cached<C, K, W>(
    client: &CachedHubClient<C>,
    prompt: &mut PagedPrompt<K, W>,
    config: &AppConfig,
    repos: &[String],
    dry_run: bool,
) -> BatchRecord
where
    C: HubClient + Clone,
    K: KeySource,
    W: Write,
{
    let fresh = client.bypass_reads();
    run_pipeline(client, &fresh, prompt, config, repos, dry_run).await
}

pub async fn run<C: HubClient + Clone>(
    client: &CachedHubClient<C>,
    config: &AppConfig,
    args: &ReviewArgs,
) -> Result<()> {
    let repos = load_repo_list(&args.file)?;
    let mut prompt = PagedPrompt::stdio(config.page_size, last_page_policy(config.last_page_policy));

    let record = review_cached(client, &mut prompt, config, &repos, args.dry_run).await;

    println!("\n{}", record.summary());
    record.save(Path::new(&config.record_file))?;
    Ok(())
}
