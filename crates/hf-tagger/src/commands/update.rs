//! Metadata pull requests
//!
//! Rewrites the README front matter with the configured `library_name` and
//! `pipeline_tag` and submits it as a pull request. The whole README is
//! committed, so it must be read from the Hub, never from the response cache.

use anyhow::{bail, Context, Result};
use hf_client::{
    CachedHubClient, CommitFile, CommitRequest, HubClient, MetadataPatch, ModelCard, README_PATH,
};
use hf_tagger_config::AppConfig;

/// Everything needed to open one metadata PR
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrTemplate {
    pub patch: MetadataPatch,
    pub summary: String,
    pub description: String,
}

impl PrTemplate {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            patch: MetadataPatch::new(&config.library_name, &config.pipeline_tag),
            summary: config.commit_message.clone(),
            description: config.commit_description.clone(),
        }
    }
}

/// Open the metadata PR and return its URL
///
/// `client` must not serve cached READMEs.
pub async fn open_metadata_pr<C: HubClient + ?Sized>(
    client: &C,
    repo_id: &str,
    template: &PrTemplate,
) -> Result<String> {
    let readme = client.fetch_readme(repo_id).await?;
    let mut card = ModelCard::parse(&readme)
        .with_context(|| format!("Failed to parse model card of {}", repo_id))?;

    if !template.patch.apply(&mut card) {
        bail!("{} already declares the requested metadata", repo_id);
    }

    let commit = CommitRequest {
        summary: template.summary.clone(),
        description: template.description.clone(),
        files: vec![CommitFile {
            path: README_PATH.to_string(),
            content: card.render()?,
        }],
        create_pr: true,
    };

    let info = client.create_commit(repo_id, &commit).await?;
    log::info!("Opened metadata PR for {}: {:?}", repo_id, info.pull_request_url);
    Ok(info.pull_request_url.unwrap_or(info.commit_url))
}

pub async fn run<C: HubClient + Clone>(
    client: &CachedHubClient<C>,
    config: &AppConfig,
    repo: &str,
) -> Result<()> {
    println!("Updating {}", repo);
    let fresh = client.bypass_reads();
    let url = open_metadata_pr(&fresh, repo, &PrTemplate::from_config(config)).await?;
    println!("PR created for {}. PR URL: {}", repo, url);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::mock::MockHub;
    use hf_client::{ApiCache, CacheMode};
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn test_opens_pr_with_patched_readme() {
        let hub = MockHub::default().with_readme("acme/one", "---\nlicense: mit\n---\n# One\n");
        let template = PrTemplate::from_config(&AppConfig::default());

        let url = open_metadata_pr(&hub, "acme/one", &template).await.unwrap();
        assert_eq!(url, "https://hub/acme/one/discussions/1");

        let commits = hub.committed();
        assert_eq!(commits.len(), 1);
        let (repo, commit) = &commits[0];
        assert_eq!(repo, "acme/one");
        assert!(commit.create_pr);
        assert_eq!(commit.files[0].path, "README.md");

        let card = ModelCard::parse(&commit.files[0].content).unwrap();
        assert_eq!(card.get_str("license"), Some("mit"));
        assert_eq!(card.get_str("library_name"), Some("transformers"));
        assert_eq!(card.get_str("pipeline_tag"), Some("text-generation"));
        assert_eq!(card.content(), "# One\n");
    }

    #[tokio::test]
    async fn test_update_commits_current_readme_not_cached_copy() {
        let hub = Arc::new(MockHub::default().with_readme("acme/one", "# Old card\n"));
        let cache = Arc::new(Mutex::new(ApiCache::default()));
        let client = CachedHubClient::new(Arc::clone(&hub), cache, CacheMode::ReadWrite);

        // An earlier run cached the README
        assert_eq!(client.fetch_readme("acme/one").await.unwrap(), "# Old card\n");
        hub.set_readme("acme/one", "# New card with license section\n");

        run(&client, &AppConfig::default(), "acme/one").await.unwrap();

        let commits = hub.committed();
        assert_eq!(commits.len(), 1);
        let card = ModelCard::parse(&commits[0].1.files[0].content).unwrap();
        assert_eq!(card.content(), "# New card with license section\n");
        assert_eq!(card.get_str("library_name"), Some("transformers"));
    }

    #[tokio::test]
    async fn test_already_tagged_card_is_not_committed() {
        let hub = MockHub::default().with_readme(
            "acme/done",
            "---\nlibrary_name: transformers\npipeline_tag: text-generation\n---\n",
        );
        let template = PrTemplate::from_config(&AppConfig::default());

        assert!(open_metadata_pr(&hub, "acme/done", &template).await.is_err());
        assert!(hub.committed().is_empty());
    }

    #[tokio::test]
    async fn test_commit_failure_propagates() {
        let mut hub = MockHub::default().with_readme("acme/locked", "# Locked\n");
        hub.failing_commits.insert("acme/locked".to_string());
        let template = PrTemplate::from_config(&AppConfig::default());

        let err = open_metadata_pr(&hub, "acme/locked", &template)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("403"));
    }
}
