//! Trending scan for models without a `library_name`

use crate::cli::ScanArgs;
use crate::repo_list::write_repo_list;
use anyhow::Result;
use hf_client::HubClient;
use hf_tagger_config::AppConfig;

pub async fn untagged_trending<C: HubClient + ?Sized>(
    client: &C,
    sort: &str,
    limit: usize,
) -> Result<Vec<String>> {
    let models = client.list_models(sort, limit).await?;
    let total = models.len();

    let untagged: Vec<String> = models
        .into_iter()
        .filter(|m| m.library_name.is_none())
        .map(|m| m.id)
        .collect();

    log::info!(
        "{} of {} trending models have no library_name",
        untagged.len(),
        total
    );
    Ok(untagged)
}

pub async fn run<C: HubClient + ?Sized>(
    client: &C,
    config: &AppConfig,
    args: &ScanArgs,
) -> Result<()> {
    let sort = args.sort.as_deref().unwrap_or(&config.trending_sort);
    let limit = args.limit.unwrap_or(config.trending_limit);

    let repos = untagged_trending(client, sort, limit).await?;
    write_repo_list(&args.output, &repos)?;
    println!(
        "Found {} models without library_name, written to {}",
        repos.len(),
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::mock::MockHub;
    use hf_client::ModelSummary;
    use pretty_assertions::assert_eq;

    fn summary(id: &str, library_name: Option<&str>) -> ModelSummary {
        ModelSummary {
            id: id.to_string(),
            library_name: library_name.map(String::from),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_keeps_only_models_without_library() {
        let hub = MockHub {
            trending: vec![
                summary("acme/tagged", Some("transformers")),
                summary("acme/bare", None),
                summary("acme/diffusion", Some("diffusers")),
                summary("acme/other", None),
            ],
            ..Default::default()
        };

        let repos = untagged_trending(&hub, "likes30d", 10).await.unwrap();
        assert_eq!(repos, vec!["acme/bare", "acme/other"]);

        let limited = untagged_trending(&hub, "likes30d", 2).await.unwrap();
        assert_eq!(limited, vec!["acme/bare"]);
    }

    #[tokio::test]
    async fn test_run_writes_list() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("untagged.yaml");
        let hub = MockHub {
            trending: vec![summary("acme/bare", None)],
            ..Default::default()
        };
        let args = ScanArgs {
            sort: None,
            limit: None,
            output: output.clone(),
        };

        run(&hub, &AppConfig::default(), &args).await.unwrap();
        let written = crate::repo_list::load_repo_list(&output).unwrap();
        assert_eq!(written, vec!["acme/bare"]);
    }
}
