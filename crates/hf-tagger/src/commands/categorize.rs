//! Sort repositories by declared library and README keywords

use crate::cli::CategorizeArgs;
use crate::repo_list::load_repo_list;
use anyhow::Result;
use hf_client::{HubClient, ModelCard};
use hf_tagger_config::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    /// Card declares the target library
    TargetLibrary,
    /// Card declares some other library
    OtherLibrary(String),
    /// No library declared, README mentions a keyword
    KeywordMatch,
    /// No library declared, no keyword
    NoMatch,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Categories {
    pub target_library: Vec<String>,
    pub other_library: Vec<(String, String)>,
    pub keyword_match: Vec<String>,
    pub no_match: Vec<String>,
    pub failed: Vec<String>,
}

impl Categories {
    fn push(&mut self, repo: String, category: Category) {
        match category {
            Category::TargetLibrary => self.target_library.push(repo),
            Category::OtherLibrary(library) => self.other_library.push((repo, library)),
            Category::KeywordMatch => self.keyword_match.push(repo),
            Category::NoMatch => self.no_match.push(repo),
        }
    }

    pub fn report(&self, target_library: &str) -> String {
        let mut lines = vec![
            format!("Repos with library_name = {}:", target_library),
            format!("{:?}", self.target_library),
            String::new(),
            "Repos with another library_name:".to_string(),
        ];
        lines.extend(
            self.other_library
                .iter()
                .map(|(repo, library)| format!("{} (Library Name: {})", repo, library)),
        );
        lines.push(String::new());
        lines.push(format!(
            "Repos without library_name that mention a keyword (candidates for {}):",
            target_library
        ));
        lines.push(format!("{:?}", self.keyword_match));
        lines.push(String::new());
        lines.push("Repos without library_name and no keyword:".to_string());
        lines.push(format!("{:?}", self.no_match));
        if !self.failed.is_empty() {
            lines.push(String::new());
            lines.push(format!("Could not be processed: {:?}", self.failed));
        }
        lines.join("\n")
    }
}

/// Case-insensitive classification of one README
pub fn classify(readme: &str, target_library: &str, keywords: &[String]) -> Result<Category> {
    let card = ModelCard::parse(readme)?;

    if let Some(library) = card.get_str("library_name") {
        return Ok(if library.eq_ignore_ascii_case(target_library) {
            Category::TargetLibrary
        } else {
            Category::OtherLibrary(library.to_string())
        });
    }

    let text = readme.to_lowercase();
    if keywords.iter().any(|k| text.contains(&k.to_lowercase())) {
        Ok(Category::KeywordMatch)
    } else {
        Ok(Category::NoMatch)
    }
}

pub async fn categorize<C: HubClient + ?Sized>(
    client: &C,
    repos: &[String],
    target_library: &str,
    keywords: &[String],
) -> Categories {
    let mut categories = Categories::default();

    for repo in repos {
        let category = match client.fetch_readme(repo).await {
            Ok(readme) => classify(&readme, target_library, keywords),
            Err(e) => Err(e),
        };

        match category {
            Ok(category) => {
                log::debug!("{} -> {:?}", repo, category);
                categories.push(repo.clone(), category);
            }
            Err(e) => {
                log::warn!("Error processing repository {}: {:#}", repo, e);
                categories.failed.push(repo.clone());
            }
        }
    }

    categories
}

pub async fn run<C: HubClient + ?Sized>(
    client: &C,
    config: &AppConfig,
    args: &CategorizeArgs,
) -> Result<()> {
    let repos = match &args.file {
        Some(path) => load_repo_list(path)?,
        None => args.repos.clone(),
    };

    let categories = categorize(client, &repos, &config.library_name, &config.keywords).await;
    println!("{}", categories.report(&config.library_name));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::mock::MockHub;
    use pretty_assertions::assert_eq;

    fn keywords() -> Vec<String> {
        AppConfig::default().keywords
    }

    #[test]
    fn test_classify_library() {
        let readme = "---\nlibrary_name: Transformers\n---\n";
        assert_eq!(
            classify(readme, "transformers", &keywords()).unwrap(),
            Category::TargetLibrary
        );

        let readme = "---\nlibrary_name: diffusers\n---\nUses transformers too";
        assert_eq!(
            classify(readme, "transformers", &keywords()).unwrap(),
            Category::OtherLibrary("diffusers".to_string())
        );
    }

    #[test]
    fn test_classify_keywords_case_insensitive() {
        assert_eq!(
            classify("# An LLM for chat", "transformers", &keywords()).unwrap(),
            Category::KeywordMatch
        );
        assert_eq!(
            classify("# A ControlNet", "transformers", &keywords()).unwrap(),
            Category::NoMatch
        );
    }

    #[tokio::test]
    async fn test_categorize_buckets() {
        let hub = MockHub::default()
            .with_readme("acme/tf", "---\nlibrary_name: transformers\n---\n")
            .with_readme("acme/diff", "---\nlibrary_name: diffusers\n---\n")
            .with_readme("acme/llm", "A text-generation model")
            .with_readme("acme/art", "Pretty pictures")
            .with_readme("acme/broken", "---\n- not\n- a mapping\n---\n");
        let repos: Vec<String> = ["acme/tf", "acme/diff", "acme/llm", "acme/art", "acme/broken"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let categories = categorize(&hub, &repos, "transformers", &keywords()).await;
        assert_eq!(categories.target_library, vec!["acme/tf"]);
        assert_eq!(
            categories.other_library,
            vec![("acme/diff".to_string(), "diffusers".to_string())]
        );
        assert_eq!(categories.keyword_match, vec!["acme/llm"]);
        assert_eq!(categories.no_match, vec!["acme/art"]);
        assert_eq!(categories.failed, vec!["acme/broken"]);

        let report = categories.report("transformers");
        assert!(report.contains("acme/diff (Library Name: diffusers)"));
        assert!(report.contains("Could not be processed"));
    }
}
