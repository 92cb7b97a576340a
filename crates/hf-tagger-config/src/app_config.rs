//! Application configuration
//!
//! Configuration loaded from `.hf-tagger.toml`.

use serde::{Deserialize, Serialize};

/// What a space press does on the last page of a README
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LastPage {
    /// Space finishes the review and counts as "not confirmed"
    #[default]
    Finish,
    /// Space is ignored; only y/n end the review
    RequireDecision,
}

/// Application configuration loaded from .hf-tagger.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Hub endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// README lines shown per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default)]
    pub last_page_policy: LastPage,

    /// Value written to `library_name`
    #[serde(default = "default_library_name")]
    pub library_name: String,

    /// Value written to `pipeline_tag`
    #[serde(default = "default_pipeline_tag")]
    pub pipeline_tag: String,

    /// File a repository must contain to be considered for tagging
    #[serde(default = "default_required_file")]
    pub required_file: String,

    /// Title of the metadata pull request
    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    /// Description of the metadata pull request
    #[serde(default = "default_commit_description")]
    pub commit_description: String,

    /// Author whose open PRs mark a repository as already handled.
    /// Falls back to the authenticated user.
    #[serde(default)]
    pub pr_author: Option<String>,

    #[serde(default = "default_trending_sort")]
    pub trending_sort: String,

    #[serde(default = "default_trending_limit")]
    pub trending_limit: usize,

    /// README keywords hinting at an untagged transformers model
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,

    /// Where `review` writes its batch record
    #[serde(default = "default_record_file")]
    pub record_file: String,
}

fn default_endpoint() -> String {
    "https://huggingface.co".to_string()
}

fn default_page_size() -> usize {
    30
}

fn default_library_name() -> String {
    "transformers".to_string()
}

fn default_pipeline_tag() -> String {
    "text-generation".to_string()
}

fn default_required_file() -> String {
    "config.json".to_string()
}

fn default_commit_message() -> String {
    "Update metadata: Add library_name and pipeline_tag for text-generation pipeline using Transformers"
        .to_string()
}

fn default_commit_description() -> String {
    "This PR adds the `library_name` and `pipeline_tag` metadata so the model \
     shows up correctly in Hub filters and widgets."
        .to_string()
}

fn default_trending_sort() -> String {
    "likes30d".to_string()
}

fn default_trending_limit() -> usize {
    2000
}

fn default_keywords() -> Vec<String> {
    ["transformers", "llm", "text-generation"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_record_file() -> String {
    "filtered_repos.yaml".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            page_size: default_page_size(),
            last_page_policy: LastPage::default(),
            library_name: default_library_name(),
            pipeline_tag: default_pipeline_tag(),
            required_file: default_required_file(),
            commit_message: default_commit_message(),
            commit_description: default_commit_description(),
            pr_author: None,
            trending_sort: default_trending_sort(),
            trending_limit: default_trending_limit(),
            keywords: default_keywords(),
            record_file: default_record_file(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        Self::from_content(crate::load_config_file())
    }

    /// Load config from an explicit file, falling back to defaults
    pub fn load_from(path: &std::path::Path) -> Self {
        Self::from_content(crate::load_config_from(path))
    }

    fn from_content(content: Option<String>) -> Self {
        if let Some(content) = content {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }
}
