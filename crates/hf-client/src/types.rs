//! Hugging Face Hub API data transfer objects
//!
//! These types represent the data returned from the Hub API.
//! They are intentionally separate from the tagging workflow
//! to keep this crate pure and reusable.

use serde::{Deserialize, Serialize};

/// Repository details from `GET /api/models/{repo_id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Repository id (e.g., "openai-community/gpt2")
    pub id: String,

    /// Library the Hub detected or the card declares (e.g., "transformers")
    #[serde(default)]
    pub library_name: Option<String>,

    /// Task the model is tagged for (e.g., "text-generation")
    #[serde(default)]
    pub pipeline_tag: Option<String>,

    /// All tags on the repository
    #[serde(default)]
    pub tags: Vec<String>,

    /// Files in the repository
    #[serde(default)]
    pub siblings: Vec<Sibling>,
}

impl ModelInfo {
    /// Both `library_name` and `pipeline_tag` are set
    pub fn is_tagged(&self) -> bool {
        self.library_name.is_some() && self.pipeline_tag.is_some()
    }

    /// Does the repository contain a file at this path?
    pub fn has_file(&self, path: &str) -> bool {
        self.siblings.iter().any(|s| s.rfilename == path)
    }
}

/// A file entry in a repository listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sibling {
    /// Path relative to the repository root
    pub rfilename: String,
}

/// A repository from `GET /api/models` listings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub id: String,

    #[serde(default)]
    pub library_name: Option<String>,

    #[serde(default)]
    pub pipeline_tag: Option<String>,

    #[serde(default)]
    pub likes: u64,

    #[serde(default)]
    pub downloads: u64,
}

/// A discussion or pull request on a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discussion {
    /// Discussion number (e.g., 12)
    pub num: u64,

    pub title: String,

    pub status: DiscussionStatus,

    /// Author's Hub username (None for deleted accounts)
    pub author: Option<String>,

    pub is_pull_request: bool,
}

/// Discussion state as reported by the Hub
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscussionStatus {
    Open,
    Closed,
    Merged,
    Draft,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A file to write in a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitFile {
    /// Path relative to the repository root
    pub path: String,
    pub content: String,
}

/// A commit to push to a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRequest {
    /// Commit title
    pub summary: String,
    pub description: String,
    pub files: Vec<CommitFile>,
    /// Open a pull request instead of committing to `main`
    pub create_pr: bool,
}

/// Result of a commit operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// URL of the commit
    pub commit_url: String,
    /// URL of the opened pull request (only set when `create_pr` was requested)
    pub pull_request_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_info_from_hub_json() {
        let json = r#"{
            "_id": "621ffdc036468d709f174338",
            "id": "openai-community/gpt2",
            "modelId": "openai-community/gpt2",
            "library_name": "transformers",
            "pipeline_tag": "text-generation",
            "tags": ["transformers", "pytorch", "gpt2"],
            "siblings": [{"rfilename": "config.json"}, {"rfilename": "README.md"}],
            "likes": 2500
        }"#;

        let info: ModelInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.id, "openai-community/gpt2");
        assert!(info.is_tagged());
        assert!(info.has_file("config.json"));
        assert!(!info.has_file("model.safetensors"));
    }

    #[test]
    fn test_model_info_missing_fields() {
        let info: ModelInfo = serde_json::from_str(r#"{"id": "acme/bare"}"#).unwrap();
        assert!(info.library_name.is_none());
        assert!(!info.is_tagged());
        assert!(info.siblings.is_empty());
    }

    #[test]
    fn test_partially_tagged_is_not_tagged() {
        let info = ModelInfo {
            id: "acme/half".to_string(),
            library_name: Some("transformers".to_string()),
            ..ModelInfo::default()
        };
        assert!(!info.is_tagged());
    }

    #[test]
    fn test_discussion_status_serde() {
        let states = vec![
            (DiscussionStatus::Open, "\"open\""),
            (DiscussionStatus::Closed, "\"closed\""),
            (DiscussionStatus::Merged, "\"merged\""),
            (DiscussionStatus::Draft, "\"draft\""),
        ];

        for (state, expected_json) in states {
            assert_eq!(serde_json::to_string(&state).unwrap(), expected_json);
        }

        let other: DiscussionStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(other, DiscussionStatus::Unknown);
    }
}
