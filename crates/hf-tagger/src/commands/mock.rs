//! In-memory Hub used by command tests

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use hf_client::{
    CommitInfo, CommitRequest, Discussion, DiscussionStatus, HubClient, ModelInfo, ModelSummary,
    Sibling,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Default)]
pub struct MockHub {
    pub models: Mutex<HashMap<String, ModelInfo>>,
    pub readmes: Mutex<HashMap<String, String>>,
    pub discussions: Mutex<HashMap<String, Vec<Discussion>>>,
    pub trending: Vec<ModelSummary>,
    pub user: Option<String>,
    pub failing_commits: HashSet<String>,
    pub commits: Mutex<Vec<(String, CommitRequest)>>,
}

impl MockHub {
    pub fn with_model(
        self,
        id: &str,
        library_name: Option<&str>,
        pipeline_tag: Option<&str>,
        files: &[&str],
    ) -> Self {
        self.set_model(id, library_name, pipeline_tag, files);
        self
    }

    /// Change a model on the Hub side
    pub fn set_model(
        &self,
        id: &str,
        library_name: Option<&str>,
        pipeline_tag: Option<&str>,
        files: &[&str],
    ) {
        self.models.lock().unwrap().insert(
            id.to_string(),
            ModelInfo {
                id: id.to_string(),
                library_name: library_name.map(String::from),
                pipeline_tag: pipeline_tag.map(String::from),
                tags: vec![],
                siblings: files
                    .iter()
                    .map(|f| Sibling {
                        rfilename: f.to_string(),
                    })
                    .collect(),
            },
        );
    }

    pub fn with_readme(self, id: &str, readme: &str) -> Self {
        self.set_readme(id, readme);
        self
    }

    /// Edit a README on the Hub side
    pub fn set_readme(&self, id: &str, readme: &str) {
        self.readmes
            .lock()
            .unwrap()
            .insert(id.to_string(), readme.to_string());
    }

    pub fn with_pr(self, id: &str, author: &str) -> Self {
        self.open_pr(id, author);
        self
    }

    /// Someone opens a PR on the Hub side
    pub fn open_pr(&self, id: &str, author: &str) {
        self.discussions
            .lock()
            .unwrap()
            .entry(id.to_string())
            .or_default()
            .push(Discussion {
                num: 1,
                title: "Update metadata".to_string(),
                status: DiscussionStatus::Open,
                author: Some(author.to_string()),
                is_pull_request: true,
            });
    }

    pub fn with_user(mut self, user: &str) -> Self {
        self.user = Some(user.to_string());
        self
    }

    pub fn committed(&self) -> Vec<(String, CommitRequest)> {
        self.commits.lock().unwrap().clone()
    }
}

#[async_trait]
impl HubClient for MockHub {
    async fn model_info(&self, repo_id: &str) -> Result<ModelInfo> {
        self.models
            .lock()
            .unwrap()
            .get(repo_id)
            .cloned()
            .ok_or_else(|| anyhow!("404 for {}", repo_id))
    }

    async fn list_models(&self, _sort: &str, limit: usize) -> Result<Vec<ModelSummary>> {
        Ok(self.trending.iter().take(limit).cloned().collect())
    }

    async fn fetch_readme(&self, repo_id: &str) -> Result<String> {
        Ok(self.readmes.lock().unwrap().get(repo_id).cloned().unwrap_or_default())
    }

    async fn discussions(&self, repo_id: &str) -> Result<Vec<Discussion>> {
        Ok(self
            .discussions
            .lock()
            .unwrap()
            .get(repo_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn whoami(&self) -> Result<String> {
        self.user.clone().ok_or_else(|| anyhow!("not logged in"))
    }

    async fn create_commit(&self, repo_id: &str, commit: &CommitRequest) -> Result<CommitInfo> {
        if self.failing_commits.contains(repo_id) {
            bail!("403 for {}", repo_id);
        }
        let mut commits = self.commits.lock().unwrap();
        commits.push((repo_id.to_string(), commit.clone()));
        Ok(CommitInfo {
            commit_url: format!("https://hub/{}/commit/abc", repo_id),
            pull_request_url: Some(format!(
                "https://hub/{}/discussions/{}",
                repo_id,
                commits.len()
            )),
        })
    }
}
