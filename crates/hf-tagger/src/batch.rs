//! Outcome of one `review` run
//!
//! The record is assembled in memory while the pipeline runs and written to
//! disk once at the end, so an aborted batch never leaves a half-written file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRecord {
    /// Already carry library_name and pipeline_tag
    pub filtered_repos: Vec<String>,
    /// Need library_name/pipeline_tag added
    pub repos_without_tags: Vec<String>,
    pub confirmed_repos: Vec<String>,
    pub not_confirmed_repos: Vec<String>,
    /// Confirmed and without an existing PR by the configured author
    pub repos_without_prs: Vec<String>,
    pub repos_with_existing_prs: Vec<String>,
    /// Repository id to pull request URL
    pub created_prs: BTreeMap<String, String>,
    pub failed_updates: Vec<String>,
    /// The operator interrupted the review
    pub aborted: bool,
}

impl BatchRecord {
    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self).context("Failed to serialize batch record")?;
        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write batch record {}", path.display()))?;
        log::info!("Batch record written to {}", path.display());
        Ok(())
    }

    /// Human readable end-of-run report
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        if self.aborted {
            lines.push("Review aborted; remaining repositories were not reviewed.".to_string());
        }
        lines.push(format!("Already tagged: {}", self.filtered_repos.len()));
        lines.push(format!("Needing update: {}", self.repos_without_tags.len()));
        lines.push(format!("Confirmed: {:?}", self.confirmed_repos));
        lines.push(format!("Not confirmed: {:?}", self.not_confirmed_repos));

        if !self.created_prs.is_empty() {
            lines.push("Pull requests created:".to_string());
            for (repo, url) in &self.created_prs {
                lines.push(format!("  {} {}", repo, url));
            }
        }
        if !self.repos_with_existing_prs.is_empty() {
            lines.push(format!(
                "Skipped, PR already open: {:?}",
                self.repos_with_existing_prs
            ));
        }
        if !self.failed_updates.is_empty() {
            lines.push(format!("Failed updates: {:?}", self.failed_updates));
        }

        lines.join("\n")
    }
}
