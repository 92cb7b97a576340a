//! Repository id lists
//!
//! Accepted formats: a YAML sequence, a YAML mapping with a `filtered_repos`
//! or `repos_without_tags` key, or plain text with one id per line (blank
//! lines and `#` comments skipped).

use anyhow::{Context, Result};
use serde_yaml::Value;
use std::path::Path;

pub fn load_repo_list(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read repository list {}", path.display()))?;
    let repos = parse_repo_list(&content);
    log::info!("Loaded {} repositories from {}", repos.len(), path.display());
    Ok(repos)
}

pub fn parse_repo_list(content: &str) -> Vec<String> {
    let ids = match serde_yaml::from_str::<Value>(content) {
        Ok(Value::Sequence(items)) => strings(&items),
        Ok(Value::Mapping(map)) => ["repos_without_tags", "filtered_repos"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_sequence))
            .map(|items| strings(items))
            .unwrap_or_default(),
        _ => content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(String::from)
            .collect(),
    };
    dedup(ids)
}

pub fn write_repo_list(path: &Path, repos: &[String]) -> Result<()> {
    let yaml = serde_yaml::to_string(repos)?;
    std::fs::write(path, yaml)
        .with_context(|| format!("Failed to write repository list {}", path.display()))?;
    log::info!("Wrote {} repositories to {}", repos.len(), path.display());
    Ok(())
}

fn strings(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

fn dedup(ids: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
