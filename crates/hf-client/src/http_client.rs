//! reqwest-based Hub API client
//!
//! Direct implementation of the `HubClient` trait against the Hugging Face
//! Hub REST API. This client makes real API calls without any caching.

use crate::client::HubClient;
use crate::hub_config::HubConfig;
use crate::types::{
    CommitInfo, CommitRequest, Discussion, DiscussionStatus, ModelInfo, ModelSummary,
};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use log::debug;
use reqwest::header::{HeaderMap, AUTHORIZATION, CONTENT_TYPE, LINK};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

const USER_AGENT: &str = concat!("hf-tagger/", env!("CARGO_PKG_VERSION"));

/// Models per page when listing; the Hub caps pages at 1000
const LIST_PAGE_SIZE: usize = 1000;

/// Direct Hub API client
///
/// This is the base implementation that makes actual API calls.
/// It can be wrapped by `CachedHubClient` to add caching behavior.
#[derive(Debug, Clone)]
pub struct HttpHubClient {
    http: Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpHubClient {
    pub fn new(config: &HubConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.get(format!("{}{}", self.endpoint, path)))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => request,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DiscussionsPage {
    discussions: Vec<RawDiscussion>,
    count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDiscussion {
    num: u64,
    title: String,
    #[serde(default)]
    status: DiscussionStatus,
    author: Option<RawAuthor>,
    #[serde(default)]
    is_pull_request: bool,
}

#[derive(Debug, Deserialize)]
struct RawAuthor {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WhoAmI {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitResponse {
    commit_url: String,
    pull_request_url: Option<String>,
}

#[async_trait]
impl HubClient for HttpHubClient {
    async fn model_info(&self, repo_id: &str) -> Result<ModelInfo> {
        debug!("Fetching model info for {}", repo_id);

        let response = self
            .get(&format!("/api/models/{}", repo_id))
            .send()
            .await?;
        let info = ensure_success(response, "model info")
            .await?
            .json::<ModelInfo>()
            .await
            .with_context(|| format!("Invalid model info for {}", repo_id))?;

        Ok(info)
    }

    async fn list_models(&self, sort: &str, limit: usize) -> Result<Vec<ModelSummary>> {
        debug!("Listing up to {} models sorted by {}", limit, sort);

        let page_size = limit.clamp(1, LIST_PAGE_SIZE).to_string();
        let mut request = self.get("/api/models").query(&[
            ("sort", sort),
            ("direction", "-1"),
            ("limit", page_size.as_str()),
        ]);

        let mut models = Vec::new();
        loop {
            let response = ensure_success(request.send().await?, "model listing").await?;
            let next = next_page_url(response.headers());
            let page: Vec<ModelSummary> = response.json().await.context("Invalid model listing")?;
            let page_is_empty = page.is_empty();

            models.extend(page);
            if models.len() >= limit || page_is_empty {
                break;
            }

            match next {
                Some(url) => request = self.authorize(self.http.get(url)),
                None => break,
            }
        }

        models.truncate(limit);
        debug!("Listed {} models", models.len());
        Ok(models)
    }

    async fn fetch_readme(&self, repo_id: &str) -> Result<String> {
        debug!("Fetching README for {}", repo_id);

        let response = self
            .get(&format!("/{}/resolve/main/README.md", repo_id))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("{} has no README.md", repo_id);
            return Ok(String::new());
        }

        let readme = ensure_success(response, "README download")
            .await?
            .text()
            .await?;
        Ok(readme)
    }

    async fn discussions(&self, repo_id: &str) -> Result<Vec<Discussion>> {
        debug!("Fetching discussions for {}", repo_id);

        let mut discussions = Vec::new();
        let mut page_num = 0usize;

        loop {
            let response = self
                .get(&format!("/api/models/{}/discussions", repo_id))
                .query(&[("p", page_num.to_string())])
                .send()
                .await?;
            let page: DiscussionsPage = ensure_success(response, "discussion listing")
                .await?
                .json()
                .await
                .with_context(|| format!("Invalid discussion listing for {}", repo_id))?;

            let page_is_empty = page.discussions.is_empty();
            discussions.extend(page.discussions.into_iter().map(convert_discussion));

            if page_is_empty || discussions.len() >= page.count {
                break;
            }
            page_num += 1;
        }

        debug!("Fetched {} discussions for {}", discussions.len(), repo_id);
        Ok(discussions)
    }

    async fn whoami(&self) -> Result<String> {
        if self.token.is_none() {
            bail!("No Hub token configured, cannot determine the current user");
        }

        let response = self.get("/api/whoami-v2").send().await?;
        let me: WhoAmI = ensure_success(response, "whoami")
            .await?
            .json()
            .await
            .context("Invalid whoami response")?;
        Ok(me.name)
    }

    async fn create_commit(&self, repo_id: &str, commit: &CommitRequest) -> Result<CommitInfo> {
        if self.token.is_none() {
            bail!("No Hub token configured, cannot commit to {}", repo_id);
        }
        debug!(
            "Committing {} file(s) to {} (create_pr: {})",
            commit.files.len(),
            repo_id,
            commit.create_pr
        );

        let mut request = self
            .authorize(self.http.post(format!(
                "{}/api/models/{}/commit/main",
                self.endpoint, repo_id
            )))
            .header(CONTENT_TYPE, "application/x-ndjson")
            .body(commit_payload(commit)?);
        if commit.create_pr {
            request = request.query(&[("create_pr", "1")]);
        }

        let response: CommitResponse = ensure_success(request.send().await?, "commit")
            .await?
            .json()
            .await
            .context("Invalid commit response")?;

        Ok(CommitInfo {
            commit_url: response.commit_url,
            pull_request_url: response.pull_request_url,
        })
    }
}

/// Turn a non-success response into an error carrying status and body
async fn ensure_success(response: Response, what: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    bail!("{} request to {} failed with {}: {}", what, url, status, body.trim())
}

/// Build the NDJSON body of the commit endpoint: one header line, one line per file
fn commit_payload(commit: &CommitRequest) -> Result<String> {
    let mut lines = vec![serde_json::to_string(&json!({
        "key": "header",
        "value": {
            "summary": commit.summary,
            "description": commit.description,
        }
    }))?];

    for file in &commit.files {
        lines.push(serde_json::to_string(&json!({
            "key": "file",
            "value": {
                "content": general_purpose::STANDARD.encode(file.content.as_bytes()),
                "path": file.path,
                "encoding": "base64",
            }
        }))?);
    }

    Ok(lines.join("\n"))
}

/// Extract the `rel="next"` target from a `Link` header
fn next_page_url(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(LINK)?.to_str().ok()?;
    link.split(',').find_map(|part| {
        let (target, params) = part.split_once(';')?;
        params
            .split(';')
            .any(|p| p.trim() == "rel=\"next\"")
            .then(|| {
                target
                    .trim()
                    .trim_start_matches('<')
                    .trim_end_matches('>')
                    .to_string()
            })
    })
}

fn convert_discussion(raw: RawDiscussion) -> Discussion {
    Discussion {
        num: raw.num,
        title: raw.title,
        status: raw.status,
        author: raw.author.map(|a| a.name),
        is_pull_request: raw.is_pull_request,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CommitFile;
    use pretty_assertions::assert_eq;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_commit_payload_lines() {
        let commit = CommitRequest {
            summary: "Add library_name".to_string(),
            description: "metadata only".to_string(),
            files: vec![CommitFile {
                path: "README.md".to_string(),
                content: "hi".to_string(),
            }],
            create_pr: true,
        };

        let payload = commit_payload(&commit).unwrap();
        let lines: Vec<serde_json::Value> = payload
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["key"], "header");
        assert_eq!(lines[0]["value"]["summary"], "Add library_name");
        assert_eq!(lines[1]["key"], "file");
        assert_eq!(lines[1]["value"]["path"], "README.md");
        assert_eq!(lines[1]["value"]["content"], "aGk=");
        assert_eq!(lines[1]["value"]["encoding"], "base64");
    }

    #[test]
    fn test_next_page_url() {
        let mut headers = HeaderMap::new();
        headers.insert(
            LINK,
            HeaderValue::from_static(
                "<https://huggingface.co/api/models?cursor=abc&limit=1000>; rel=\"next\"",
            ),
        );
        assert_eq!(
            next_page_url(&headers).as_deref(),
            Some("https://huggingface.co/api/models?cursor=abc&limit=1000")
        );

        assert_eq!(next_page_url(&HeaderMap::new()), None);

        let mut prev_only = HeaderMap::new();
        prev_only.insert(LINK, HeaderValue::from_static("<https://x>; rel=\"prev\""));
        assert_eq!(next_page_url(&prev_only), None);
    }

    #[test]
    fn test_discussion_conversion() {
        let json = r#"{
            "num": 7,
            "title": "Add library_name",
            "status": "open",
            "author": {"name": "xianbao", "avatarUrl": "https://x"},
            "isPullRequest": true,
            "numComments": 1
        }"#;
        let raw: RawDiscussion = serde_json::from_str(json).unwrap();
        let discussion = convert_discussion(raw);

        assert_eq!(discussion.num, 7);
        assert_eq!(discussion.author.as_deref(), Some("xianbao"));
        assert!(discussion.is_pull_request);
        assert_eq!(discussion.status, DiscussionStatus::Open);
    }

    #[test]
    fn test_deleted_author() {
        let json = r#"{"num": 1, "title": "t", "status": "closed", "author": null}"#;
        let raw: RawDiscussion = serde_json::from_str(json).unwrap();
        let discussion = convert_discussion(raw);
        assert!(discussion.author.is_none());
        assert!(!discussion.is_pull_request);
    }

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let config = HubConfig {
            endpoint: "https://hub.example.com/".to_string(),
            token: None,
        };
        let client = HttpHubClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), "https://hub.example.com");
    }

    #[tokio::test]
    async fn test_commit_requires_token() {
        let client = HttpHubClient::new(&HubConfig::default()).unwrap();
        let commit = CommitRequest {
            summary: "x".to_string(),
            description: String::new(),
            files: vec![],
            create_pr: true,
        };
        let err = client.create_commit("acme/one", &commit).await.unwrap_err();
        assert!(err.to_string().contains("No Hub token"));
    }
}
