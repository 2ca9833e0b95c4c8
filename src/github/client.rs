//! GitHub REST implementation of the CodeHost trait
//!
//! Branch refs and pull requests go through the REST API; file upload is a
//! local commit+push through the repository handle, so the pushed commit
//! matches the working tree the reviewer saw.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;

use crate::error::{Result, TandemError};
use crate::git::GitRepo;
use crate::github::host::{CodeHost, PullRequest};

const GITHUB_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("tandem/", env!("CARGO_PKG_VERSION"));

/// GitHub API client scoped to one repository
pub struct GitHubClient {
    client: Client,
    api_base: String,
    /// Repository in `owner/name` form
    repository: String,
    token: String,
    /// Local clone used for commit+push file upload
    repo: GitRepo,
}

impl GitHubClient {
    /// Create a client reading GITHUB_TOKEN from the environment
    pub fn new(repository: impl Into<String>, repo: GitRepo) -> Result<Self> {
        let token = std::env::var("GITHUB_TOKEN")
            .map_err(|_| TandemError::Config("GITHUB_TOKEN not set".to_string()))?;
        Self::with_token(repository, token, repo)
    }

    /// Create a client with an explicit token
    pub fn with_token(repository: impl Into<String>, token: String, repo: GitRepo) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| TandemError::Host {
                status: 0,
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            api_base: GITHUB_API_URL.to_string(),
            repository: repository.into(),
            token,
            repo,
        })
    }

    /// Override the API base URL (self-hosted instances, tests)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Repository owner (the part before the slash)
    fn owner(&self) -> &str {
        self.repository.split('/').next().unwrap_or(&self.repository)
    }

    async fn get(&self, path: &str) -> Result<Value> {
        let response = self
            .client
            .get(format!("{}{}", self.api_base, path))
            .bearer_auth(&self.token)
            .header("user-agent", USER_AGENT)
            .header("accept", "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| TandemError::Host {
                status: 0,
                message: format!("Request failed: {}", e),
            })?;

        Self::parse_body(response).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value> {
        let response = self
            .client
            .post(format!("{}{}", self.api_base, path))
            .bearer_auth(&self.token)
            .header("user-agent", USER_AGENT)
            .header("accept", "application/vnd.github+json")
            .json(&body)
            .send()
            .await
            .map_err(|e| TandemError::Host {
                status: 0,
                message: format!("Request failed: {}", e),
            })?;

        Self::parse_body(response).await
    }

    async fn parse_body(response: reqwest::Response) -> Result<Value> {
        let status = response.status().as_u16();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if (200..300).contains(&status) {
            return Ok(body);
        }

        let message = body["message"].as_str().unwrap_or("unknown error").to_string();
        // The errors array often carries the actionable detail ("A pull
        // request already exists for ...")
        let detail = body["errors"]
            .as_array()
            .and_then(|errors| errors.first())
            .and_then(|e| e["message"].as_str())
            .map(|d| format!("{}: {}", message, d));

        Err(TandemError::Host {
            status,
            message: detail.unwrap_or(message),
        })
    }

    fn parse_pull(value: &Value) -> Option<PullRequest> {
        Some(PullRequest {
            number: value["number"].as_u64()?,
            url: value["html_url"].as_str()?.to_string(),
            title: value["title"].as_str().unwrap_or("").to_string(),
        })
    }
}

/// Canonical web URL for a pull request
pub fn pull_request_url(repository: &str, number: u64) -> String {
    format!("https://github.com/{}/pull/{}", repository, number)
}

#[async_trait]
impl CodeHost for GitHubClient {
    async fn create_branch(&self, branch: &str, base: &str) -> Result<()> {
        let base_ref = self
            .get(&format!("/repos/{}/git/ref/heads/{}", self.repository, base))
            .await?;
        let base_sha = base_ref["object"]["sha"].as_str().ok_or_else(|| TandemError::Host {
            status: 0,
            message: format!("Missing sha for base branch '{}'", base),
        })?;

        let result = self
            .post(
                &format!("/repos/{}/git/refs", self.repository),
                json!({
                    "ref": format!("refs/heads/{}", branch),
                    "sha": base_sha,
                }),
            )
            .await;

        match result {
            Ok(_) => {
                tracing::info!(branch, base, "created remote branch");
                Ok(())
            }
            // An existing ref is fine; the push below targets it as-is
            Err(TandemError::Host { message, .. }) if message.to_lowercase().contains("already exists") => {
                tracing::info!(branch, "remote branch already exists");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn push_files(&self, branch: &str, paths: &[String], message: &str) -> Result<()> {
        self.repo.create_or_switch_branch(branch)?;
        self.repo.commit_and_push(branch, paths, message)
    }

    async fn create_pull_request(&self, title: &str, body: &str, head: &str, base: &str) -> Result<PullRequest> {
        let response = self
            .post(
                &format!("/repos/{}/pulls", self.repository),
                json!({
                    "title": title,
                    "body": body,
                    "head": head,
                    "base": base,
                }),
            )
            .await?;

        Self::parse_pull(&response).ok_or_else(|| TandemError::Host {
            status: 0,
            message: "Malformed pull request response".to_string(),
        })
    }

    async fn find_open_pull(&self, head: &str) -> Result<Option<PullRequest>> {
        let response = self
            .get(&format!(
                "/repos/{}/pulls?state=open&head={}:{}",
                self.repository,
                self.owner(),
                head
            ))
            .await?;

        Ok(response.as_array().and_then(|pulls| pulls.first()).and_then(Self::parse_pull))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_client() -> GitHubClient {
        let dir = tempdir().unwrap();
        GitHubClient::with_token("acme/widgets", "test-token".to_string(), GitRepo::new(dir.path())).unwrap()
    }

    #[test]
    fn test_owner_extraction() {
        let client = test_client();
        assert_eq!(client.owner(), "acme");
    }

    #[test]
    fn test_pull_request_url() {
        assert_eq!(
            pull_request_url("acme/widgets", 12),
            "https://github.com/acme/widgets/pull/12"
        );
    }

    #[test]
    fn test_parse_pull_complete() {
        let value = json!({
            "number": 42,
            "html_url": "https://github.com/acme/widgets/pull/42",
            "title": "add parser"
        });
        let pr = GitHubClient::parse_pull(&value).unwrap();
        assert_eq!(pr.number, 42);
        assert_eq!(pr.url, "https://github.com/acme/widgets/pull/42");
        assert_eq!(pr.title, "add parser");
    }

    #[test]
    fn test_parse_pull_missing_number() {
        let value = json!({"html_url": "https://example.com"});
        assert!(GitHubClient::parse_pull(&value).is_none());
    }
}
