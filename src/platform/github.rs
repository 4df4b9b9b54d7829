//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{MergeMethod, MergeResult, PlatformConfig, PullRequestInfo};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use octocrab::Octocrab;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

/// Contents API response for a single file
#[derive(Deserialize)]
struct ContentResponse {
    #[serde(rename = "type")]
    kind: String,
    content: Option<String>,
    encoding: Option<String>,
}

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
    /// Token for raw HTTP requests (contents, collaborator checks)
    token: String,
    /// HTTP client for raw requests
    http_client: Client,
    /// API base URL for raw requests, without trailing slash
    api_base: String,
}

impl GitHubService {
    /// Create a new GitHub service
    pub fn new(token: &str, owner: String, repo: String, host: Option<String>) -> Result<Self> {
        let api_base = host.as_ref().map_or_else(
            || "https://api.github.com".to_string(),
            |h| format!("https://{h}/api/v3"),
        );
        let config = PlatformConfig { owner, repo, host };
        Self::with_api_base(token, config, &api_base)
    }

    /// Create a service against an explicit API base URL
    pub fn with_api_base(token: &str, config: PlatformConfig, api_base: &str) -> Result<Self> {
        let api_base = api_base.trim_end_matches('/').to_string();

        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(api_base.as_str())
            .map_err(|e| Error::GitHubApi(e.to_string()))?
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("owner-merge")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            token: token.to_string(),
            http_client,
            api_base,
        })
    }

    fn repo_url(&self, suffix: &str) -> String {
        format!(
            "{}/repos/{}/{}/{suffix}",
            self.api_base, self.config.owner, self.config.repo
        )
    }

    async fn raw_get(&self, url: &str) -> Result<reqwest::Response> {
        self.http_client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Request to {url} failed: {e}")))
    }
}

/// Decode a contents API body into raw bytes
fn decode_content(path: &str, body: ContentResponse) -> Result<Vec<u8>> {
    if body.kind != "file" {
        return Err(Error::ConfigMalformed(format!(
            "'{path}' is a {}, not a file",
            body.kind
        )));
    }

    let content = body.content.unwrap_or_default();
    match body.encoding.as_deref() {
        Some("base64") => {
            // GitHub wraps base64 at 60 columns
            let cleaned: String = content.chars().filter(|c| !c.is_whitespace()).collect();
            BASE64
                .decode(cleaned)
                .map_err(|e| Error::ConfigMalformed(format!("bad base64 in '{path}': {e}")))
        }
        Some("utf-8") | None => Ok(content.into_bytes()),
        Some(other) => Err(Error::GitHubApi(format!(
            "unsupported content encoding '{other}' for '{path}' (file too large?)"
        ))),
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn get_pull_request(&self, pr_number: u64) -> Result<PullRequestInfo> {
        debug!(pr_number, "getting PR");
        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .get(pr_number)
            .await?;

        let info = PullRequestInfo {
            number: pr.number,
            head_sha: pr.head.sha.clone(),
        };
        debug!(pr_number, head_sha = %info.head_sha, "got PR");
        Ok(info)
    }

    async fn is_collaborator(&self, username: &str) -> Result<bool> {
        debug!(username, "checking collaborator status");
        let url = self.repo_url(&format!("collaborators/{username}"));
        let response = self.raw_get(&url).await?;

        // 204 collaborator, 404 not a collaborator
        match response.status() {
            StatusCode::NO_CONTENT => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(Error::GitHubApi(format!(
                "collaborator check for '{username}' returned {status}"
            ))),
        }
    }

    async fn fetch_file(&self, path: &str) -> Result<Vec<u8>> {
        debug!(path, "fetching file");
        let url = self.repo_url(&format!("contents/{path}"));
        let response = self.raw_get(&url).await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::ConfigMissing(path.to_string()));
        }
        if !status.is_success() {
            return Err(Error::GitHubApi(format!("fetching '{path}' returned {status}")));
        }

        let body: ContentResponse = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse contents of '{path}': {e}")))?;

        let bytes = decode_content(path, body)?;
        debug!(path, size = bytes.len(), "fetched file");
        Ok(bytes)
    }

    async fn list_changed_files(&self, pr_number: u64) -> Result<Vec<String>> {
        debug!(pr_number, "listing changed files");
        let first_page = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .list_files(pr_number)
            .await?;

        let entries = self.client.all_pages(first_page).await?;
        let files: Vec<String> = entries.into_iter().map(|e| e.filename).collect();
        debug!(pr_number, count = files.len(), "listed changed files");
        Ok(files)
    }

    async fn merge_pr(
        &self,
        pr_number: u64,
        head_sha: &str,
        method: MergeMethod,
    ) -> Result<MergeResult> {
        debug!(pr_number, head_sha, %method, "merging PR");

        let octocrab_method = match method {
            MergeMethod::Squash => octocrab::params::pulls::MergeMethod::Squash,
            MergeMethod::Merge => octocrab::params::pulls::MergeMethod::Merge,
            MergeMethod::Rebase => octocrab::params::pulls::MergeMethod::Rebase,
        };

        let result = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .merge(pr_number)
            .method(octocrab_method)
            .sha(head_sha)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Merge failed: {e}")))?;

        let merge_result = MergeResult {
            merged: result.merged,
            sha: result.sha,
            message: result.message,
        };

        debug!(
            pr_number,
            merged = merge_result.merged,
            sha = ?merge_result.sha,
            "merge complete"
        );
        Ok(merge_result)
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(kind: &str, content: Option<&str>, encoding: Option<&str>) -> ContentResponse {
        ContentResponse {
            kind: kind.to_string(),
            content: content.map(String::from),
            encoding: encoding.map(String::from),
        }
    }

    #[test]
    fn test_decode_wrapped_base64() {
        // "*.js @alice\n" split across lines like the API does
        let body = content("file", Some("Ki5qcyBA\nYWxpY2UK\n"), Some("base64"));
        assert_eq!(decode_content("CODEOWNERS", body).unwrap(), b"*.js @alice\n");
    }

    #[test]
    fn test_decode_rejects_directories() {
        let body = content("dir", None, None);
        assert!(matches!(
            decode_content(".github/CODEOWNERS", body),
            Err(Error::ConfigMalformed(_))
        ));
    }

    #[test]
    fn test_decode_bad_base64() {
        let body = content("file", Some("%%%"), Some("base64"));
        assert!(matches!(
            decode_content("CODEOWNERS", body),
            Err(Error::ConfigMalformed(_))
        ));
    }

    #[test]
    fn test_decode_unsupported_encoding() {
        let body = content("file", Some(""), Some("none"));
        assert!(matches!(
            decode_content("CODEOWNERS", body),
            Err(Error::GitHubApi(_))
        ));
    }
}
