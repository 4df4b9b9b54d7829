//! Platform services for GitHub
//!
//! The gate only talks to the hosting platform through this trait, so the
//! orchestration can be exercised against a mock.

mod factory;
mod github;

pub use factory::create_platform_service;
pub use github::GitHubService;

use crate::error::Result;
use crate::types::{MergeMethod, MergeResult, PlatformConfig, PullRequestInfo};
use async_trait::async_trait;

/// Platform service trait for the calls the gate makes
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Get the pull request (head SHA, author)
    async fn get_pull_request(&self, pr_number: u64) -> Result<PullRequestInfo>;

    /// Whether `username` is a collaborator on the repository
    async fn is_collaborator(&self, username: &str) -> Result<bool>;

    /// Fetch a file from the default branch as raw bytes.
    ///
    /// Returns [`Error::ConfigMissing`] when the file does not exist.
    ///
    /// [`Error::ConfigMissing`]: crate::error::Error::ConfigMissing
    async fn fetch_file(&self, path: &str) -> Result<Vec<u8>>;

    /// List every file changed by the PR, all pages flattened, in API order
    async fn list_changed_files(&self, pr_number: u64) -> Result<Vec<String>>;

    /// Merge the PR, pinned to `head_sha`
    async fn merge_pr(
        &self,
        pr_number: u64,
        head_sha: &str,
        method: MergeMethod,
    ) -> Result<MergeResult>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
