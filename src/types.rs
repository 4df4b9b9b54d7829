//! Core types for owner-merge

use crate::error::Error;
use std::str::FromStr;

/// Repository coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}

impl PlatformConfig {
    /// Parse an `owner/repo` slug, as found in `GITHUB_REPOSITORY`
    pub fn from_slug(slug: &str) -> Result<Self, Error> {
        match slug.trim().split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                    host: None,
                })
            }
            _ => Err(Error::Config(format!(
                "expected repository as 'owner/repo', got '{slug}'"
            ))),
        }
    }
}

/// The pull request fields the gate needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestInfo {
    /// PR number
    pub number: u64,
    /// SHA of the head commit, pinned for the merge call
    pub head_sha: String,
}

/// Result of a merge operation
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// Whether the merge was successful
    pub merged: bool,
    /// The SHA of the merge commit (if successful)
    pub sha: Option<String>,
    /// Message from the merge operation (especially on failure)
    pub message: Option<String>,
}

/// Merge strategy/method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeMethod {
    /// Create a merge commit
    #[default]
    Merge,
    /// Squash all commits into one
    Squash,
    /// Rebase commits onto base branch
    Rebase,
}

impl std::fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Squash => write!(f, "squash"),
            Self::Merge => write!(f, "merge"),
            Self::Rebase => write!(f, "rebase"),
        }
    }
}

impl FromStr for MergeMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "merge" => Ok(Self::Merge),
            "squash" => Ok(Self::Squash),
            "rebase" => Ok(Self::Rebase),
            other => Err(Error::Config(format!(
                "unknown merge method '{other}' (expected merge, squash or rebase)"
            ))),
        }
    }
}
