//! Pull request event context
//!
//! In GitHub Actions the triggering event is a JSON payload on disk
//! (`GITHUB_EVENT_PATH`). Only the fields the gate needs are read; any of
//! them can be overridden, which also allows running outside Actions.

use crate::error::{Error, Result};
use crate::types::PlatformConfig;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<PayloadPullRequest>,
    sender: Option<PayloadActor>,
    repository: Option<PayloadRepository>,
}

#[derive(Debug, Deserialize)]
struct PayloadPullRequest {
    number: u64,
    head: Option<PayloadHead>,
}

#[derive(Debug, Deserialize)]
struct PayloadHead {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct PayloadActor {
    login: String,
}

#[derive(Debug, Deserialize)]
struct PayloadRepository {
    full_name: String,
}

/// Explicit values taking precedence over the event payload
#[derive(Debug, Clone, Default)]
pub struct EventOverrides {
    /// Pull request number
    pub pr_number: Option<u64>,
    /// Submitter login
    pub submitter: Option<String>,
    /// Repository as `owner/repo`
    pub repository: Option<String>,
}

/// Everything the gate needs to know about the triggering event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContext {
    /// Target repository
    pub repo: PlatformConfig,
    /// Pull request number
    pub pr_number: u64,
    /// Head SHA from the payload, if present
    pub head_sha: Option<String>,
    /// Identity that triggered the event
    pub submitter: String,
}

impl EventContext {
    /// Build from an optional JSON payload plus overrides
    pub fn resolve(payload: Option<&str>, overrides: &EventOverrides) -> Result<Self> {
        let payload: Option<EventPayload> = payload
            .map(serde_json::from_str)
            .transpose()
            .map_err(|e| Error::Event(format!("failed to parse event payload: {e}")))?;

        let (pull_request, sender, repository) = match payload {
            Some(p) => (p.pull_request, p.sender, p.repository),
            None => (None, None, None),
        };

        let pr_number = overrides
            .pr_number
            .or_else(|| pull_request.as_ref().map(|pr| pr.number))
            .ok_or_else(|| {
                Error::Event("no pull request number (not a pull_request event?)".to_string())
            })?;

        // A payload SHA only describes the payload's own PR
        let head_sha = pull_request
            .filter(|pr| pr.number == pr_number)
            .and_then(|pr| pr.head)
            .map(|head| head.sha);

        let submitter = overrides
            .submitter
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| sender.map(|s| s.login))
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::Event("no submitter in event payload".to_string()))?;

        let slug = overrides
            .repository
            .clone()
            .filter(|r| !r.is_empty())
            .or_else(|| repository.map(|r| r.full_name))
            .ok_or_else(|| Error::Event("no repository given".to_string()))?;
        let repo = PlatformConfig::from_slug(&slug)?;

        debug!(pr_number, %submitter, repo = %slug, "resolved event context");
        Ok(Self {
            repo,
            pr_number,
            head_sha,
            submitter,
        })
    }

    /// Read the payload at `event_path` (if any) and resolve
    pub fn load(event_path: Option<&Path>, overrides: &EventOverrides) -> Result<Self> {
        let payload = event_path
            .map(|path| {
                std::fs::read_to_string(path).map_err(|e| {
                    Error::Event(format!("failed to read {}: {e}", path.display()))
                })
            })
            .transpose()?;
        Self::resolve(payload.as_deref(), overrides)
    }

    /// Whether the submitter is the repository owner
    pub fn submitter_is_owner(&self) -> bool {
        self.submitter == self.repo.owner
    }
}
