//! GitHub token resolution

use crate::auth::AuthSource;
use crate::error::{Error, Result};
use tokio::process::Command;
use tracing::debug;

/// Resolved GitHub credentials
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// API token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
}

/// Pick the explicit token, else the fallback token.
///
/// Blank values are treated as unset.
pub fn resolve_github_token(
    explicit: Option<&str>,
    fallback: Option<&str>,
) -> Option<GitHubAuthConfig> {
    fn non_blank(t: Option<&str>) -> Option<&str> {
        t.map(str::trim).filter(|t| !t.is_empty())
    }

    if let Some(token) = non_blank(explicit) {
        return Some(GitHubAuthConfig {
            token: token.to_string(),
            source: AuthSource::Explicit,
        });
    }

    non_blank(fallback).map(|token| GitHubAuthConfig {
        token: token.to_string(),
        source: AuthSource::EnvVar,
    })
}

/// Resolve a token, falling back to `gh auth token`.
///
/// `explicit` and `fallback` are the `GITHUB_TOKEN` and `GH_TOKEN` values
/// the caller has already read.
pub async fn get_github_auth(
    explicit: Option<&str>,
    fallback: Option<&str>,
) -> Result<GitHubAuthConfig> {
    if let Some(auth) = resolve_github_token(explicit, fallback) {
        debug!(source = ?auth.source, "using GitHub token");
        return Ok(auth);
    }

    debug!("no token in environment, asking gh CLI");
    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .await
        .map_err(|e| {
            Error::Auth(format!("no GITHUB_TOKEN or GH_TOKEN set and gh CLI unavailable: {e}"))
        })?;

    if !output.status.success() {
        return Err(Error::Auth(
            "no GITHUB_TOKEN or GH_TOKEN set and `gh auth token` failed; run `gh auth login`"
                .to_string(),
        ));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(Error::Auth("`gh auth token` returned an empty token".to_string()));
    }

    Ok(GitHubAuthConfig {
        token,
        source: AuthSource::Cli,
    })
}
