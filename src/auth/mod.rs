//! Authentication for GitHub
//!
//! Supports an explicit token (typically `GITHUB_TOKEN` in Actions), the
//! `GH_TOKEN` environment variable, and the `gh` CLI.

mod github;

pub use github::{GitHubAuthConfig, get_github_auth, resolve_github_token};

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token passed explicitly (flag or `GITHUB_TOKEN`)
    Explicit,
    /// Fallback token from `GH_TOKEN`
    EnvVar,
    /// Token from CLI tool (gh)
    Cli,
}
