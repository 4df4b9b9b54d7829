//! Error types for owner-merge

use thiserror::Error;

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while gating a pull request
#[derive(Debug, Error)]
pub enum Error {
    /// An ownership pattern could not be compiled
    #[error("invalid pattern '{pattern}': {reason}")]
    PatternInvalid {
        /// The offending pattern text
        pattern: String,
        /// Why it was rejected
        reason: String,
    },

    /// The ownership policy file could not be retrieved
    #[error("ownership policy not found at '{0}'")]
    ConfigMissing(String),

    /// The ownership policy file is not decodable as text
    #[error("ownership policy is malformed: {0}")]
    ConfigMalformed(String),

    /// Invalid gate configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Missing or invalid event payload
    #[error("event error: {0}")]
    Event(String),

    /// Authentication failure
    #[error("authentication failed: {0}")]
    Auth(String),

    /// GitHub API error
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Octocrab error
    #[error("GitHub API error: {0}")]
    Octocrab(#[from] octocrab::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
