//! Gitignore-style path patterns
//!
//! The gitignore layer (anchoring, trailing `/`, directory coverage) lives
//! here; each pattern body is compiled with `globset`. A path matches when the
//! glob accepts the path itself or any of its ancestor directories, so a
//! matched directory covers everything below it.

use crate::error::{Error, Result};
use globset::{ErrorKind, GlobBuilder, GlobMatcher};

/// A compiled ownership pattern
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    /// `None` for patterns that can never match (empty, or just `/`)
    matcher: Option<GlobMatcher>,
    /// Trailing `/`: only directories match
    dir_only: bool,
}

impl Pattern {
    /// Compile a pattern.
    ///
    /// Fails with [`Error::PatternInvalid`] on negation (`!`), a dangling
    /// escape, an unterminated character class, a reversed range, or an
    /// unbalanced `{...}` alternation.
    pub fn compile(source: &str) -> Result<Self> {
        if source.starts_with('!') {
            return Err(invalid(source, "negated patterns are not supported".to_string()));
        }

        let (body, dir_only) = match source.strip_suffix('/') {
            Some(rest) => (rest, true),
            None => (source, false),
        };
        // Any slash other than a trailing one anchors the pattern at the root
        let anchored = body.contains('/');
        let body = body.strip_prefix('/').unwrap_or(body);

        if body.is_empty() {
            return Ok(Self {
                source: source.to_string(),
                matcher: None,
                dir_only,
            });
        }

        let glob = if anchored {
            body.to_string()
        } else {
            format!("**/{body}")
        };
        let matcher = GlobBuilder::new(&glob)
            .literal_separator(true)
            .backslash_escape(true)
            .build()
            .map_err(|e| invalid(source, describe(e.kind())))?
            .compile_matcher();

        Ok(Self {
            source: source.to_string(),
            matcher: Some(matcher),
            dir_only,
        })
    }

    /// The pattern text this matcher was compiled from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Check a repository-relative, `/`-separated path.
    ///
    /// A path ending in `/` is treated as a directory.
    pub fn matches(&self, path: &str) -> bool {
        let Some(matcher) = &self.matcher else {
            return false;
        };

        let (path, is_dir) = match path.strip_suffix('/') {
            Some(rest) => (rest, true),
            None => (path, false),
        };

        let ancestor_matches = path
            .match_indices('/')
            .map(|(idx, _)| &path[..idx])
            .filter(|ancestor| !ancestor.is_empty())
            .any(|ancestor| matcher.is_match(ancestor));

        ancestor_matches || ((is_dir || !self.dir_only) && matcher.is_match(path))
    }
}

/// Compile `pattern` and test it against `path` in one step
pub fn matches(pattern: &str, path: &str) -> Result<bool> {
    Ok(Pattern::compile(pattern)?.matches(path))
}

fn invalid(pattern: &str, reason: String) -> Error {
    Error::PatternInvalid {
        pattern: pattern.to_string(),
        reason,
    }
}

fn describe(kind: &ErrorKind) -> String {
    match kind {
        ErrorKind::DanglingEscape => "unterminated escape".to_string(),
        ErrorKind::UnclosedClass => "unterminated character class".to_string(),
        other => other.to_string(),
    }
}
