//! Gate configuration
//!
//! Resolved once in the binary from defaults, an optional TOML file, and CLI
//! flags / action inputs, then passed explicitly to the gate.

use crate::error::{Error, Result};
use crate::types::MergeMethod;
use serde::Deserialize;
use std::path::Path;

/// Default directory holding the policy file
pub const DEFAULT_POLICY_DIR: &str = ".github/";

/// Policy filename within the policy directory
pub const POLICY_FILE: &str = "CODEOWNERS";

/// Configuration for one gate run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Directory (repository-relative) containing `CODEOWNERS`
    pub policy_dir: String,
    /// How to merge an authorized PR
    pub merge_method: MergeMethod,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            policy_dir: DEFAULT_POLICY_DIR.to_string(),
            merge_method: MergeMethod::default(),
        }
    }
}

/// On-disk configuration; every field optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    dir: Option<String>,
    merge_method: Option<String>,
}

impl GateConfig {
    /// Parse a TOML configuration, filling unspecified fields with defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| Error::Config(format!("failed to parse config: {e}")))?;

        let mut config = Self::default();
        config.apply(file.dir.as_deref(), file.merge_method.as_deref())?;
        Ok(config)
    }

    /// Load a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Override fields with explicitly provided values.
    ///
    /// Empty strings count as "not provided", matching how unset action
    /// inputs arrive.
    pub fn apply(&mut self, dir: Option<&str>, merge_method: Option<&str>) -> Result<()> {
        if let Some(dir) = dir.filter(|d| !d.trim().is_empty()) {
            self.policy_dir = dir.trim().to_string();
        }
        if let Some(method) = merge_method.filter(|m| !m.trim().is_empty()) {
            self.merge_method = method.parse()?;
        }
        self.validate()
    }

    /// Check invariants
    pub fn validate(&self) -> Result<()> {
        if self.policy_dir.trim().is_empty() {
            return Err(Error::Config("policy directory must not be empty".to_string()));
        }
        Ok(())
    }

    /// Repository-relative path of the policy file
    pub fn policy_path(&self) -> String {
        let dir = self
            .policy_dir
            .trim_start_matches("./")
            .trim_start_matches('/')
            .trim_end_matches('/');
        if dir.is_empty() || dir == "." {
            POLICY_FILE.to_string()
        } else {
            format!("{dir}/{POLICY_FILE}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = GateConfig::default();
        assert_eq!(config.policy_dir, ".github/");
        assert_eq!(config.merge_method, MergeMethod::Merge);
        assert_eq!(config.policy_path(), ".github/CODEOWNERS");
    }

    #[test]
    fn test_policy_path_normalization() {
        let mut config = GateConfig::default();
        for (dir, expected) in [
            (".github", ".github/CODEOWNERS"),
            ("docs/", "docs/CODEOWNERS"),
            ("./", "CODEOWNERS"),
            (".", "CODEOWNERS"),
            ("/", "CODEOWNERS"),
            ("/meta/owners/", "meta/owners/CODEOWNERS"),
        ] {
            config.policy_dir = dir.to_string();
            assert_eq!(config.policy_path(), expected, "dir = {dir}");
        }
    }

    #[test]
    fn test_from_toml() {
        let config = GateConfig::from_toml_str("dir = \"docs/\"\nmerge_method = \"squash\"\n").unwrap();
        assert_eq!(config.policy_dir, "docs/");
        assert_eq!(config.merge_method, MergeMethod::Squash);

        let config = GateConfig::from_toml_str("").unwrap();
        assert_eq!(config, GateConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_bad_values() {
        assert!(matches!(
            GateConfig::from_toml_str("merge_method = \"octopus\""),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            GateConfig::from_toml_str("unknown = 1"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_apply_ignores_empty_inputs() {
        let mut config = GateConfig::default();
        config.apply(Some(""), Some("  ")).unwrap();
        assert_eq!(config, GateConfig::default());

        config.apply(Some("meta/"), Some("rebase")).unwrap();
        assert_eq!(config.policy_dir, "meta/");
        assert_eq!(config.merge_method, MergeMethod::Rebase);
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("owner-merge.toml");
        std::fs::write(&path, "merge_method = \"squash\"\n").unwrap();

        let config = GateConfig::load(&path).unwrap();
        assert_eq!(config.merge_method, MergeMethod::Squash);
        assert!(GateConfig::load(&temp.path().join("missing.toml")).is_err());
    }
}
