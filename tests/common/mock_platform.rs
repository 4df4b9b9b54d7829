//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use owner_merge::error::{Error, Result};
use owner_merge::platform::PlatformService;
use owner_merge::types::{MergeMethod, MergeResult, PlatformConfig, PullRequestInfo};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Call record for `merge_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePrCall {
    pub pr_number: u64,
    pub head_sha: String,
    pub method: MergeMethod,
}

/// Simple mock platform service for testing
///
/// Features:
/// - Configurable files, changed-file lists, PRs and collaborators
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    config: PlatformConfig,
    collaborators: Mutex<HashSet<String>>,
    files: Mutex<HashMap<String, Vec<u8>>>,
    changed_files: Mutex<HashMap<u64, Vec<String>>>,
    pull_requests: Mutex<HashMap<u64, PullRequestInfo>>,
    merge_response: Mutex<Option<MergeResult>>,
    // Call tracking
    is_collaborator_calls: Mutex<Vec<String>>,
    fetch_file_calls: Mutex<Vec<String>>,
    list_files_calls: Mutex<Vec<u64>>,
    get_pr_calls: Mutex<Vec<u64>>,
    merge_pr_calls: Mutex<Vec<MergePrCall>>,
    // Error injection
    error_on_list_files: Mutex<Option<String>>,
    error_on_merge_pr: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            collaborators: Mutex::new(HashSet::new()),
            files: Mutex::new(HashMap::new()),
            changed_files: Mutex::new(HashMap::new()),
            pull_requests: Mutex::new(HashMap::new()),
            merge_response: Mutex::new(None),
            is_collaborator_calls: Mutex::new(Vec::new()),
            fetch_file_calls: Mutex::new(Vec::new()),
            list_files_calls: Mutex::new(Vec::new()),
            get_pr_calls: Mutex::new(Vec::new()),
            merge_pr_calls: Mutex::new(Vec::new()),
            error_on_list_files: Mutex::new(None),
            error_on_merge_pr: Mutex::new(None),
        }
    }

    // === Setup methods ===

    /// Register a collaborator
    pub fn add_collaborator(&self, login: &str) {
        self.collaborators.lock().unwrap().insert(login.to_string());
    }

    /// Store a file in the repository
    pub fn set_file(&self, path: &str, content: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), content.as_bytes().to_vec());
    }

    /// Store raw bytes as a file
    pub fn set_file_bytes(&self, path: &str, content: &[u8]) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), content.to_vec());
    }

    /// Set the changed files for a PR
    pub fn set_changed_files(&self, pr_number: u64, files: &[&str]) {
        self.changed_files.lock().unwrap().insert(
            pr_number,
            files.iter().map(ToString::to_string).collect(),
        );
    }

    /// Register a PR
    pub fn set_pull_request(&self, pr_number: u64, head_sha: &str) {
        self.pull_requests.lock().unwrap().insert(
            pr_number,
            PullRequestInfo {
                number: pr_number,
                head_sha: head_sha.to_string(),
            },
        );
    }

    /// Override the `merge_pr` response (defaults to a successful merge)
    pub fn set_merge_response(&self, result: MergeResult) {
        *self.merge_response.lock().unwrap() = Some(result);
    }

    // === Error injection methods ===

    /// Make `list_changed_files` return an error
    pub fn fail_list_files(&self, msg: &str) {
        *self.error_on_list_files.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `merge_pr` return an error
    pub fn fail_merge_pr(&self, msg: &str) {
        *self.error_on_merge_pr.lock().unwrap() = Some(msg.to_string());
    }

    // === Call inspection ===

    pub fn get_is_collaborator_calls(&self) -> Vec<String> {
        self.is_collaborator_calls.lock().unwrap().clone()
    }

    pub fn get_fetch_file_calls(&self) -> Vec<String> {
        self.fetch_file_calls.lock().unwrap().clone()
    }

    pub fn get_list_files_calls(&self) -> Vec<u64> {
        self.list_files_calls.lock().unwrap().clone()
    }

    pub fn get_pr_calls(&self) -> Vec<u64> {
        self.get_pr_calls.lock().unwrap().clone()
    }

    pub fn get_merge_pr_calls(&self) -> Vec<MergePrCall> {
        self.merge_pr_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn get_pull_request(&self, pr_number: u64) -> Result<PullRequestInfo> {
        self.get_pr_calls.lock().unwrap().push(pr_number);
        self.pull_requests
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .ok_or_else(|| Error::GitHubApi(format!("PR #{pr_number} not found")))
    }

    async fn is_collaborator(&self, username: &str) -> Result<bool> {
        self.is_collaborator_calls
            .lock()
            .unwrap()
            .push(username.to_string());
        Ok(self.collaborators.lock().unwrap().contains(username))
    }

    async fn fetch_file(&self, path: &str) -> Result<Vec<u8>> {
        self.fetch_file_calls.lock().unwrap().push(path.to_string());
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| Error::ConfigMissing(path.to_string()))
    }

    async fn list_changed_files(&self, pr_number: u64) -> Result<Vec<String>> {
        self.list_files_calls.lock().unwrap().push(pr_number);
        if let Some(msg) = self.error_on_list_files.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }
        Ok(self
            .changed_files
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .unwrap_or_default())
    }

    async fn merge_pr(
        &self,
        pr_number: u64,
        head_sha: &str,
        method: MergeMethod,
    ) -> Result<MergeResult> {
        self.merge_pr_calls.lock().unwrap().push(MergePrCall {
            pr_number,
            head_sha: head_sha.to_string(),
            method,
        });
        if let Some(msg) = self.error_on_merge_pr.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }
        Ok(self
            .merge_response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| MergeResult {
                merged: true,
                sha: Some(format!("merged_sha_{pr_number}")),
                message: None,
            }))
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
