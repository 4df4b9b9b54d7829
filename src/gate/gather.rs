//! Gather phase - fetch everything the decision needs

use crate::config::GateConfig;
use crate::error::{Error, Result};
use crate::event::EventContext;
use crate::platform::PlatformService;
use tracing::{debug, error};

/// Inputs fetched from the platform
#[derive(Debug, Clone)]
pub struct GateInputs {
    /// Raw policy file bytes
    pub policy: Vec<u8>,
    /// Changed files, in API order
    pub changes: Vec<String>,
    /// Head SHA the merge will be pinned to
    pub head_sha: String,
}

/// Fetch policy, changed files, and head SHA.
///
/// Returns `Ok(None)` when the submitter is neither the repository owner nor
/// a collaborator; nothing else is fetched in that case. The three fetches
/// are independent and run concurrently.
pub async fn gather_inputs(
    platform: &dyn PlatformService,
    config: &GateConfig,
    event: &EventContext,
) -> Result<Option<GateInputs>> {
    if event.submitter_is_owner() {
        debug!(submitter = %event.submitter, "submitter owns the repository");
    } else if !platform.is_collaborator(&event.submitter).await? {
        return Ok(None);
    }

    let policy_path = config.policy_path();
    let policy_fut = async {
        platform.fetch_file(&policy_path).await.inspect_err(|e| {
            if matches!(e, Error::ConfigMissing(_)) {
                error!(
                    path = %policy_path,
                    "could not find CODEOWNERS; set the policy directory (dir = '{}')",
                    config.policy_dir
                );
            }
        })
    };
    let changes_fut = platform.list_changed_files(event.pr_number);
    let head_sha_fut = async {
        match &event.head_sha {
            Some(sha) => Ok(sha.clone()),
            None => platform
                .get_pull_request(event.pr_number)
                .await
                .map(|pr| pr.head_sha),
        }
    };

    let (policy, changes, head_sha) = tokio::try_join!(policy_fut, changes_fut, head_sha_fut)?;
    debug!(
        policy_bytes = policy.len(),
        changes = changes.len(),
        %head_sha,
        "gathered gate inputs"
    );

    Ok(Some(GateInputs {
        policy,
        changes,
        head_sha,
    }))
}
