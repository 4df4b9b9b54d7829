//! Execute phase - perform the merge

use crate::error::Result;
use crate::gate::GateOutcome;
use crate::platform::PlatformService;
use crate::types::MergeMethod;
use tracing::{info, warn};

/// Merge the PR and translate the platform response into an outcome.
///
/// A merge the API answers but does not perform is `MergeDeclined`; transport
/// or API errors propagate.
pub async fn execute_merge(
    platform: &dyn PlatformService,
    pr_number: u64,
    head_sha: &str,
    method: MergeMethod,
) -> Result<GateOutcome> {
    let result = platform.merge_pr(pr_number, head_sha, method).await?;

    if result.merged {
        let sha_display = result.sha.as_deref().unwrap_or("(no sha)");
        info!(pr_number, %method, sha = sha_display, "merged");
        Ok(GateOutcome::Merged(result))
    } else {
        warn!(pr_number, message = ?result.message, "merge was not performed");
        Ok(GateOutcome::MergeDeclined {
            message: result.message,
        })
    }
}
