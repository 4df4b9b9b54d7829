//! Auto-merge gate
//!
//! Three-phase pattern:
//! 1. Gather - collaborator check, then policy and changed files (effectful)
//! 2. Decide - parse the policy and evaluate the change set (pure)
//! 3. Execute - merge when authorized (effectful)

mod execute;
mod gather;

pub use execute::execute_merge;
pub use gather::{GateInputs, gather_inputs};

use crate::config::GateConfig;
use crate::error::Result;
use crate::event::EventContext;
use crate::platform::PlatformService;
use crate::policy::{Decision, PatternWarning, evaluate, parse_bytes};
use crate::types::MergeResult;
use tracing::info;

/// Options for a gate run
#[derive(Debug, Clone, Copy, Default)]
pub struct GateOptions {
    /// Evaluate only; never call the merge API
    pub dry_run: bool,
}

/// How a gate run ended
#[derive(Debug, Clone)]
pub enum GateOutcome {
    /// Submitter is neither the repository owner nor a collaborator
    NotCollaborator {
        /// The submitter
        submitter: String,
    },
    /// Some changed file is not approvable by the submitter
    Denied {
        /// The evaluation, carrying the denial reason
        decision: Decision,
    },
    /// Authorized, merge skipped because of dry run
    Authorized,
    /// Authorized and merged
    Merged(MergeResult),
    /// Authorized but the platform declined the merge
    MergeDeclined {
        /// Platform message, if any
        message: Option<String>,
    },
}

impl GateOutcome {
    /// Whether the PR was merged by this run
    pub const fn is_merged(&self) -> bool {
        matches!(self, Self::Merged(_))
    }
}

/// Result of a gate run plus diagnostics
#[derive(Debug, Clone)]
pub struct GateReport {
    /// The outcome
    pub outcome: GateOutcome,
    /// Policy lines dropped for invalid patterns
    pub warnings: Vec<PatternWarning>,
    /// Number of changed files in the PR (0 if never fetched)
    pub changed_files: usize,
}

/// Run the gate for one pull request event
pub async fn run_gate(
    platform: &dyn PlatformService,
    config: &GateConfig,
    event: &EventContext,
    options: GateOptions,
) -> Result<GateReport> {
    // Phase 1: gather
    let Some(inputs) = gather_inputs(platform, config, event).await? else {
        info!(submitter = %event.submitter, "submitter is not a collaborator, skipping");
        return Ok(GateReport {
            outcome: GateOutcome::NotCollaborator {
                submitter: event.submitter.clone(),
            },
            warnings: Vec::new(),
            changed_files: 0,
        });
    };

    // Phase 2: decide
    let policy = parse_bytes(&inputs.policy)?;
    let decision = evaluate(&event.submitter, &policy.rules, &inputs.changes);
    info!(
        authorized = decision.is_authorized(),
        files = inputs.changes.len(),
        "evaluated change set"
    );

    let outcome = if !decision.is_authorized() {
        if let Some(denial) = decision.denial() {
            info!(%denial, "not merging");
        }
        GateOutcome::Denied { decision }
    } else if options.dry_run {
        info!("dry run, not merging");
        GateOutcome::Authorized
    } else {
        // Phase 3: execute
        execute_merge(platform, event.pr_number, &inputs.head_sha, config.merge_method).await?
    };

    Ok(GateReport {
        outcome,
        warnings: policy.warnings,
        changed_files: inputs.changes.len(),
    })
}
