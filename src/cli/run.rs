//! Run command - gate a pull request and merge it when authorized

use crate::cli::style::{Stylize, check, cross};
use anstream::println;
use owner_merge::auth::get_github_auth;
use owner_merge::config::GateConfig;
use owner_merge::event::{EventContext, EventOverrides};
use owner_merge::gate::{GateOptions, GateOutcome, GateReport, run_gate};
use owner_merge::platform::create_platform_service;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Options for the run command, already merged with the environment
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// GitHub token
    pub token: Option<String>,
    /// Fallback token (`GH_TOKEN`)
    pub gh_token: Option<String>,
    /// Event payload path
    pub event_path: Option<PathBuf>,
    /// Repository override as `owner/repo`
    pub repo: Option<String>,
    /// API base URL override
    pub api_url: Option<String>,
    /// PR number override
    pub pr: Option<u64>,
    /// Submitter override
    pub submitter: Option<String>,
    /// Policy directory
    pub dir: Option<String>,
    /// Merge method name
    pub merge_method: Option<String>,
    /// Configuration file
    pub config: Option<PathBuf>,
    /// Evaluate without merging
    pub dry_run: bool,
}

/// Run the gate command.
///
/// Denial is a normal outcome and exits 0; only a merge the platform
/// declines exits 1.
pub async fn run_gate_command(options: RunOptions) -> anyhow::Result<ExitCode> {
    let mut config = match &options.config {
        Some(path) => GateConfig::load(path)?,
        None => GateConfig::default(),
    };
    config.apply(options.dir.as_deref(), options.merge_method.as_deref())?;

    let overrides = EventOverrides {
        pr_number: options.pr,
        submitter: options.submitter,
        repository: options.repo,
    };
    let event = EventContext::load(options.event_path.as_deref(), &overrides)?;
    info!(submitter = %event.submitter, pr = event.pr_number, "gating pull request");

    let auth = get_github_auth(options.token.as_deref(), options.gh_token.as_deref()).await?;
    let platform = create_platform_service(&event.repo, &auth.token, options.api_url.as_deref())?;

    let report = run_gate(
        platform.as_ref(),
        &config,
        &event,
        GateOptions {
            dry_run: options.dry_run,
        },
    )
    .await?;

    print_report(&report, &event);

    Ok(match report.outcome {
        GateOutcome::MergeDeclined { .. } => ExitCode::from(1),
        _ => ExitCode::SUCCESS,
    })
}

fn print_report(report: &GateReport, event: &EventContext) {
    for warning in &report.warnings {
        println!("{} {warning}", "warning:".warn());
    }

    let pr = format!("#{}", event.pr_number);
    match &report.outcome {
        GateOutcome::NotCollaborator { submitter } => {
            println!(
                "{}",
                format!("{submitter} is not a collaborator; leaving {pr} alone").muted()
            );
        }
        GateOutcome::Denied { decision } => {
            let reason = decision
                .denial()
                .map_or_else(String::new, |d| format!(": {d}"));
            println!(
                "{} {} cannot approve every file in {}{reason}",
                cross(),
                event.submitter.emphasis(),
                pr.accent()
            );
        }
        GateOutcome::Authorized => {
            println!(
                "{} {} may approve all {} file(s) in {} {}",
                check(),
                event.submitter.emphasis(),
                report.changed_files,
                pr.accent(),
                "(dry run)".muted()
            );
        }
        GateOutcome::Merged(result) => {
            println!(
                "{} Merged {} {}",
                check(),
                pr.accent(),
                result.sha.as_deref().unwrap_or_default().muted()
            );
        }
        GateOutcome::MergeDeclined { message } => {
            println!(
                "{} {} was not merged: {}",
                cross(),
                pr.accent(),
                message.as_deref().unwrap_or("no reason given").warn()
            );
        }
    }
}
