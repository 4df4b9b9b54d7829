//! Check command - evaluate a local CODEOWNERS file offline

use crate::cli::style::{Stylize, check, cross};
use anstream::println;
use anyhow::Context;
use owner_merge::error::Error;
use owner_merge::policy::{evaluate, parse_bytes};
use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;

/// Options for the check command
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// CODEOWNERS file to evaluate
    pub codeowners: PathBuf,
    /// Submitter to authorize
    pub submitter: String,
    /// Also read changed files from stdin
    pub stdin: bool,
    /// Changed files from the command line
    pub files: Vec<String>,
}

/// Run the check command.
///
/// Exits 0 when the submitter may approve every file and 1 when not.
pub fn run_check(options: &CheckOptions) -> anyhow::Result<ExitCode> {
    let path = &options.codeowners;
    let bytes = std::fs::read(path)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ConfigMissing(path.display().to_string())
            } else {
                Error::Io(e)
            }
        })
        .with_context(|| format!("failed to read {}", path.display()))?;

    let policy = parse_bytes(&bytes)?;
    for warning in &policy.warnings {
        println!("{} {warning}", "warning:".warn());
    }

    let mut files = options.files.clone();
    if options.stdin {
        for line in std::io::stdin().lock().lines() {
            let line = line.context("failed to read changed files from stdin")?;
            let line = line.trim();
            if !line.is_empty() {
                files.push(line.to_string());
            }
        }
    }

    let decision = evaluate(&options.submitter, &policy.rules, &files);
    match decision.denial() {
        None => {
            println!(
                "{} {} may approve all {} changed file(s)",
                check(),
                options.submitter.emphasis(),
                files.len()
            );
            Ok(ExitCode::SUCCESS)
        }
        Some(denial) => {
            println!(
                "{} {} is not authorized: {denial}",
                cross(),
                options.submitter.emphasis()
            );
            Ok(ExitCode::from(1))
        }
    }
}
