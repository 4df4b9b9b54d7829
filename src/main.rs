//! owner-merge - auto-merge pull requests whose author owns every changed file

mod cli;

use clap::{Parser, Subcommand, ValueEnum};
use cli::{CheckOptions, RunOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "owner-merge")]
#[command(about = "Auto-merge pull requests whose author owns every changed file per CODEOWNERS")]
#[command(version)]
struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a pull request against CODEOWNERS and merge it if the author owns every file
    Run {
        /// GitHub token
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Fallback token, used when no GitHub token is given
        #[arg(long, env = "GH_TOKEN", hide_env_values = true)]
        gh_token: Option<String>,

        /// Path to the webhook event payload
        #[arg(long, env = "GITHUB_EVENT_PATH")]
        event_path: Option<PathBuf>,

        /// Repository as owner/repo
        #[arg(long, env = "GITHUB_REPOSITORY")]
        repo: Option<String>,

        /// GitHub API base URL
        #[arg(long, env = "GITHUB_API_URL")]
        api_url: Option<String>,

        /// Pull request number (overrides the event payload)
        #[arg(long)]
        pr: Option<u64>,

        /// Submitter login (overrides the event payload)
        #[arg(long)]
        submitter: Option<String>,

        /// Directory containing CODEOWNERS
        #[arg(long, env = "INPUT_DIR")]
        dir: Option<String>,

        /// Merge method: merge, squash or rebase
        #[arg(long, env = "INPUT_MERGE_METHOD")]
        merge_method: Option<String>,

        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Evaluate without merging
        #[arg(long)]
        dry_run: bool,
    },
    /// Evaluate a local CODEOWNERS file against a list of changed files
    Check {
        /// Path to the CODEOWNERS file
        #[arg(long, default_value = ".github/CODEOWNERS")]
        codeowners: PathBuf,

        /// Submitter login to authorize
        #[arg(long)]
        submitter: String,

        /// Read additional changed files from stdin, one per line
        #[arg(long)]
        stdin: bool,

        /// Changed files, repository-relative
        files: Vec<String>,
    },
}

fn init_tracing(log_format: LogFormat) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(env_filter).with_writer(std::io::stderr);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| anyhow::anyhow!("failed to init tracing: {err}"))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| anyhow::anyhow!("failed to init tracing: {err}"))?,
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.log_format) {
        eprintln!("error: {e:#}");
        return ExitCode::from(2);
    }

    let result = match cli.command {
        Commands::Run {
            token,
            gh_token,
            event_path,
            repo,
            api_url,
            pr,
            submitter,
            dir,
            merge_method,
            config,
            dry_run,
        } => {
            cli::run_gate_command(RunOptions {
                token,
                gh_token,
                event_path,
                repo,
                api_url,
                pr,
                submitter,
                dir,
                merge_method,
                config,
                dry_run,
            })
            .await
        }
        Commands::Check {
            codeowners,
            submitter,
            stdin,
            files,
        } => cli::run_check(&CheckOptions {
            codeowners,
            submitter,
            stdin,
            files,
        }),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
