//! batchpr CLI

mod cli;

use anyhow::Context;
use batchpr::config::{Config, default_config_path, load_config};
use batchpr::types::CloneProtocol;
use clap::{Args, Parser, Subcommand};
use cli::style::Stylize;
use cli::{RunOptions, parse_repo_list, run_auth, run_batch};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "BATCHPR_LOG";

#[derive(Parser)]
#[command(name = "batchpr")]
#[command(about = "Open the same pull request across many GitHub repositories")]
#[command(version)]
struct Cli {
    /// Echo the output of every command, not only failing ones
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to <config dir>/batchpr/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fork, change, commit and open a pull request for each repository
    Run(RunArgs),

    /// Show the GitHub token source and the account it belongs to
    Auth,
}

#[derive(Args)]
struct RunArgs {
    /// Repositories as owner/name
    repositories: Vec<String>,

    /// Read more repositories from a file, one per line
    #[arg(long, value_name = "FILE")]
    from_file: Option<PathBuf>,

    /// Branch created in every fork
    #[arg(short, long)]
    branch: String,

    /// Commit message, also used as the pull request title
    #[arg(short, long)]
    message: String,

    /// Pull request body
    #[arg(long, conflicts_with = "body_file", required_unless_present = "body_file")]
    body: Option<String>,

    /// Read the pull request body from a file
    #[arg(long, value_name = "FILE")]
    body_file: Option<PathBuf>,

    /// Shell command run inside each checkout
    #[arg(short, long)]
    script: String,

    /// Skip repositories that lack this file on their default branch
    #[arg(long, value_name = "PATH")]
    require_file: Option<String>,

    /// Directory forks are cloned into
    #[arg(short, long)]
    workdir: Option<PathBuf>,

    /// Clone over HTTPS instead of SSH
    #[arg(long)]
    https: bool,

    /// Run the script but do not commit, push or open pull requests
    #[arg(long)]
    dry_run: bool,

    /// Preview the batch and ask before starting
    #[arg(long)]
    confirm: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            anstream::eprintln!("{} {e:#}", "Error:".failure());
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => match default_config_path() {
            Some(path) => load_config(&path)?,
            None => Config::default(),
        },
    };
    if cli.verbose {
        config.verbose = true;
    }

    match cli.command {
        Commands::Run(args) => {
            if let Some(workdir) = args.workdir {
                config.workdir = workdir;
            }
            if args.https {
                config.protocol = CloneProtocol::Https;
            }
            fs::create_dir_all(&config.workdir).with_context(|| {
                format!("failed to create workdir {}", config.workdir.display())
            })?;

            let mut repositories = args.repositories;
            if let Some(path) = &args.from_file {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                repositories.extend(parse_repo_list(&text));
            }

            let body = match (args.body, &args.body_file) {
                (Some(body), _) => body,
                (None, Some(path)) => fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                (None, None) => String::new(),
            };

            let options = RunOptions {
                repositories,
                branch: args.branch,
                message: args.message,
                body,
                script: args.script,
                require_file: args.require_file,
                dry_run: args.dry_run,
                confirm: args.confirm,
            };
            run_batch(&config, options).await?;
        }
        Commands::Auth => {
            run_auth(&config).await?;
        }
    }

    Ok(())
}
