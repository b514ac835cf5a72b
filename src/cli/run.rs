//! Run command - open the same pull request across a batch of repositories

use crate::cli::reporter::ConsoleReporter;
use crate::cli::style::{CHECK, Stylize, arrow};
use anstream::println;
use batchpr::auth::get_github_auth;
use batchpr::config::Config;
use batchpr::error::{Error, Result};
use batchpr::mutation::ScriptMutation;
use batchpr::platform::create_hosting_service;
use batchpr::report::Reporter;
use batchpr::shell::ShellRunner;
use batchpr::updater::{BatchReport, BatchUpdater, RepoOutcome, UpdaterOptions};
use dialoguer::Confirm;
use std::sync::Arc;

/// Options for the run command
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// `owner/name` entries in processing order
    pub repositories: Vec<String>,
    /// Work branch created in every fork
    pub branch: String,
    /// Commit message and pull request title
    pub message: String,
    /// Pull request body
    pub body: String,
    /// Script run inside each checkout
    pub script: String,
    /// Only touch repositories that have this file upstream
    pub require_file: Option<String>,
    /// Stop after the script; no commit, push or PR
    pub dry_run: bool,
    /// Preview the batch and prompt before starting
    pub confirm: bool,
}

/// Split a repository list file into names, dropping blanks and `#` comments
pub fn parse_repo_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Run the run command
pub async fn run_batch(config: &Config, options: RunOptions) -> Result<()> {
    if options.repositories.is_empty() {
        return Err(Error::Config(
            "No repositories given. Pass them as arguments or with --from-file.".to_string(),
        ));
    }

    if options.confirm && !options.dry_run {
        print_preview(config, &options);
        if !Confirm::new()
            .with_prompt("Proceed?")
            .default(false)
            .interact()
            .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?
        {
            println!("{}", "Aborted".muted());
            return Ok(());
        }
        println!();
    }

    let auth = get_github_auth(config.github_host.as_deref()).await?;
    let hosting = create_hosting_service(config, &auth.token)?;

    let reporter: Arc<dyn Reporter> = Arc::new(ConsoleReporter);
    let runner = ShellRunner::new(config.verbose, Arc::clone(&reporter));

    let mut updater_options = UpdaterOptions::from(config);
    updater_options.dry_run = options.dry_run;

    let updater =
        BatchUpdater::connect(hosting.as_ref(), &runner, reporter.as_ref(), updater_options)
            .await?;

    let mut mutation = ScriptMutation::new(
        options.branch,
        options.message,
        options.body,
        options.script,
    );
    if let Some(path) = options.require_file {
        mutation = mutation.with_required_file(path);
    }

    let report = updater.run(options.repositories, &mut mutation).await?;
    print_summary(&report, options.dry_run);
    Ok(())
}

fn print_preview(config: &Config, options: &RunOptions) {
    println!(
        "{} {} repositories {} branch {}",
        "Batch:".emphasis(),
        options.repositories.len().accent(),
        arrow(),
        options.branch.accent()
    );
    for repo in &options.repositories {
        println!("  {} {repo}", arrow());
    }
    println!("  {} {}", "Script:".muted(), options.script);
    if let Some(path) = &options.require_file {
        println!("  {} {path}", "Requires:".muted());
    }
    println!("  {} {}", "Workdir:".muted(), config.workdir.display());
    println!();
}

fn print_summary(report: &BatchReport, dry_run: bool) {
    println!();

    let opened = report.opened();
    if dry_run {
        let ready = report
            .results
            .iter()
            .filter(|r| r.outcome == RepoOutcome::DryRun)
            .count();
        println!(
            "{} {} repositories prepared (dry run)",
            CHECK.success(),
            ready.accent()
        );
    } else {
        println!(
            "{} {} pull requests opened",
            CHECK.success(),
            opened.len().accent()
        );
        for pr in &opened {
            println!("  {} {}", arrow(), pr.html_url);
        }
    }

    let skipped = report.skipped_count();
    if skipped > 0 {
        println!("{}", format!("{skipped} skipped").warn());
    }

    let failed = report.failed_count();
    if failed > 0 {
        println!("{}", format!("{failed} failed").failure());
    }

    if let Some(repo) = report.declined_at() {
        println!(
            "{}",
            format!(
                "Batch stopped at {repo}; {} not attempted",
                report.not_attempted.len()
            )
            .warn()
        );
    }
}
