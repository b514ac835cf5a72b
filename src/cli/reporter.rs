//! Colored console rendering of batch progress

use crate::cli::style::Stylize;
use anstream::println;
use batchpr::report::{Reporter, indent};
use batchpr::types::PullRequest;

/// Prints batch progress to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn repository_started(&self, repo: &str) {
        println!("{}", format!("Processing repository: {repo}").processing());
    }

    fn step(&self, message: &str) {
        println!("  > {message}");
    }

    fn command_started(&self, command: &str) {
        println!("  > {command}");
    }

    fn command_output(&self, output: &str) {
        println!("{}", indent(output, 4));
    }

    fn warning(&self, message: &str) {
        println!("{}", format!("    {message}").warn());
    }

    fn error(&self, message: &str) {
        println!("{}", format!("    {message}").failure());
    }

    fn pull_request_opened(&self, pr: &PullRequest) {
        println!(
            "{}",
            format!("    Opened pull request #{}: {}", pr.number, pr.html_url).success()
        );
    }
}
