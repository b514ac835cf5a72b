//! Per-repository results of a batch run

use crate::types::PullRequest;
use std::fmt;

/// Pipeline stage where a repository failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// Looking the repository up
    Resolve,
    /// Finding or creating the fork
    Fork,
    /// Cloning and branching
    Clone,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolve => write!(f, "resolve"),
            Self::Fork => write!(f, "fork"),
            Self::Clone => write!(f, "clone"),
        }
    }
}

/// Why a repository was skipped without error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The fork already has the work branch
    BranchExists(String),
}

/// What happened to one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoOutcome {
    /// Pull request opened
    Opened(PullRequest),
    /// Mutation succeeded but dry-run stopped before committing
    DryRun,
    /// Skipped on purpose
    Skipped(SkipReason),
    /// A stage failed; the batch moved on
    Failed {
        /// Failing stage
        stage: FailureStage,
        /// Error description
        message: String,
    },
    /// The mutation declined, ending the batch here
    Declined,
}

/// A repository name paired with its outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoResult {
    /// Name as given in the batch input
    pub repo: String,
    /// What happened
    pub outcome: RepoOutcome,
}

/// Result of a whole batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Outcomes in processing order
    pub results: Vec<RepoResult>,
    /// Names never reached because a mutation declined
    pub not_attempted: Vec<String>,
}

impl BatchReport {
    /// Record the outcome for `repo`
    pub fn record(&mut self, repo: &str, outcome: RepoOutcome) {
        self.results.push(RepoResult {
            repo: repo.to_string(),
            outcome,
        });
    }

    /// Pull requests opened, in order
    pub fn opened(&self) -> Vec<&PullRequest> {
        self.results
            .iter()
            .filter_map(|r| match &r.outcome {
                RepoOutcome::Opened(pr) => Some(pr),
                _ => None,
            })
            .collect()
    }

    /// Number of skipped repositories
    pub fn skipped_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, RepoOutcome::Skipped(_)))
            .count()
    }

    /// Number of failed repositories
    pub fn failed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, RepoOutcome::Failed { .. }))
            .count()
    }

    /// Repository whose mutation declined, if the batch was cut short
    pub fn declined_at(&self) -> Option<&str> {
        self.results
            .iter()
            .find(|r| r.outcome == RepoOutcome::Declined)
            .map(|r| r.repo.as_str())
    }

    /// Outcome recorded for `repo`, if it was reached
    pub fn outcome_for(&self, repo: &str) -> Option<&RepoOutcome> {
        self.results
            .iter()
            .find(|r| r.repo == repo)
            .map(|r| &r.outcome)
    }
}
