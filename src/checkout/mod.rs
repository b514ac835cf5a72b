//! Local working copies of forks
//!
//! Two effectful phases, both expressed as `git` commands issued through a
//! [`CommandRunner`](crate::shell::CommandRunner):
//! 1. Setup - clone the fork and branch off upstream's default branch
//! 2. Finalize - commit, push and open the pull request

mod finalize;
mod setup;

pub use finalize::{PullRequestContent, open_pull_request};
pub use setup::{CloneRequest, clone_fork};

use crate::error::Error;
use std::path::PathBuf;

/// A fork cloned locally with the work branch checked out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    /// Root of the working copy
    pub path: PathBuf,
    /// Branch created for this batch
    pub branch: String,
}

/// Why a checkout could not be prepared
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The fork already has the branch; an earlier run got here first
    #[error("Branch {branch} already exists")]
    BranchExists {
        /// The colliding branch name
        branch: String,
    },
    /// Any other failure while cloning or syncing
    #[error(transparent)]
    Failed(#[from] Error),
}
