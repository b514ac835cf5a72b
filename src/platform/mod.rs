//! Hosting services
//!
//! Repository lookup, fork creation and pull request creation go through
//! [`HostingService`] so the pipeline can run against GitHub or a test double.

mod factory;
mod github;

pub use factory::create_hosting_service;
pub use github::{DEFAULT_RAW_CONTENT_URL, GitHubService};

use crate::error::Result;
use crate::types::{NewPullRequest, PullRequest, RepoName, Repository, User};
use async_trait::async_trait;

/// Remote operations the batch updater needs from a hosting provider
#[async_trait]
pub trait HostingService: Send + Sync {
    /// The authenticated user
    async fn get_user(&self) -> Result<User>;

    /// Look up a repository by name
    async fn get_repo(&self, name: &RepoName) -> Result<Repository>;

    /// Fork `repo` into the authenticated user's account
    ///
    /// Returns the fork. Forking a repository that was already forked returns
    /// the existing fork.
    async fn create_fork(&self, repo: &Repository) -> Result<Repository>;

    /// Open a pull request against `repo`
    async fn create_pull(&self, repo: &Repository, request: &NewPullRequest)
    -> Result<PullRequest>;

    /// Whether `path` exists on `branch` of `repo`
    ///
    /// Unauthenticated raw-content fetch: only an HTTP 200 counts as present.
    async fn file_exists(&self, repo: &RepoName, branch: &str, path: &str) -> Result<bool>;
}
