//! Error types for batchpr

use thiserror::Error;

/// Errors produced by the batch updater and its collaborators
#[derive(Debug, Error)]
pub enum Error {
    /// GitHub API call failed
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Hosting service rejected or could not complete an operation
    #[error("hosting service error: {0}")]
    Platform(String),

    /// No usable credentials
    #[error("authentication error: {0}")]
    Auth(String),

    /// Invalid configuration
    #[error("config error: {0}")]
    Config(String),

    /// Repository name is not in `owner/name` form
    #[error("invalid repository name '{0}': expected `owner/name`")]
    InvalidRepoName(String),

    /// Command ran but exited non-zero
    #[error("Command '{command}' failed")]
    CommandFailed {
        /// Rendered command string
        command: String,
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
    },

    /// Command could not be started at all
    #[error("failed to run '{command}': {source}")]
    CommandSpawn {
        /// Rendered command string
        command: String,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// Mutation hook failed
    #[error("mutation failed: {0}")]
    Mutation(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invariant violation inside batchpr
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

/// Result alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
