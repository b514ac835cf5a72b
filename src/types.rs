//! Core types for batchpr

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static OWNER_PATTERN: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?$").expect("valid owner regex")
});

static NAME_PATTERN: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[A-Za-z0-9._-]+$").expect("valid name regex"));

/// A repository identifier as typed by the user (`owner/name`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoName {
    /// Owning user or organization
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoName {
    /// Create a repository name without validation
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (owner, name) = trimmed
            .split_once('/')
            .ok_or_else(|| Error::InvalidRepoName(s.to_string()))?;

        // `.` and `..` are valid characters but not valid names
        if !OWNER_PATTERN.is_match(owner)
            || !NAME_PATTERN.is_match(name)
            || name == "."
            || name == ".."
        {
            return Err(Error::InvalidRepoName(s.to_string()));
        }

        Ok(Self::new(owner, name))
    }
}

/// The authenticated actor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login name
    pub login: String,
}

/// A repository resolved from the hosting service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Owner login
    pub owner: String,
    /// Repository name
    pub name: String,
    /// Write-access (SSH) URL
    pub ssh_url: String,
    /// HTTPS clone URL
    pub clone_url: String,
    /// Default branch, the base for new work
    pub default_branch: String,
    /// Web URL
    pub html_url: String,
}

impl Repository {
    /// The `owner/name` identifier of this repository
    pub fn full_name(&self) -> RepoName {
        RepoName::new(&self.owner, &self.name)
    }

    /// Whether `login` owns this repository
    ///
    /// GitHub logins are case-insensitive.
    pub fn is_owned_by(&self, login: &str) -> bool {
        self.owner.eq_ignore_ascii_case(login)
    }

    /// URL to clone from for the given protocol
    pub fn url_for(&self, protocol: CloneProtocol) -> &str {
        match protocol {
            CloneProtocol::Ssh => &self.ssh_url,
            CloneProtocol::Https => &self.clone_url,
        }
    }
}

/// Which fork URL `git clone` uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloneProtocol {
    /// `git@github.com:owner/name.git`
    #[default]
    Ssh,
    /// `https://github.com/owner/name.git` (needs a credential helper to push)
    Https,
}

impl fmt::Display for CloneProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ssh => write!(f, "ssh"),
            Self::Https => write!(f, "https"),
        }
    }
}

/// Parameters for opening a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPullRequest {
    /// PR title
    pub title: String,
    /// PR body
    pub body: String,
    /// Base branch on the upstream repository
    pub base: String,
    /// Head reference, `<fork-owner>:<branch>`
    pub head: String,
}

/// An opened pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// PR title
    pub title: String,
    /// Base branch name
    pub base_ref: String,
    /// Head branch name
    pub head_ref: String,
}
