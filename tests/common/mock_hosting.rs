//! Mock hosting service for testing

use super::make_pr;
use async_trait::async_trait;
use batchpr::error::{Error, Result};
use batchpr::platform::HostingService;
use batchpr::types::{NewPullRequest, PullRequest, RepoName, Repository, User};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `create_pull`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePullCall {
    pub repo: String,
    pub title: String,
    pub body: String,
    pub base: String,
    pub head: String,
}

/// In-memory hosting service
///
/// Features:
/// - Repositories registered up front, looked up by `owner/name`
/// - Forks created under the configured login
/// - Call tracking for verification
/// - Error injection per repository
pub struct MockHostingService {
    login: String,
    next_pr_number: AtomicU64,
    repos: Mutex<HashMap<String, Repository>>,
    files: Mutex<HashSet<String>>,
    // Call tracking
    get_repo_calls: Mutex<Vec<String>>,
    create_fork_calls: Mutex<Vec<String>>,
    create_pull_calls: Mutex<Vec<CreatePullCall>>,
    file_exists_calls: Mutex<Vec<String>>,
    // Error injection
    error_on_get_user: Mutex<Option<String>>,
    error_on_get_repo: Mutex<HashSet<String>>,
    error_on_create_fork: Mutex<HashSet<String>>,
    error_on_create_pull: Mutex<Option<String>>,
}

impl MockHostingService {
    /// Create a mock authenticated as `login`
    pub fn new(login: &str) -> Self {
        Self {
            login: login.to_string(),
            next_pr_number: AtomicU64::new(1),
            repos: Mutex::new(HashMap::new()),
            files: Mutex::new(HashSet::new()),
            get_repo_calls: Mutex::new(Vec::new()),
            create_fork_calls: Mutex::new(Vec::new()),
            create_pull_calls: Mutex::new(Vec::new()),
            file_exists_calls: Mutex::new(Vec::new()),
            error_on_get_user: Mutex::new(None),
            error_on_get_repo: Mutex::new(HashSet::new()),
            error_on_create_fork: Mutex::new(HashSet::new()),
            error_on_create_pull: Mutex::new(None),
        }
    }

    /// Register a repository
    pub fn add_repo(&self, repo: Repository) {
        self.repos
            .lock()
            .unwrap()
            .insert(format!("{}/{}", repo.owner, repo.name), repo);
    }

    /// Make `path` exist on `repo` (any branch)
    pub fn add_file(&self, repo: &str, path: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(format!("{repo}:{path}"));
    }

    // === Error injection methods ===

    /// Make `get_user` return an error
    pub fn fail_get_user(&self, msg: &str) {
        *self.error_on_get_user.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `get_repo` fail for `repo`
    pub fn fail_get_repo(&self, repo: &str) {
        self.error_on_get_repo
            .lock()
            .unwrap()
            .insert(repo.to_string());
    }

    /// Make `create_fork` fail for `repo`
    pub fn fail_create_fork(&self, repo: &str) {
        self.error_on_create_fork
            .lock()
            .unwrap()
            .insert(repo.to_string());
    }

    /// Make `create_pull` return an error
    pub fn fail_create_pull(&self, msg: &str) {
        *self.error_on_create_pull.lock().unwrap() = Some(msg.to_string());
    }

    // === Call inspection ===

    pub fn get_repo_calls(&self) -> Vec<String> {
        self.get_repo_calls.lock().unwrap().clone()
    }

    pub fn create_fork_calls(&self) -> Vec<String> {
        self.create_fork_calls.lock().unwrap().clone()
    }

    pub fn create_pull_calls(&self) -> Vec<CreatePullCall> {
        self.create_pull_calls.lock().unwrap().clone()
    }

    pub fn file_exists_calls(&self) -> Vec<String> {
        self.file_exists_calls.lock().unwrap().clone()
    }

    // === Assertions ===

    /// Assert `create_pull` was called exactly once, returning the call
    pub fn assert_single_pull(&self) -> CreatePullCall {
        let calls = self.create_pull_calls();
        assert_eq!(calls.len(), 1, "expected one create_pull call, got {calls:?}");
        calls[0].clone()
    }

    /// Assert no pull request was opened
    pub fn assert_no_pulls(&self) {
        let calls = self.create_pull_calls();
        assert!(calls.is_empty(), "expected no create_pull calls, got {calls:?}");
    }

    /// Assert `create_fork` was never called for `repo`
    pub fn assert_not_forked(&self, repo: &str) {
        assert!(
            !self.create_fork_calls().iter().any(|r| r == repo),
            "expected no fork of {repo}"
        );
    }
}

#[async_trait]
impl HostingService for MockHostingService {
    async fn get_user(&self) -> Result<User> {
        if let Some(msg) = self.error_on_get_user.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }
        Ok(User {
            login: self.login.clone(),
        })
    }

    async fn get_repo(&self, name: &RepoName) -> Result<Repository> {
        let key = name.to_string();
        self.get_repo_calls.lock().unwrap().push(key.clone());

        if self.error_on_get_repo.lock().unwrap().contains(&key) {
            return Err(Error::GitHubApi(format!("lookup of {key} failed")));
        }
        self.repos
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or_else(|| Error::GitHubApi(format!("Not Found: {key}")))
    }

    async fn create_fork(&self, repo: &Repository) -> Result<Repository> {
        let key = format!("{}/{}", repo.owner, repo.name);
        self.create_fork_calls.lock().unwrap().push(key.clone());

        if self.error_on_create_fork.lock().unwrap().contains(&key) {
            return Err(Error::GitHubApi(format!("forking {key} failed")));
        }
        let fork = super::make_repo(&self.login, &repo.name);
        self.add_repo(fork.clone());
        Ok(fork)
    }

    async fn create_pull(
        &self,
        repo: &Repository,
        request: &NewPullRequest,
    ) -> Result<PullRequest> {
        self.create_pull_calls.lock().unwrap().push(CreatePullCall {
            repo: format!("{}/{}", repo.owner, repo.name),
            title: request.title.clone(),
            body: request.body.clone(),
            base: request.base.clone(),
            head: request.head.clone(),
        });

        if let Some(msg) = self.error_on_create_pull.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        let mut pr = make_pr(number, &repo.owner, &repo.name, &request.title);
        pr.base_ref.clone_from(&request.base);
        pr.head_ref.clone_from(&request.head);
        Ok(pr)
    }

    async fn file_exists(&self, repo: &RepoName, _branch: &str, path: &str) -> Result<bool> {
        let key = format!("{repo}:{path}");
        self.file_exists_calls.lock().unwrap().push(key.clone());
        Ok(self.files.lock().unwrap().contains(&key))
    }
}
