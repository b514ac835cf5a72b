//! GitHub hosting service implementation

use crate::error::{Error, Result};
use crate::platform::HostingService;
use crate::types::{NewPullRequest, PullRequest, RepoName, Repository, User};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::{Client, StatusCode};
use tracing::debug;

/// Where raw file contents are served from on github.com
pub const DEFAULT_RAW_CONTENT_URL: &str = "https://raw.githubusercontent.com";

/// Branch assumed when the API does not report a default branch
const FALLBACK_DEFAULT_BRANCH: &str = "master";

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    /// HTTP client for unauthenticated raw-content requests
    http_client: Client,
    /// Base URL for raw-content requests, without trailing slash
    raw_content_url: String,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `host` selects a GitHub Enterprise instance (API at
    /// `https://<host>/api/v3`); `None` means github.com.
    pub fn new(token: &str, host: Option<&str>, raw_content_url: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        if let Some(h) = host {
            let base_url = format!("https://{h}/api/v3");
            builder = builder
                .base_uri(&base_url)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("batchpr")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            http_client,
            raw_content_url: raw_content_url
                .unwrap_or(DEFAULT_RAW_CONTENT_URL)
                .trim_end_matches('/')
                .to_string(),
        })
    }

    /// URL of `path` on `branch` of `repo` in the raw-content host
    fn raw_file_url(&self, repo: &RepoName, branch: &str, path: &str) -> String {
        let encoded_path = path
            .trim_start_matches('/')
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!(
            "{}/{}/{}/{}/{}",
            self.raw_content_url,
            repo.owner,
            repo.name,
            urlencoding::encode(branch),
            encoded_path
        )
    }
}

/// Helper to convert an octocrab repository to our `Repository` type
fn repository_from_octocrab(repo: &octocrab::models::Repository) -> Result<Repository> {
    let owner = repo
        .owner
        .as_ref()
        .map(|o| o.login.clone())
        .ok_or_else(|| Error::GitHubApi(format!("repository {} has no owner", repo.name)))?;

    Ok(Repository {
        owner,
        name: repo.name.clone(),
        ssh_url: repo.ssh_url.clone().unwrap_or_default(),
        clone_url: repo
            .clone_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        default_branch: repo
            .default_branch
            .clone()
            .unwrap_or_else(|| FALLBACK_DEFAULT_BRANCH.to_string()),
        html_url: repo
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
    })
}

/// Helper to convert an octocrab PR to our `PullRequest` type
fn pr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        title: pr.title.as_deref().unwrap_or_default().to_string(),
        base_ref: pr.base.ref_field.clone(),
        head_ref: pr.head.ref_field.clone(),
    }
}

#[async_trait]
impl HostingService for GitHubService {
    async fn get_user(&self) -> Result<User> {
        debug!("fetching authenticated user");
        let author = self.client.current().user().await?;
        debug!(login = %author.login, "authenticated");
        Ok(User {
            login: author.login,
        })
    }

    async fn get_repo(&self, name: &RepoName) -> Result<Repository> {
        debug!(repo = %name, "fetching repository");
        let repo = self.client.repos(&name.owner, &name.name).get().await?;
        repository_from_octocrab(&repo)
    }

    async fn create_fork(&self, repo: &Repository) -> Result<Repository> {
        debug!(repo = %repo.full_name(), "creating fork");
        let fork = self
            .client
            .repos(&repo.owner, &repo.name)
            .create_fork()
            .send()
            .await?;

        let result = repository_from_octocrab(&fork)?;
        debug!(fork = %result.full_name(), "fork ready");
        Ok(result)
    }

    async fn create_pull(
        &self,
        repo: &Repository,
        request: &NewPullRequest,
    ) -> Result<PullRequest> {
        debug!(
            repo = %repo.full_name(),
            head = %request.head,
            base = %request.base,
            "creating PR"
        );
        let pr = self
            .client
            .pulls(&repo.owner, &repo.name)
            .create(&request.title, &request.head, &request.base)
            .body(&request.body)
            .send()
            .await?;

        let result = pr_from_octocrab(&pr);
        debug!(pr_number = result.number, "created PR");
        Ok(result)
    }

    async fn file_exists(&self, repo: &RepoName, branch: &str, path: &str) -> Result<bool> {
        let url = self.raw_file_url(repo, branch, path);
        debug!(%url, "checking raw file");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Platform(format!("Failed to fetch {url}: {e}")))?;

        let exists = response.status() == StatusCode::OK;
        debug!(status = %response.status(), exists, "raw file check");
        Ok(exists)
    }
}
