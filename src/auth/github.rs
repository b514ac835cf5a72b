//! GitHub token discovery

use super::AuthSource;
use crate::error::{Error, Result};
use crate::platform::HostingService;
use crate::types::User;
use tokio::process::Command;
use tracing::debug;

/// Environment variables checked for a token, in order
const TOKEN_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// A GitHub token and where it came from
#[derive(Clone)]
pub struct GitHubAuthConfig {
    /// Personal access token
    pub token: String,
    /// Where the token was found
    pub source: AuthSource,
}

impl std::fmt::Debug for GitHubAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubAuthConfig")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Pick a token from environment-style lookups, falling back to `gh_token`
///
/// Empty values are ignored.
pub fn resolve_github_token<F>(lookup: F, gh_token: Option<String>) -> Option<GitHubAuthConfig>
where
    F: Fn(&str) -> Option<String>,
{
    TOKEN_VARS
        .iter()
        .find_map(|var| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        })
        .map(|token| GitHubAuthConfig {
            token,
            source: AuthSource::EnvVar,
        })
        .or_else(|| {
            gh_token
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(|token| GitHubAuthConfig {
                    token,
                    source: AuthSource::Cli,
                })
        })
}

/// Ask `gh` for its token, if `gh` is installed and logged in
async fn gh_cli_token(host: Option<&str>) -> Option<String> {
    let mut cmd = Command::new("gh");
    cmd.args(["auth", "token"]);
    if let Some(h) = host {
        cmd.args(["--hostname", h]);
    }

    match cmd.output().await {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Ok(output) => {
            debug!(code = ?output.status.code(), "gh auth token failed");
            None
        }
        Err(e) => {
            debug!(error = %e, "gh not available");
            None
        }
    }
}

/// Find a GitHub token from the environment or the `gh` CLI
pub async fn get_github_auth(host: Option<&str>) -> Result<GitHubAuthConfig> {
    let env_lookup = |var: &str| std::env::var(var).ok();

    if let Some(auth) = resolve_github_token(env_lookup, None) {
        debug!(source = %auth.source, "using GitHub token");
        return Ok(auth);
    }

    resolve_github_token(|_| None, gh_cli_token(host).await).ok_or_else(|| {
        Error::Auth(
            "No GitHub token found. Set GITHUB_TOKEN or run 'gh auth login'.".to_string(),
        )
    })
}

/// Verify the token by asking who it belongs to
pub async fn test_github_auth(service: &dyn HostingService) -> Result<User> {
    service
        .get_user()
        .await
        .map_err(|e| Error::Auth(format!("GitHub rejected the token: {e}")))
}
