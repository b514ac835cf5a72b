//! Clone-and-branch setup

use super::{Checkout, SetupError};
use crate::error::Error;
use crate::shell::{CommandRunner, ShellCommand};
use crate::types::{CloneProtocol, Repository};
use std::path::Path;
use tracing::debug;

/// Everything [`clone_fork`] needs
#[derive(Debug, Clone, Copy)]
pub struct CloneRequest<'a> {
    /// Directory the fork is cloned into
    pub workdir: &'a Path,
    /// Repository the pull request will target
    pub upstream: &'a Repository,
    /// Repository that is cloned and pushed to
    pub fork: &'a Repository,
    /// Branch to create
    pub branch: &'a str,
    /// URL flavor for the clone
    pub protocol: CloneProtocol,
}

/// Clone the fork and check out a fresh branch from upstream's default branch
///
/// Refuses to reuse a branch that already exists on the fork: if
/// `origin/<branch>` can be checked out, returns
/// [`SetupError::BranchExists`] before touching any remotes.
pub async fn clone_fork(
    runner: &dyn CommandRunner,
    request: &CloneRequest<'_>,
) -> Result<Checkout, SetupError> {
    let workdir = request.workdir;
    if !workdir.is_dir() {
        return Err(Error::Config(format!(
            "working directory {} does not exist",
            workdir.display()
        ))
        .into());
    }

    let url = request.fork.url_for(request.protocol);
    runner
        .run(workdir, &ShellCommand::git(["clone", "--depth", "1", url]))
        .await?;

    let path = workdir.join(&request.fork.name);
    debug!(path = %path.display(), "cloned fork");

    // Success here means the branch is already on the fork
    let probe = ShellCommand::git(["checkout".to_string(), format!("origin/{}", request.branch)]);
    if runner.run(&path, &probe).await.is_ok() {
        return Err(SetupError::BranchExists {
            branch: request.branch.to_string(),
        });
    }

    let upstream_ref = format!("upstream/{}", request.upstream.default_branch);
    let sync = [
        ShellCommand::git(["remote", "add", "upstream", request.upstream.clone_url.as_str()]),
        ShellCommand::git(["fetch", "upstream"]),
        ShellCommand::git(["checkout", upstream_ref.as_str()]),
        ShellCommand::git(["checkout", "-b", request.branch]),
        ShellCommand::git(["submodule", "init"]),
        ShellCommand::git(["submodule", "update"]),
    ];
    for command in &sync {
        runner.run(&path, command).await?;
    }

    Ok(Checkout {
        path,
        branch: request.branch.to_string(),
    })
}
