//! Hosting service construction

use crate::config::Config;
use crate::error::Result;
use crate::platform::{GitHubService, HostingService};

/// Create the hosting service described by `config`, authenticated with `token`
pub fn create_hosting_service(config: &Config, token: &str) -> Result<Box<dyn HostingService>> {
    let service = GitHubService::new(
        token,
        config.github_host.as_deref(),
        config.raw_content_url.as_deref(),
    )?;
    Ok(Box::new(service))
}
