//! Auth command - show where the token comes from and who it belongs to

use crate::cli::style::{CHECK, Stylize};
use anstream::println;
use batchpr::auth::{get_github_auth, test_github_auth};
use batchpr::config::Config;
use batchpr::error::Result;
use batchpr::platform::create_hosting_service;

/// Run the auth command
pub async fn run_auth(config: &Config) -> Result<()> {
    let auth = get_github_auth(config.github_host.as_deref()).await?;
    println!("{} {}", "Token source:".emphasis(), auth.source);

    let service = create_hosting_service(config, &auth.token)?;
    let user = test_github_auth(service.as_ref()).await?;

    let host = config.github_host.as_deref().unwrap_or("github.com");
    println!(
        "{} Authenticated to {} as {}",
        CHECK.success(),
        host.emphasis(),
        user.login.accent()
    );
    Ok(())
}
