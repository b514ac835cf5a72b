//! CLI command implementations

mod auth;
mod reporter;
mod run;
pub mod style;

pub use auth::run_auth;
pub use run::{RunOptions, parse_repo_list, run_batch};
