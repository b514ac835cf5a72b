//! batchpr - open the same pull request across many repositories
//!
//! For each repository in a batch, batchpr makes sure a fork exists, clones
//! it, branches off upstream's default branch, lets a [`Mutation`] edit
//! files, then commits, pushes and opens a pull request.
//!
//! A failure while resolving, forking or cloning one repository is reported
//! and the batch moves on. A mutation that declines stops the batch.
//!
//! [`Mutation`]: mutation::Mutation

pub mod auth;
pub mod checkout;
pub mod config;
pub mod error;
pub mod mutation;
pub mod platform;
pub mod report;
pub mod shell;
pub mod types;
pub mod updater;

pub use error::{Error, Result};
