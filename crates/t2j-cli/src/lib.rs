//! Worklog uploader CLI library.
//!
//! This crate provides the command-line interface for the Timing to Jira
//! worklog uploader.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
