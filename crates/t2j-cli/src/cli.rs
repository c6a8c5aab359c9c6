//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::upload::UploadArgs;

/// Timing to Jira worklog uploader.
///
/// Reads a Timing JSON export, keeps the entries whose titles start with a
/// Jira issue key, and uploads the ones Jira does not already have.
#[derive(Debug, Parser)]
#[command(name = "t2j", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Upload worklogs from a Timing JSON export.
    Upload(UploadArgs),
}
