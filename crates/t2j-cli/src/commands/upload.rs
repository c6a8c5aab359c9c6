//! Upload command: push a Timing export's worklogs to Jira.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::Args;

use t2j_core::{SyncEngine, SyncReport, parse_export, worklogs_from_export};
use t2j_jira::JiraClient;

use crate::Config;

#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Path to the Timing JSON export.
    pub file: PathBuf,
}

/// Reads the export, filters it down to ticket work, and syncs it against
/// Jira. Upload failures end up in the report, not in the returned error:
/// only pre-sync problems (unreadable file, bad JSON, incomplete
/// configuration) abort the run.
pub async fn run(args: &UploadArgs, config: &Config) -> Result<SyncReport> {
    ensure!(!config.jira_url.is_empty(), "jira_url is not configured");
    ensure!(!config.username.is_empty(), "username is not configured");
    ensure!(!config.password.is_empty(), "password is not configured");

    let json = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let records = parse_export(&json)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;
    let worklogs = worklogs_from_export(&records);
    tracing::debug!(
        records = records.len(),
        worklogs = worklogs.len(),
        "decoded export"
    );

    let client = JiraClient::new(config.jira_config()).context("failed to build Jira client")?;
    let report = SyncEngine::new().sync(&worklogs, &client).await;
    Ok(report)
}
