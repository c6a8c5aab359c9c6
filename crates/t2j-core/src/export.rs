//! Typed decode of the Timing JSON export.

use serde::Deserialize;

use crate::parser;
use crate::timestamp;
use crate::worklog::Worklog;

/// One record of the Timing app's JSON export: an activity title, a start
/// date, and a duration in whole seconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub task_activity_title: String,
    pub start_date: String,
    pub duration: u64,
}

/// Decodes a Timing export: a JSON array of activity records.
pub fn parse_export(json: &str) -> serde_json::Result<Vec<ExportRecord>> {
    serde_json::from_str(json)
}

/// Converts export records into worklogs, dropping records that carry no
/// issue key in their title (not ticket work) or whose start date does not
/// parse.
pub fn worklogs_from_export(records: &[ExportRecord]) -> Vec<Worklog> {
    records.iter().filter_map(record_to_worklog).collect()
}

fn record_to_worklog(record: &ExportRecord) -> Option<Worklog> {
    let Some(parsed) = parser::parse_title(&record.task_activity_title) else {
        tracing::debug!(
            title = %record.task_activity_title,
            "no issue key in title; skipping"
        );
        return None;
    };

    match timestamp::parse_timestamp(&record.start_date) {
        Ok(started) => Some(
            Worklog::new(parsed.issue_key, started, record.duration)
                .with_description(parsed.description),
        ),
        Err(err) => {
            tracing::warn!(
                title = %record.task_activity_title,
                error = %err,
                "unparseable start date; skipping"
            );
            None
        }
    }
}
