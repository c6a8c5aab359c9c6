//! Wire-format models for the Jira v2 worklog endpoints.

use serde::{Deserialize, Serialize};

use t2j_core::{IssueKey, Worklog, parse_timestamp, to_jira_format};

/// Response page of `GET issue/{key}/worklog`.
#[derive(Debug, Deserialize)]
pub struct WorklogPage {
    #[serde(default)]
    pub worklogs: Vec<RemoteWorklog>,
}

impl WorklogPage {
    /// Converts the page rows into domain worklogs. Rows without a usable
    /// start time are dropped; they can never match a local entry anyway.
    pub fn into_worklogs(self, issue_key: &IssueKey) -> Vec<Worklog> {
        self.worklogs
            .into_iter()
            .filter_map(|row| row.into_worklog(issue_key))
            .collect()
    }
}

/// One row of the worklog listing. Jira omits or nulls fields freely, so
/// everything is optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteWorklog {
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub author: Option<RemoteAuthor>,
    #[serde(default)]
    pub started: Option<String>,
    #[serde(default)]
    pub time_spent_seconds: Option<u64>,
}

/// The author object attached to a remote worklog row.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteAuthor {
    #[serde(default)]
    pub display_name: Option<String>,
}

impl RemoteWorklog {
    fn into_worklog(self, issue_key: &IssueKey) -> Option<Worklog> {
        let Some(started_text) = self.started else {
            tracing::debug!(issue = %issue_key, "dropping remote worklog without start time");
            return None;
        };
        let started = match parse_timestamp(&started_text) {
            Ok(instant) => instant,
            Err(err) => {
                tracing::warn!(
                    issue = %issue_key,
                    error = %err,
                    "dropping remote worklog with unparseable start time"
                );
                return None;
            }
        };

        let mut worklog = Worklog::new(
            issue_key.clone(),
            started,
            self.time_spent_seconds.unwrap_or(0),
        );
        if let Some(comment) = self.comment {
            worklog = worklog.with_description(comment);
        }
        if let Some(author) = self.author.and_then(|author| author.display_name) {
            worklog = worklog.with_author(author);
        }
        Some(worklog)
    }
}

/// Body of worklog create and update requests.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorklogBody {
    pub comment: String,
    pub started: String,
    pub time_spent_seconds: u64,
}

impl WorklogBody {
    pub fn from_worklog(worklog: &Worklog) -> Self {
        Self {
            comment: worklog.description().to_string(),
            started: to_jira_format(worklog.started()),
            time_spent_seconds: worklog.duration_secs(),
        }
    }
}
