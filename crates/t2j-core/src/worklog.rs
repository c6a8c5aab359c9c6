//! The worklog value object.

use chrono::{DateTime, Utc};

use crate::types::IssueKey;

/// A single recorded span of time spent on a Jira issue.
///
/// Built from already-validated parts: the issue key has passed the grammar
/// check and the start time has been parsed to an instant, so a `Worklog`
/// that exists is a `Worklog` that is well-formed. Optional fields are
/// attached with the consuming `with_*` builders; after that the value never
/// changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worklog {
    issue_key: IssueKey,
    started: DateTime<Utc>,
    duration_secs: u64,
    description: String,
    author: Option<String>,
}

impl Worklog {
    /// Creates a worklog with an empty description and no author.
    pub fn new(issue_key: IssueKey, started: DateTime<Utc>, duration_secs: u64) -> Self {
        Self {
            issue_key,
            started,
            duration_secs,
            description: String::new(),
            author: None,
        }
    }

    /// Attaches a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attaches an author name.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// The issue this time was spent on.
    pub fn issue_key(&self) -> &IssueKey {
        &self.issue_key
    }

    /// When the work started.
    pub const fn started(&self) -> DateTime<Utc> {
        self.started
    }

    /// How long the work lasted, in seconds.
    pub const fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    /// Free-text description of the work.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Who logged the work, when known (remote entries only).
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Whether this worklog records the same remote entry as `other`:
    /// same issue and same start instant. Both sides hold parsed instants,
    /// so textual formatting of the source timestamps plays no part.
    pub fn matches(&self, other: &Self) -> bool {
        self.issue_key == other.issue_key && self.started == other.started
    }
}
