//! Per-issue cache of worklogs known to exist remotely.

use std::collections::HashMap;

use crate::types::IssueKey;
use crate::worklog::Worklog;

/// Tracks, per issue, the worklogs already present on the remote side.
///
/// An issue key is either absent (never hydrated) or holds the complete
/// remote snapshot taken at hydration time, plus anything appended after a
/// successful upload. The cache exists to avoid re-querying the remote for
/// the same issue and to catch duplicates created earlier in the same run;
/// it lives for one run only and is never persisted.
#[derive(Debug, Default)]
pub struct WorklogCache {
    entries: HashMap<IssueKey, Vec<Worklog>>,
}

impl WorklogCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// True once `hydrate` has run for this issue.
    pub fn is_hydrated(&self, issue_key: &IssueKey) -> bool {
        self.entries.contains_key(issue_key)
    }

    /// Sets (or replaces) the remote snapshot for an issue.
    pub fn hydrate(&mut self, issue_key: IssueKey, worklogs: Vec<Worklog>) {
        self.entries.insert(issue_key, worklogs);
    }

    /// True iff a cached worklog under the same issue matches `worklog`.
    ///
    /// An issue that was never hydrated holds nothing, so the answer is
    /// `false` rather than an error.
    pub fn contains(&self, worklog: &Worklog) -> bool {
        self.entries
            .get(worklog.issue_key())
            .is_some_and(|cached| cached.iter().any(|existing| existing.matches(worklog)))
    }

    /// Records a worklog as present remotely, creating the issue's list if
    /// this is its first entry.
    pub fn append(&mut self, worklog: Worklog) {
        self.entries
            .entry(worklog.issue_key().clone())
            .or_default()
            .push(worklog);
    }

    /// Drops every snapshot.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
