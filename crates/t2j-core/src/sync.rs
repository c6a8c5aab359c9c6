//! The upload engine: hydrate, deduplicate, upload.

use crate::cache::WorklogCache;
use crate::types::IssueKey;
use crate::worklog::Worklog;

/// Remote side of a sync run.
///
/// Implementors own their endpoint and credentials; the engine only ever
/// asks what exists and posts what is missing. `fetch_existing` fails open:
/// any retrieval problem degrades to "no existing worklogs", accepting a
/// possible duplicate upload over halting the run.
#[expect(
    async_fn_in_trait,
    reason = "the engine drives one future at a time on a single task; Send bounds are not needed"
)]
pub trait WorklogRemote {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the worklogs already recorded against an issue. Must return
    /// an empty list, not an error, when retrieval fails.
    async fn fetch_existing(&self, issue_key: &IssueKey) -> Vec<Worklog>;

    /// Posts a new worklog.
    async fn upload(&self, worklog: &Worklog) -> Result<(), Self::Error>;
}

/// A single failed upload, kept for the run summary.
#[derive(Debug)]
pub struct UploadFailure {
    pub issue_key: IssueKey,
    pub description: String,
    pub error: String,
}

/// Outcome of one sync run.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Worklogs posted to the remote this run.
    pub uploaded: usize,
    /// Worklogs skipped because a matching remote entry already existed.
    pub skipped: usize,
    /// One entry per upload that failed.
    pub failures: Vec<UploadFailure>,
}

impl SyncReport {
    /// Number of worklogs whose upload failed.
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Drives a batch of worklogs against a remote, uploading what is missing.
///
/// The engine owns the cache exclusively: each issue is fetched from the
/// remote at most once per run, and successful uploads are recorded so that
/// later entries for the same instant are seen as duplicates. Entries are
/// processed strictly in input order.
#[derive(Debug, Default)]
pub struct SyncEngine {
    cache: WorklogCache,
}

impl SyncEngine {
    /// Creates an engine with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes `worklogs` in order against `remote`.
    ///
    /// A failed upload is recorded in the report and the run moves on to the
    /// next entry; nothing short-circuits the batch.
    pub async fn sync<R>(&mut self, worklogs: &[Worklog], remote: &R) -> SyncReport
    where
        R: WorklogRemote,
    {
        let mut report = SyncReport::default();

        for worklog in worklogs {
            let issue_key = worklog.issue_key();
            tracing::info!(issue = %issue_key, description = worklog.description(), "checking");

            if !self.cache.is_hydrated(issue_key) {
                tracing::info!(issue = %issue_key, "retrieving existing worklogs");
                let existing = remote.fetch_existing(issue_key).await;
                self.cache.hydrate(issue_key.clone(), existing);
            }

            if self.cache.contains(worklog) {
                tracing::info!(issue = %issue_key, "exists already; skipping");
                report.skipped += 1;
                continue;
            }

            tracing::info!(issue = %issue_key, "uploading worklog");
            match remote.upload(worklog).await {
                Ok(()) => {
                    self.cache.append(worklog.clone());
                    report.uploaded += 1;
                }
                Err(err) => {
                    tracing::warn!(issue = %issue_key, error = %err, "upload failed");
                    report.failures.push(UploadFailure {
                        issue_key: issue_key.clone(),
                        description: worklog.description().to_string(),
                        error: err.to_string(),
                    });
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::collections::HashSet;
    use std::io;

    use super::*;
    use crate::timestamp::parse_timestamp;

    /// In-memory remote: a fixed set of pre-existing worklogs plus a record
    /// of every call the engine makes.
    #[derive(Default)]
    struct FakeRemote {
        existing: HashMap<IssueKey, Vec<Worklog>>,
        fail_descriptions: HashSet<String>,
        fetches: RefCell<Vec<IssueKey>>,
        uploads: RefCell<Vec<Worklog>>,
    }

    impl FakeRemote {
        fn with_existing(mut self, worklog: Worklog) -> Self {
            self.existing
                .entry(worklog.issue_key().clone())
                .or_default()
                .push(worklog);
            self
        }

        fn failing_on(mut self, description: &str) -> Self {
            self.fail_descriptions.insert(description.to_string());
            self
        }
    }

    impl WorklogRemote for FakeRemote {
        type Error = io::Error;

        async fn fetch_existing(&self, issue_key: &IssueKey) -> Vec<Worklog> {
            self.fetches.borrow_mut().push(issue_key.clone());
            self.existing.get(issue_key).cloned().unwrap_or_default()
        }

        async fn upload(&self, worklog: &Worklog) -> Result<(), Self::Error> {
            if self.fail_descriptions.contains(worklog.description()) {
                return Err(io::Error::other("remote rejected worklog"));
            }
            self.uploads.borrow_mut().push(worklog.clone());
            Ok(())
        }
    }

    fn worklog(key: &str, started: &str, description: &str) -> Worklog {
        Worklog::new(
            IssueKey::new(key).unwrap(),
            parse_timestamp(started).unwrap(),
            600,
        )
        .with_description(description)
    }

    #[tokio::test]
    async fn uploads_missing_entries() {
        let remote = FakeRemote::default();
        let entries = vec![
            worklog("PROJ-1", "2023-01-01T09:00:00Z", "morning"),
            worklog("PROJ-2", "2023-01-01T10:00:00Z", "standup"),
        ];

        let report = SyncEngine::new().sync(&entries, &remote).await;

        assert_eq!(report.uploaded, 2);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.failed(), 0);
        assert_eq!(remote.uploads.borrow().len(), 2);
    }

    #[tokio::test]
    async fn skips_entries_already_on_remote() {
        let remote = FakeRemote::default()
            .with_existing(worklog("PROJ-1", "2023-01-01T09:00:00+0000", "earlier run"));
        let entries = vec![worklog("PROJ-1", "2023-01-01 09:00:00", "same instant")];

        let report = SyncEngine::new().sync(&entries, &remote).await;

        assert_eq!(report.uploaded, 0);
        assert_eq!(report.skipped, 1);
        assert!(remote.uploads.borrow().is_empty());
    }

    #[tokio::test]
    async fn fetches_each_issue_once() {
        let remote = FakeRemote::default();
        let entries = vec![
            worklog("PROJ-1", "2023-01-01T09:00:00Z", "one"),
            worklog("PROJ-1", "2023-01-01T10:00:00Z", "two"),
            worklog("OPS-2", "2023-01-01T11:00:00Z", "three"),
            worklog("PROJ-1", "2023-01-01T12:00:00Z", "four"),
        ];

        SyncEngine::new().sync(&entries, &remote).await;

        let fetches = remote.fetches.borrow();
        assert_eq!(fetches.len(), 2);
        assert_eq!(fetches[0].as_str(), "PROJ-1");
        assert_eq!(fetches[1].as_str(), "OPS-2");
    }

    #[tokio::test]
    async fn duplicate_within_run_is_skipped_after_upload() {
        let remote = FakeRemote::default();
        let entries = vec![
            worklog("PROJ-1", "2023-01-01T09:00:00Z", "first spelling"),
            worklog("PROJ-1", "2023-01-01 09:00:00", "second spelling"),
        ];

        let report = SyncEngine::new().sync(&entries, &remote).await;

        assert_eq!(report.uploaded, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(remote.uploads.borrow().len(), 1);
    }

    #[tokio::test]
    async fn one_failure_does_not_stop_the_batch() {
        let remote = FakeRemote::default().failing_on("doomed");
        let entries = vec![
            worklog("PROJ-1", "2023-01-01T09:00:00Z", "fine"),
            worklog("PROJ-1", "2023-01-01T10:00:00Z", "doomed"),
            worklog("PROJ-2", "2023-01-01T11:00:00Z", "also fine"),
        ];

        let report = SyncEngine::new().sync(&entries, &remote).await;

        assert_eq!(report.uploaded, 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failures[0].issue_key.as_str(), "PROJ-1");
        assert_eq!(report.failures[0].description, "doomed");
        assert_eq!(remote.uploads.borrow().len(), 2);
    }

    #[tokio::test]
    async fn failed_upload_is_not_cached() {
        let remote = FakeRemote::default().failing_on("doomed");
        let entries = vec![
            worklog("PROJ-1", "2023-01-01T09:00:00Z", "doomed"),
            // Same instant again: had the failure been cached this would be
            // skipped, but the first entry was never recorded remotely.
            worklog("PROJ-1", "2023-01-01T09:00:00Z", "doomed"),
        ];

        let report = SyncEngine::new().sync(&entries, &remote).await;

        assert_eq!(report.uploaded, 0);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.failed(), 2);
    }

    #[tokio::test]
    async fn second_run_against_updated_remote_uploads_nothing() {
        let remote = FakeRemote::default();
        let entries = vec![
            worklog("PROJ-1", "2023-01-01T09:00:00Z", "a"),
            worklog("PROJ-2", "2023-01-01T10:00:00Z", "b"),
        ];

        let first = SyncEngine::new().sync(&entries, &remote).await;
        assert_eq!(first.uploaded, 2);

        // A fresh engine against a remote that now reflects the first run.
        let mut replayed = FakeRemote::default();
        for uploaded in remote.uploads.borrow().iter() {
            replayed = replayed.with_existing(uploaded.clone());
        }

        let second = SyncEngine::new().sync(&entries, &replayed).await;
        assert_eq!(second.uploaded, 0);
        assert_eq!(second.skipped, 2);
        assert!(replayed.uploads.borrow().is_empty());
    }
}
