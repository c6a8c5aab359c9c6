//! Core domain logic for the Timing to Jira worklog uploader.
//!
//! This crate contains the parts with actual decisions in them:
//! - Title parsing: extracting a Jira issue key from an activity title
//! - The worklog value object and its same-instant matching rule
//! - The per-issue cache of worklogs known to exist remotely
//! - The sync engine that uploads whatever the remote is missing
//!
//! Transport lives behind the [`WorklogRemote`] trait; this crate performs
//! no I/O of its own.

pub mod cache;
pub mod export;
pub mod parser;
pub mod sync;
pub mod timestamp;
pub mod types;
pub mod worklog;

pub use cache::WorklogCache;
pub use export::{ExportRecord, parse_export, worklogs_from_export};
pub use parser::{ParsedTitle, parse_title};
pub use sync::{SyncEngine, SyncReport, UploadFailure, WorklogRemote};
pub use timestamp::{TimestampError, parse_timestamp, to_jira_format};
pub use types::{IssueKey, ValidationError};
pub use worklog::Worklog;
