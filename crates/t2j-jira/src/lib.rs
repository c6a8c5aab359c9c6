//! Jira REST client for the worklog uploader.
//!
//! Implements [`t2j_core::WorklogRemote`] over the Jira v2 API: listing the
//! worklogs on an issue and creating, updating, or deleting worklog rows.
//! Credentials and the base endpoint are fixed at construction; nothing else
//! in the workspace ever sees them.

mod client;
mod config;
mod error;
mod models;

pub use client::JiraClient;
pub use config::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, JiraConfig,
};
pub use error::{JiraError, Result};
pub use models::{RemoteAuthor, RemoteWorklog, WorklogBody, WorklogPage};
