//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value did not look like a Jira issue key.
    #[error("invalid issue key: {value:?}")]
    InvalidIssueKey { value: String },
}

/// A validated Jira issue key, e.g. `PROJ-123`.
///
/// Keys are one to five uppercase ASCII letters, a hyphen, and one to five
/// digits. Anything else is rejected at construction, so a held `IssueKey`
/// always names a syntactically valid issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IssueKey(String);

impl IssueKey {
    /// Creates a new issue key after validation.
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();
        if is_valid_key(&key) {
            Ok(Self(key))
        } else {
            Err(ValidationError::InvalidIssueKey { value: key })
        }
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_key(key: &str) -> bool {
    let Some((project, number)) = key.split_once('-') else {
        return false;
    };
    (1..=5).contains(&project.len())
        && project.chars().all(|c| c.is_ascii_uppercase())
        && (1..=5).contains(&number.len())
        && number.chars().all(|c| c.is_ascii_digit())
}

impl TryFrom<String> for IssueKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IssueKey> for String {
    fn from(key: IssueKey) -> Self {
        key.0
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for IssueKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
