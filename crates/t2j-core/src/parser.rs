//! Activity title parsing.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::IssueKey;

/// Matches titles of the form `PROJ-123 Description text`: an issue key
/// prefix, one space, and at least one character of description.
static TITLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]{1,5}-\d{1,5}) (.+)$").expect("title pattern compiles"));

/// The issue key and free-text description extracted from an activity title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTitle {
    pub issue_key: IssueKey,
    pub description: String,
}

/// Extracts the issue key prefix and description from an activity title.
///
/// Titles with no recognisable issue key yield `None`: most time-tracking
/// entries are not ticket work, so a miss is routine filtering rather than
/// an error. No partial matches, no case folding, no fallback pattern.
pub fn parse_title(title: &str) -> Option<ParsedTitle> {
    let captures = TITLE_PATTERN.captures(title)?;
    let issue_key = IssueKey::new(&captures[1]).ok()?;
    Some(ParsedTitle {
        issue_key,
        description: captures[2].to_string(),
    })
}
