//! Common types and result aliases.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Application error type.
pub type Err = anyhow::Error;
/// Application result type.
pub type Res<T> = Result<T, Err>;
/// Result with no value.
pub type Void = Res<()>;

/// A GitHub repository, parsed from its `owner/repo` full name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    /// The owning user or organization.
    pub owner: String,
    /// The repository name.
    pub name: String,
}

impl FromStr for RepoId {
    type Err = Err;

    fn from_str(s: &str) -> Res<Self> {
        let s = s.trim();

        match s.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(anyhow::anyhow!("Repository must be of the form `owner/repo` (got `{s}`).")),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// The subset of a GitHub issue that the scribe reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// The issue number within its repository.
    pub number: u64,
    /// The issue title.
    pub title: String,
    /// GitHub sends `null` for an issue created without a body.
    #[serde(default)]
    pub body: Option<String>,
}

impl Issue {
    /// The issue body, or an empty string when GitHub has none.
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}

/// The result of asking the model to rewrite the notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// The model's completion text.
    Text(String),
    /// The provider refused the call for rate-limit or billing reasons.
    QuotaExceeded {
        /// The provider's error message.
        message: String,
    },
}

/// What the scribe ended up writing to the issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// The issue had no notes; the empty-notes message was written.
    EmptyNotes,
    /// The model's rewrite was written.
    Generated,
    /// The model call was refused; the fallback message was written.
    QuotaFallback,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repo_full_name() {
        let repo: RepoId = "octo-org/hello-world".parse().unwrap();

        assert_eq!(repo.owner, "octo-org");
        assert_eq!(repo.name, "hello-world");
        assert_eq!(repo.to_string(), "octo-org/hello-world");
    }

    #[test]
    fn rejects_malformed_repo_full_name() {
        assert!("".parse::<RepoId>().is_err());
        assert!("no-slash".parse::<RepoId>().is_err());
        assert!("/repo".parse::<RepoId>().is_err());
        assert!("owner/".parse::<RepoId>().is_err());
        assert!("a/b/c".parse::<RepoId>().is_err());
    }

    #[test]
    fn null_issue_body_reads_as_empty() {
        let issue: Issue = serde_json::from_str(r#"{ "number": 3, "title": "t", "body": null }"#).unwrap();

        assert_eq!(issue.body_text(), "");
    }
}
