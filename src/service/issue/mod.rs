pub mod github;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{Issue, Res, Void};

// Traits.

/// Generic issue tracker trait that clients must implement.
///
/// This trait defines the few calls the scribe makes against an issue tracker.
/// A client is scoped to a single repository, so only the issue number is passed.
#[async_trait]
pub trait GenericIssueClient: Send + Sync + 'static {
    /// Fetch the issue's title and body.
    async fn get_issue(&self, number: u64) -> Res<Issue>;

    /// Replace the issue body.
    async fn update_issue_body(&self, number: u64, body: &str) -> Void;

    /// Post a comment on the issue.
    async fn create_comment(&self, number: u64, body: &str) -> Void;
}

// Structs.

/// Issue tracker client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct IssueClient {
    inner: Arc<dyn GenericIssueClient>,
}

impl Deref for IssueClient {
    type Target = dyn GenericIssueClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl IssueClient {
    pub fn new(inner: Arc<dyn GenericIssueClient>) -> Self {
        Self { inner }
    }
}
