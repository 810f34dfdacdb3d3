//! Runtime services and shared state for the issue-scribe.

use tracing::{info, instrument};

use crate::{
    base::{
        config::Config,
        types::{Res, RewriteOutcome},
    },
    interaction::issue_rewrite::handle_issue_rewrite,
    service::{issue::IssueClient, llm::LlmClient},
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the issue client, LLM client, and configuration.
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The issue tracker client instance.
    pub github: IssueClient,
    /// The LLM client instance.
    pub llm: LlmClient,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Res<Self> {
        // Initialize the GitHub client.
        let github = IssueClient::github(&config)?;

        // Initialize the LLM client.
        let llm = LlmClient::openai(&config);

        info!("Runtime ready for {} #{}.", config.repo_full, config.issue_number);

        Ok(Self { config, github, llm })
    }

    /// Run the rewrite once.
    pub async fn start(&self) -> Res<RewriteOutcome> {
        handle_issue_rewrite(&self.config, &self.github, &self.llm).await
    }
}
