//! GitHub REST implementation of the issue client.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::json;
use tracing::{debug, info, instrument};

use crate::base::{
    config::Config,
    types::{Issue, RepoId, Res, Void},
};

use super::{GenericIssueClient, IssueClient};

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("issue-scribe/", env!("CARGO_PKG_VERSION"));

// Extra methods on `IssueClient` applied by the github implementation.

impl IssueClient {
    /// Creates a new GitHub issue client from the configuration.
    pub fn github(config: &Config) -> Res<Self> {
        let client = GitHubIssueClient::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Specific implementations.

/// GitHub issue client, scoped to a single repository.
#[derive(Clone)]
pub struct GitHubIssueClient {
    client: reqwest::Client,
    api_url: String,
    repo: RepoId,
}

impl GitHubIssueClient {
    /// Create a new GitHub issue client.
    #[instrument(name = "GitHubIssueClient::new", skip_all)]
    pub fn new(config: &Config) -> Res<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(GITHUB_API_VERSION));

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.gh_token))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder().user_agent(USER_AGENT).default_headers(headers).build()?;

        Ok(Self {
            client,
            api_url: config.github_api_url.trim_end_matches('/').to_string(),
            repo: config.repo()?,
        })
    }

    fn issue_url(&self, number: u64) -> String {
        format!("{}/repos/{}/{}/issues/{}", self.api_url, self.repo.owner, self.repo.name, number)
    }
}

#[async_trait]
impl GenericIssueClient for GitHubIssueClient {
    #[instrument(name = "GitHubIssueClient::get_issue", skip(self))]
    async fn get_issue(&self, number: u64) -> Res<Issue> {
        debug!("Fetching issue from {} ...", self.repo);

        let issue = self.client.get(self.issue_url(number)).send().await?.error_for_status()?.json::<Issue>().await?;

        info!("Fetched issue #{} ({} bytes of body).", issue.number, issue.body_text().len());

        Ok(issue)
    }

    #[instrument(name = "GitHubIssueClient::update_issue_body", skip(self, body))]
    async fn update_issue_body(&self, number: u64, body: &str) -> Void {
        self.client
            .patch(self.issue_url(number))
            .json(&json!({ "body": body }))
            .send()
            .await?
            .error_for_status()?;

        info!("Updated body of issue #{number}.");

        Ok(())
    }

    #[instrument(name = "GitHubIssueClient::create_comment", skip(self, body))]
    async fn create_comment(&self, number: u64, body: &str) -> Void {
        self.client
            .post(format!("{}/comments", self.issue_url(number)))
            .json(&json!({ "body": body }))
            .send()
            .await?
            .error_for_status()?;

        info!("Commented on issue #{number}.");

        Ok(())
    }
}

// Tests.
