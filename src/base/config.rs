//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, path::Path, sync::Arc};

use config::{ConfigBuilder, builder::DefaultState};
use serde::Deserialize;

use crate::base::prompts;

use super::types::{RepoId, Res};

/// Default OpenAI model to use
fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

/// Default max output tokens for OpenAI model
fn default_openai_max_tokens() -> u32 {
    1200
}

/// Default sampling temperature for OpenAI model
fn default_openai_temperature() -> f32 {
    0.3
}

/// Default timeout for the completion call, in seconds
fn default_openai_timeout_secs() -> u64 {
    120
}

/// Default GitHub REST API base URL
fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

/// Default marker separating the raw notes in an issue body.
fn default_notes_marker() -> String {
    "<!-- raw-notes -->".to_string()
}

/// Default prompt template.
fn default_prompt_template() -> String {
    prompts::ISSUE_PROMPT_TEMPLATE.to_string()
}

fn default_true() -> bool {
    true
}

/// Configuration for the issue-scribe application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The shared configuration values.
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Configuration values, keyed by their lowercased environment variable names.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// OpenAI API key (`OPENAI_API_KEY`).
    pub openai_api_key: String,
    /// GitHub token used for the REST calls (`GH_TOKEN`).
    pub gh_token: String,
    /// Repository full name, `owner/repo` (`REPO_FULL`).
    pub repo_full: String,
    /// Number of the issue to rewrite (`ISSUE_NUMBER`).
    pub issue_number: u64,
    /// OpenAI model to use (`OPENAI_MODEL`).
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    /// Max output tokens for OpenAI model (`OPENAI_MAX_TOKENS`).
    #[serde(default = "default_openai_max_tokens")]
    pub openai_max_tokens: u32,
    /// Sampling temperature for `gpt` models (`OPENAI_TEMPERATURE`).
    /// Value between 0 and 2.
    #[serde(default = "default_openai_temperature")]
    pub openai_temperature: f32,
    /// Optional alternate API base, e.g. a proxy (`OPENAI_API_BASE`).
    #[serde(default)]
    pub openai_api_base: Option<String>,
    /// Upper bound on the completion call, in seconds (`OPENAI_TIMEOUT_SECS`).
    #[serde(default = "default_openai_timeout_secs")]
    pub openai_timeout_secs: u64,
    /// GitHub REST API base URL (`GITHUB_API_URL`).
    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,
    /// Marker after which the raw notes start (`NOTES_MARKER`).
    #[serde(default = "default_notes_marker")]
    pub notes_marker: String,
    /// Optional custom prompt template to override the default (`PROMPT_TEMPLATE`).
    #[serde(default = "default_prompt_template")]
    pub prompt_template: String,
    /// Append the raw notes below the rewritten body (`APPEND_NOTES`).
    #[serde(default = "default_true")]
    pub append_notes: bool,
    /// Post a confirmation comment after a successful rewrite (`POST_COMMENT`).
    #[serde(default = "default_true")]
    pub post_comment: bool,
}

impl Config {
    /// Load the configuration from the environment and an optional TOML file.
    pub fn load(explicit_path: Option<&Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().try_parsing(true));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        Self::from_builder(cfg)
    }

    /// Build, deserialize, and validate a configuration from prepared sources.
    pub fn from_builder(cfg: ConfigBuilder<DefaultState>) -> Res<Self> {
        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        result.validate()?;

        Ok(result)
    }

    /// The repository named by `REPO_FULL`.
    pub fn repo(&self) -> Res<RepoId> {
        self.repo_full.parse()
    }

    fn validate(&self) -> Res<()> {
        self.repo()?;

        if self.issue_number == 0 {
            return Err(anyhow::anyhow!("Issue number must be positive."));
        }

        if self.openai_temperature < 0.0 || self.openai_temperature > 2.0 {
            return Err(anyhow::anyhow!("OpenAI temperature must be between 0 and 2."));
        }

        if self.openai_max_tokens < 1 || self.openai_max_tokens > 128000 {
            return Err(anyhow::anyhow!("OpenAI max tokens must be between 1 and 128000."));
        }

        if self.notes_marker.trim().is_empty() {
            return Err(anyhow::anyhow!("Notes marker must not be empty."));
        }

        if !self.prompt_template.contains(prompts::NOTES_PLACEHOLDER) {
            return Err(anyhow::anyhow!("Prompt template must contain the `{}` placeholder.", prompts::NOTES_PLACEHOLDER));
        }

        Ok(())
    }
}
