pub mod openai;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{Generation, Res};

// Traits.

/// Generic LLM client trait that clients must implement.
///
/// This trait defines the core functionality for interacting with large language models.
/// Implementing this trait allows different LLM providers to be used with the issue-scribe.
#[async_trait]
pub trait GenericLlmClient: Send + Sync + 'static {
    /// Complete a single user prompt.
    ///
    /// Quota and rate-limit refusals are reported as `Generation::QuotaExceeded` so the caller can
    /// write a fallback message; any other failure is an error.
    async fn complete(&self, prompt: &str) -> Res<Generation>;
}

// Structs.

/// LLM client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct LlmClient {
    inner: Arc<dyn GenericLlmClient>,
}

impl Deref for LlmClient {
    type Target = dyn GenericLlmClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl LlmClient {
    pub fn new(inner: Arc<dyn GenericLlmClient>) -> Self {
        Self { inner }
    }
}
