//! Library root for `issue-scribe`.
//!
//! Issue-scribe is an OpenAI-powered helper for GitHub issues designed to:
//! - Read the raw notes an author left in an issue body
//! - Rewrite them into a structured issue body with a fixed prompt
//! - Keep the original notes below the rewritten text
//! - Leave a short confirmation comment
//!
//! It runs once per invocation, usually as a CI step triggered by an issue event,
//! and is configured entirely through environment variables. The services sit behind
//! traits so the GitHub and OpenAI integrations can be swapped or mocked.

#[deny(missing_docs)]
pub mod base;
pub mod interaction;
pub mod prelude;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use rustls::crypto;
use tracing::{debug, info};

/// Public async entry for the binary crate.
///
/// Sets up necessary services and runs the issue-scribe once:
/// - Initializes the crypto provider
/// - Creates the runtime context with the GitHub and LLM clients
/// - Rewrites the configured issue
pub async fn start(config: Config) -> Void {
    info!("Starting issue-scribe ...");

    // Start the crypto provider.
    if crypto::ring::default_provider().install_default().is_err() {
        debug!("A crypto provider was already installed.");
    }

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config)?;

    // Run the rewrite.
    let outcome = runtime.start().await?;

    info!("Finished with outcome {outcome:?}.");

    Ok(())
}
