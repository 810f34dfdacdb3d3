//! Service integrations for external APIs and clients.
//!
//! This module contains implementations for the services used by the issue-scribe:
//! - Issue tracker services (e.g., GitHub)
//! - LLM services (e.g., OpenAI)
//!
//! Each service module defines both generic traits and concrete implementations,
//! allowing for extensibility and easy testing.

pub mod issue;
pub mod llm;
