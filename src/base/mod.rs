//! Core components, types, and utilities for the issue-scribe.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - The prompt template and the fixed messages written to issues.
//! - Raw-notes extraction and body composition.
//! - Common types and result handling.

pub mod config;
pub mod notes;
pub mod prompts;
pub mod types;
