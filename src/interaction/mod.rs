//! Issue interactions for the issue-scribe.
//!
//! This module coordinates the services (issue tracker, LLM) to turn an issue's raw
//! notes into a rewritten issue body.

pub mod issue_rewrite;
