use crate::{
    base::{
        notes::{compose_body, extract_notes},
        prompts::{EMPTY_NOTES_MESSAGE, QUOTA_FALLBACK_MESSAGE, REWRITE_COMMENT, build_prompt},
        types::{Generation, RewriteOutcome},
    },
    prelude::*,
    service::{issue::IssueClient, llm::LlmClient},
};

/// Rewrite the configured issue's body from its raw notes.
///
/// The issue body is written exactly once. A comment is only posted after a successful
/// rewrite, and only when `post_comment` is enabled.
#[instrument(skip_all, fields(issue = config.issue_number))]
pub async fn handle_issue_rewrite(config: &Config, github: &IssueClient, llm: &LlmClient) -> Res<RewriteOutcome> {
    let number = config.issue_number;

    // Read the issue and pull out the notes.

    let issue = github.get_issue(number).await?;
    let notes = extract_notes(issue.body_text(), &config.notes_marker);

    if notes.is_empty() {
        warn!("Issue #{number} has no notes; skipping the model call.");
        github.update_issue_body(number, EMPTY_NOTES_MESSAGE).await?;
        return Ok(RewriteOutcome::EmptyNotes);
    }

    // Ask the model for the rewritten body.

    let prompt = build_prompt(&config.prompt_template, &issue.title, notes);
    debug!("Built prompt ({} bytes).", prompt.len());

    let (body, outcome) = match llm.complete(&prompt).await? {
        Generation::Text(text) => (compose_body(text.trim(), notes, &config.notes_marker, config.append_notes), RewriteOutcome::Generated),
        Generation::QuotaExceeded { message } => {
            warn!("Writing the quota fallback message: {message}");
            (compose_body(QUOTA_FALLBACK_MESSAGE, notes, &config.notes_marker, config.append_notes), RewriteOutcome::QuotaFallback)
        }
    };

    github.update_issue_body(number, &body).await?;

    if outcome == RewriteOutcome::Generated && config.post_comment {
        github.create_comment(number, REWRITE_COMMENT).await?;
    }

    info!("Issue #{number} rewritten: {outcome:?}.");

    Ok(outcome)
}
