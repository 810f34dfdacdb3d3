//! Raw-notes extraction and issue body composition.
//!
//! An issue body may carry a marker line; everything after the first marker is the author's raw
//! notes. The rewritten body puts the marker back below a separator, so a second run extracts the
//! same notes again.

/// Separator placed between the rewritten text and the preserved notes.
pub const NOTES_SEPARATOR: &str = "\n\n---\n";

/// Extract the raw notes from an issue body.
///
/// Returns the trimmed text after the first occurrence of `marker`, or the trimmed full body when
/// the marker is absent.
pub fn extract_notes<'a>(body: &'a str, marker: &str) -> &'a str {
    match body.split_once(marker) {
        Some((_, notes)) => notes.trim(),
        None => body.trim(),
    }
}

/// Compose the final issue body from the text to show and the notes it was derived from.
pub fn compose_body(head: &str, notes: &str, marker: &str, append_notes: bool) -> String {
    if !append_notes || notes.is_empty() {
        return head.to_string();
    }

    format!("{head}{NOTES_SEPARATOR}{marker}\n{notes}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "<!-- raw-notes -->";

    #[test]
    fn extracts_text_after_marker() {
        let body = "템플릿 안내문\n<!-- raw-notes -->\n  - 결제 페이지 느림\n- 캐시 확인  \n";

        assert_eq!(extract_notes(body, MARKER), "- 결제 페이지 느림\n- 캐시 확인");
    }

    #[test]
    fn uses_first_marker_occurrence() {
        let body = "a <!-- raw-notes --> b <!-- raw-notes --> c";

        assert_eq!(extract_notes(body, MARKER), "b <!-- raw-notes --> c");
    }

    #[test]
    fn falls_back_to_whole_trimmed_body() {
        assert_eq!(extract_notes("\n  just some notes \n", MARKER), "just some notes");
    }

    #[test]
    fn marker_with_nothing_after_it_is_empty() {
        assert_eq!(extract_notes("intro\n<!-- raw-notes -->\n   \n", MARKER), "");
        assert_eq!(extract_notes("   ", MARKER), "");
    }

    #[test]
    fn compose_appends_notes_below_separator() {
        let body = compose_body("## 배경\n\n정리됨", "- 원본", MARKER, true);

        assert_eq!(body, "## 배경\n\n정리됨\n\n---\n<!-- raw-notes -->\n- 원본");
    }

    #[test]
    fn compose_without_appending_returns_head() {
        assert_eq!(compose_body("head", "notes", MARKER, false), "head");
        assert_eq!(compose_body("head", "", MARKER, true), "head");
    }

    #[test]
    fn composed_body_yields_same_notes_again() {
        let notes = "- 첫째\n- 둘째";
        let body = compose_body("rewritten", notes, MARKER, true);

        assert_eq!(extract_notes(&body, MARKER), notes);
    }
}
