//! Prompt template and fixed messages written to the issue.

/// Placeholder replaced with the issue title.
pub const TITLE_PLACEHOLDER: &str = "{title}";

/// Placeholder replaced with the extracted notes.
pub const NOTES_PLACEHOLDER: &str = "{notes}";

/// Default prompt template sent to the model as a single user message.
pub const ISSUE_PROMPT_TEMPLATE: &str = r#####"당신은 소프트웨어 팀의 이슈 정리 담당자입니다.
아래는 GitHub 이슈의 제목과 작성자가 급하게 남긴 메모입니다.
메모를 바탕으로 팀원이 바로 이해하고 작업할 수 있는 이슈 본문을 GitHub 마크다운으로 작성해 주세요.

## 작성 규칙

- 다음 섹션을 순서대로 포함합니다: `## 배경`, `## 작업 내용`, `## 완료 조건`.
- `## 완료 조건`은 `- [ ]` 체크리스트로 작성합니다.
- 메모에 없는 사실이나 수치는 지어내지 않습니다. 불분명한 부분은 `## 확인 필요` 섹션에 질문으로 남깁니다.
- 제목을 본문에 반복하지 않습니다.
- 본문만 출력하고, 인사말이나 설명은 덧붙이지 않습니다.

## 제목

{title}

## 메모

{notes}
"#####;

/// Body written when the issue has no notes to work from.
pub const EMPTY_NOTES_MESSAGE: &str = "📝 정리할 메모가 비어 있어 자동 정리를 건너뛰었습니다.\n\n이슈 본문에 메모를 작성한 뒤 워크플로를 다시 실행해 주세요.";

/// Body written when the model call is refused for quota or rate-limit reasons.
pub const QUOTA_FALLBACK_MESSAGE: &str = "⚠️ OpenAI API 사용 한도를 초과하여 이슈 본문을 자동으로 정리하지 못했습니다.\n\n결제 및 사용량 설정을 확인한 뒤 워크플로를 다시 실행해 주세요.";

/// Comment posted after a successful rewrite.
pub const REWRITE_COMMENT: &str = "🤖 작성하신 메모를 바탕으로 이슈 본문을 정리했습니다. 원본 메모는 본문 하단에 보존되어 있습니다.";

/// Build the model prompt by substituting the title and notes into the template.
pub fn build_prompt(template: &str, title: &str, notes: &str) -> String {
    // Notes go last so a `{title}` typed inside them survives untouched.
    template.replace(TITLE_PLACEHOLDER, title.trim()).replace(NOTES_PLACEHOLDER, notes)
}
