//! Skill Injection
//!
//! Formats the winning skill into the system-message text the host shows
//! the assistant, and bounds the body size without ever splitting a UTF-8
//! code point.

use crate::index::SkillDescriptor;

/// Cut a body down to at most `max_bytes`, flooring to a char boundary so
/// multi-byte sequences stay intact.
pub fn truncate_utf8(body: &str, max_bytes: usize) -> &str {
    if body.len() <= max_bytes {
        return body;
    }
    let mut end = max_bytes;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

/// Build the injected system message. Scores render as truncated integers.
/// The runner-up note appears only for ambiguous results.
pub fn format_injection(
    skill: &SkillDescriptor,
    score: f64,
    body: &str,
    runner_up: Option<(&SkillDescriptor, f64)>,
) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "[skill-router] Automatically loaded skill: **{}** (category: {}, score: {})",
        skill.name, skill.category, score as u32
    ));

    if let Some((other, other_score)) = runner_up {
        lines.push(format!(
            "[skill-router] Note: also considered {} (score: {}). \
             If the loaded skill seems wrong, the user may have meant the other one.",
            other.name, other_score as u32
        ));
    }

    lines.push(String::new());
    lines.push("--- BEGIN SKILL INSTRUCTIONS ---".to_string());
    lines.push(body.to_string());
    lines.push("--- END SKILL INSTRUCTIONS ---".to_string());
    lines.push(String::new());
    lines.push(
        "[skill-router] Apply these skill instructions to the user's request.\n\
         If the skill doesn't seem relevant, ignore these instructions and respond normally."
            .to_string(),
    );

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{Category, LanguageLists};

    fn make_skill(id: &str, name: &str, category: Category) -> SkillDescriptor {
        SkillDescriptor {
            id: id.to_string(),
            name: name.to_string(),
            category,
            short_description: String::new(),
            tags: vec![],
            trigger_keywords: LanguageLists::default(),
            intent_patterns: LanguageLists::default(),
            negative_keywords: LanguageLists::default(),
            body_path: format!("skills/{id}/SKILL.md"),
            body_hash: "hash".to_string(),
        }
    }

    #[test]
    fn test_truncate_short_body_untouched() {
        assert_eq!(truncate_utf8("hello", 100), "hello");
        assert_eq!(truncate_utf8("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_utf8("hello world", 5), "hello");
    }

    #[test]
    fn test_truncate_never_splits_a_code_point() {
        // each ideograph is 3 bytes
        let body = "审查代码质量";
        let cut = truncate_utf8(body, 7);
        assert_eq!(cut, "审查");
        assert!(cut.len() <= 7);

        let cut = truncate_utf8(body, 9);
        assert_eq!(cut, "审查代");
    }

    #[test]
    fn test_format_plain_match() {
        let skill = make_skill("code-review", "Code Review", Category::Coding);
        let text = format_injection(&skill, 52.36, "Review carefully.", None);

        assert!(text.contains(
            "[skill-router] Automatically loaded skill: **Code Review** (category: coding, score: 52)"
        ));
        assert!(text.contains("--- BEGIN SKILL INSTRUCTIONS ---"));
        assert!(text.contains("Review carefully."));
        assert!(text.contains("--- END SKILL INSTRUCTIONS ---"));
        assert!(text.contains("Apply these skill instructions"));
        assert!(!text.contains("Note: also considered"));
    }

    #[test]
    fn test_format_ambiguous_match_mentions_runner_up() {
        let skill = make_skill("unit-testing", "Unit Testing", Category::Testing);
        let other = make_skill("tdd", "TDD", Category::Testing);
        let text = format_injection(&skill, 36.8, "body", Some((&other, 34.9)));

        assert!(text.contains("**Unit Testing**"));
        assert!(text.contains("[skill-router] Note: also considered TDD (score: 34)."));
        assert!(text.contains("the user may have meant the other one"));
    }

    #[test]
    fn test_scores_truncate_not_round() {
        let skill = make_skill("x", "X", Category::Other);
        let text = format_injection(&skill, 59.94, "body", None);
        assert!(text.contains("score: 59)"));
    }
}
