//! Skill Index
//!
//! Wire-format types for the registry index and the single parsing boundary
//! that turns the loose on-disk/wire representation into validated records.
//! Past this boundary every descriptor is structurally complete: optional
//! lists are present as empty vectors, never as absent-means-wildcard.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{RouterError, RouterResult};

/// Per-language phrase or pattern lists attached to a descriptor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageLists {
    #[serde(default)]
    pub en: Vec<String>,
    #[serde(default)]
    pub zh: Vec<String>,
}

/// Closed category set; unknown wire values survive parsing as `Other`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Backend,
    Frontend,
    Testing,
    Security,
    Devops,
    DataAi,
    Content,
    Coding,
    #[default]
    #[serde(other)]
    Other,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Backend => "backend",
            Category::Frontend => "frontend",
            Category::Testing => "testing",
            Category::Security => "security",
            Category::Devops => "devops",
            Category::DataAi => "data-ai",
            Category::Content => "content",
            Category::Coding => "coding",
            Category::Other => "other",
        };
        f.write_str(label)
    }
}

/// A validated skill descriptor (one index entry, without the body)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDescriptor {
    /// Stable identifier in lowercase-hyphen form
    pub id: String,
    /// Human display name
    pub name: String,
    pub category: Category,
    pub short_description: String,
    pub tags: Vec<String>,
    pub trigger_keywords: LanguageLists,
    pub intent_patterns: LanguageLists,
    pub negative_keywords: LanguageLists,
    /// Registry locator of the full instruction document
    pub body_path: String,
    /// SHA-256 hex of the body, used to invalidate cached copies
    pub body_hash: String,
}

/// The catalog of all skill descriptors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillIndex {
    pub generated_at: i64,
    pub skills: Vec<SkillDescriptor>,
}

/// Loose wire form of an index entry; anything may be missing
#[derive(Debug, Deserialize)]
struct RawSkill {
    id: Option<String>,
    name: Option<String>,
    #[serde(default)]
    category: Category,
    #[serde(default)]
    short_description: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    trigger_keywords: LanguageLists,
    #[serde(default)]
    intent_patterns: LanguageLists,
    #[serde(default)]
    negative_keywords: LanguageLists,
    body_path: Option<String>,
    body_hash: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawIndex {
    #[serde(default)]
    generated_at: i64,
    #[serde(default)]
    skills: Vec<RawSkill>,
}

/// Parse an index document from its wire form.
///
/// Entries missing `id`, `name`, `body_path`, or `body_hash` are skipped
/// with a warning; duplicate ids keep the first occurrence. A document that
/// is not JSON at all is rejected as malformed.
pub fn parse_index(text: &str) -> RouterResult<SkillIndex> {
    let raw: RawIndex =
        serde_json::from_str(text).map_err(|e| RouterError::malformed(format!("index: {e}")))?;

    let mut skills = Vec::with_capacity(raw.skills.len());
    let mut seen: HashSet<String> = HashSet::new();

    for (pos, entry) in raw.skills.into_iter().enumerate() {
        let Some(skill) = validate_entry(entry) else {
            tracing::warn!("skipping incomplete index entry at position {pos}");
            continue;
        };
        if !seen.insert(skill.id.clone()) {
            tracing::warn!("duplicate skill id '{}', keeping the first", skill.id);
            continue;
        }
        skills.push(skill);
    }

    Ok(SkillIndex {
        generated_at: raw.generated_at,
        skills,
    })
}

fn validate_entry(raw: RawSkill) -> Option<SkillDescriptor> {
    let id = raw.id.filter(|s| !s.trim().is_empty())?;
    let name = raw.name.filter(|s| !s.trim().is_empty())?;
    let body_path = raw.body_path.filter(|s| !s.trim().is_empty())?;
    let body_hash = raw.body_hash.filter(|s| !s.trim().is_empty())?;

    Some(SkillDescriptor {
        id,
        name,
        category: raw.category,
        short_description: raw.short_description,
        tags: raw.tags,
        trigger_keywords: raw.trigger_keywords,
        intent_patterns: raw.intent_patterns,
        negative_keywords: raw.negative_keywords,
        body_path,
        body_hash,
    })
}

/// Compute the SHA-256 of some content, returning the full hex string.
pub fn sha256_hex(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex() {
        let hash = sha256_hex(b"hello world");
        assert_eq!(hash.len(), 64);
        assert_eq!(
            hash,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_parse_minimal_entry() {
        let index = parse_index(
            r#"{
                "generated_at": 1722500000,
                "skills": [{
                    "id": "code-review",
                    "name": "Code Review",
                    "category": "coding",
                    "body_path": "skills/code-review/SKILL.md",
                    "body_hash": "abc123"
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(index.generated_at, 1722500000);
        assert_eq!(index.skills.len(), 1);
        let skill = &index.skills[0];
        assert_eq!(skill.id, "code-review");
        assert_eq!(skill.category, Category::Coding);
        // Missing optional sets come back empty, never absent
        assert!(skill.tags.is_empty());
        assert!(skill.trigger_keywords.en.is_empty());
        assert!(skill.trigger_keywords.zh.is_empty());
        assert!(skill.negative_keywords.en.is_empty());
    }

    #[test]
    fn test_parse_skips_incomplete_entries() {
        let index = parse_index(
            r#"{
                "skills": [
                    {"id": "no-name", "body_path": "x", "body_hash": "y"},
                    {"id": "ok", "name": "Ok", "body_path": "x", "body_hash": "y"},
                    {"id": "no-hash", "name": "No Hash", "body_path": "x"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(index.skills.len(), 1);
        assert_eq!(index.skills[0].id, "ok");
    }

    #[test]
    fn test_parse_duplicate_id_keeps_first() {
        let index = parse_index(
            r#"{
                "skills": [
                    {"id": "dup", "name": "First", "body_path": "a", "body_hash": "h1"},
                    {"id": "dup", "name": "Second", "body_path": "b", "body_hash": "h2"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(index.skills.len(), 1);
        assert_eq!(index.skills[0].name, "First");
    }

    #[test]
    fn test_parse_unknown_category_survives() {
        let index = parse_index(
            r#"{
                "skills": [{
                    "id": "x", "name": "X", "category": "quantum",
                    "body_path": "p", "body_hash": "h"
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(index.skills[0].category, Category::Other);
        assert_eq!(index.skills[0].category.to_string(), "other");
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let result = parse_index("not json at all");
        assert!(matches!(result, Err(RouterError::Malformed(_))));
    }

    #[test]
    fn test_category_display_kebab_case() {
        assert_eq!(Category::DataAi.to_string(), "data-ai");
        assert_eq!(Category::Coding.to_string(), "coding");
    }

    #[test]
    fn test_index_roundtrip_through_serde() {
        let index = parse_index(
            r#"{
                "generated_at": 7,
                "skills": [{
                    "id": "a", "name": "A", "category": "testing",
                    "tags": ["unit"],
                    "trigger_keywords": {"en": ["write tests"], "zh": ["写测试"]},
                    "body_path": "skills/a/SKILL.md", "body_hash": "h"
                }]
            }"#,
        )
        .unwrap();

        let text = serde_json::to_string(&index).unwrap();
        let back: SkillIndex = serde_json::from_str(&text).unwrap();
        assert_eq!(back.generated_at, 7);
        assert_eq!(back.skills[0].trigger_keywords.zh, vec!["写测试"]);
    }
}
