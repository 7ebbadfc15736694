//! Layered Scoring Engine
//!
//! Scores one skill descriptor against one prompt through five layers:
//!
//! - L1: negative-keyword hard exclusion (veto, no score)
//! - L2: trigger-keyword hits, weight 0.40
//! - L3: intent-pattern hits, weight 0.35
//! - L4: tag-set overlap ratio, weight 0.15
//! - L5: description-token overlap ratio, weight 0.10
//!
//! English phrases match on word boundaries, Chinese phrases by substring.
//! The detected language gates which lists are consulted: English prompts
//! read only the `en` lists; Chinese prompts read `zh` first and fall back
//! to `en` per level when the Chinese list had no hit; mixed prompts read
//! both and sum. Tag and description overlap ignore language entirely.

use std::collections::HashSet;

use regex::RegexBuilder;

use crate::index::{LanguageLists, SkillDescriptor};
use crate::matching::language::Lang;

/// Relative layer weights; the four must sum to 1.0.
pub const WEIGHT_TRIGGER: f64 = 0.40;
pub const WEIGHT_INTENT: f64 = 0.35;
pub const WEIGHT_TAGS: f64 = 0.15;
pub const WEIGHT_DESCRIPTION: f64 = 0.10;

/// Per-skill, per-prompt scoring outcome
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreRecord {
    /// L2 raw score in [0, 100]
    pub trigger: f64,
    /// L3 raw score in [0, 100]
    pub intent: f64,
    /// L4 raw score in [0, 100]
    pub tags: f64,
    /// L5 raw score in [0, 100]
    pub description: f64,
    /// Vetoed by a negative keyword
    pub excluded: bool,
    /// Weighted total in [0, 100]
    pub total: f64,
}

/// Score a single skill against a prompt under the given language gating.
pub fn score_skill(prompt: &str, skill: &SkillDescriptor, lang: Lang) -> ScoreRecord {
    let prompt_lower = prompt.to_lowercase();

    if is_excluded(&prompt_lower, &skill.negative_keywords, lang) {
        return ScoreRecord {
            excluded: true,
            ..ScoreRecord::default()
        };
    }

    let prompt_tokens = tokenize(prompt);

    let trigger = trigger_score(phrase_list_hits(&prompt_lower, &skill.trigger_keywords, lang));
    let intent = intent_score(pattern_list_hits(prompt, &skill.intent_patterns, lang));
    let tags = tag_score(&prompt_tokens, &skill.tags);
    let description = description_score(&prompt_tokens, &skill.short_description);

    let total = WEIGHT_TRIGGER * trigger
        + WEIGHT_INTENT * intent
        + WEIGHT_TAGS * tags
        + WEIGHT_DESCRIPTION * description;

    ScoreRecord {
        trigger,
        intent,
        tags,
        description,
        excluded: false,
        total,
    }
}

/// Split a text into distinct lowercase tokens on non-alphanumeric boundaries.
/// CJK ideographs count as alphanumeric, so a Chinese run stays one token.
pub fn tokenize(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase())
        .collect()
}

/// Count occurrences of a phrase in a lowercased haystack.
///
/// Chinese phrases match by plain substring. English phrases additionally
/// require word boundaries: the characters adjacent to the match must not
/// be ASCII alphanumerics, so "aria" does not fire inside "variable" while
/// CJK neighbors still count as boundaries in mixed-script prompts.
fn phrase_occurrences(haystack: &str, phrase: &str, chinese: bool) -> usize {
    if phrase.is_empty() {
        return 0;
    }
    if chinese {
        return haystack.match_indices(phrase).count();
    }

    haystack
        .match_indices(phrase)
        .filter(|(at, matched)| {
            let before_ok = haystack[..*at]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_ascii_alphanumeric());
            let after_ok = haystack[at + matched.len()..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_ascii_alphanumeric());
            before_ok && after_ok
        })
        .count()
}

/// Distinct phrases from one list that matched at least once.
fn distinct_hits(haystack: &str, phrases: &[String], chinese: bool) -> usize {
    phrases
        .iter()
        .filter(|p| phrase_occurrences(haystack, &p.to_lowercase(), chinese) > 0)
        .count()
}

/// Hit count over the gated phrase lists (L2-style: distinct phrases).
fn phrase_list_hits(prompt_lower: &str, lists: &LanguageLists, lang: Lang) -> usize {
    let en = |h: &str| distinct_hits(h, &lists.en, false);
    let zh = |h: &str| distinct_hits(h, &lists.zh, true);

    match lang {
        Lang::En => en(prompt_lower),
        Lang::Both => en(prompt_lower) + zh(prompt_lower),
        Lang::Zh => {
            let hits = zh(prompt_lower);
            if hits > 0 {
                hits
            } else {
                en(prompt_lower)
            }
        }
    }
}

/// Patterns from one list that matched at least once. Pattern sources that
/// fail to compile count as non-matching.
fn patterns_matching(prompt: &str, patterns: &[String]) -> usize {
    patterns
        .iter()
        .filter(|pat| {
            RegexBuilder::new(pat)
                .case_insensitive(true)
                .build()
                .map(|re| re.is_match(prompt))
                .unwrap_or(false)
        })
        .count()
}

/// Hit count over the gated intent-pattern lists.
fn pattern_list_hits(prompt: &str, lists: &LanguageLists, lang: Lang) -> usize {
    match lang {
        Lang::En => patterns_matching(prompt, &lists.en),
        Lang::Both => patterns_matching(prompt, &lists.en) + patterns_matching(prompt, &lists.zh),
        Lang::Zh => {
            let hits = patterns_matching(prompt, &lists.zh);
            if hits > 0 {
                hits
            } else {
                patterns_matching(prompt, &lists.en)
            }
        }
    }
}

/// L1: multi-word phrase hits and total single-word occurrences for one list.
fn negative_counts(prompt_lower: &str, phrases: &[String], chinese: bool) -> (usize, usize) {
    let mut multi_hits = 0;
    let mut single_occurrences = 0;

    for phrase in phrases {
        let lower = phrase.to_lowercase();
        let n = phrase_occurrences(prompt_lower, &lower, chinese);
        if n == 0 {
            continue;
        }
        if lower.split_whitespace().count() >= 2 {
            multi_hits += 1;
        } else {
            single_occurrences += n;
        }
    }

    (multi_hits, single_occurrences)
}

/// L1 verdict: one multi-word hit excludes outright; single-word negatives
/// need two occurrences in total (one phrase twice, or two phrases once
/// each) so frequent lone tokens do not over-filter.
fn is_excluded(prompt_lower: &str, lists: &LanguageLists, lang: Lang) -> bool {
    let (multi, single) = match lang {
        Lang::En => negative_counts(prompt_lower, &lists.en, false),
        Lang::Both => {
            let (m_en, s_en) = negative_counts(prompt_lower, &lists.en, false);
            let (m_zh, s_zh) = negative_counts(prompt_lower, &lists.zh, true);
            (m_en + m_zh, s_en + s_zh)
        }
        Lang::Zh => {
            let (m_zh, s_zh) = negative_counts(prompt_lower, &lists.zh, true);
            if m_zh + s_zh > 0 {
                (m_zh, s_zh)
            } else {
                negative_counts(prompt_lower, &lists.en, false)
            }
        }
    };

    multi >= 1 || single >= 2
}

/// L2: 1 hit = 40, each additional +15, capped at 100.
fn trigger_score(hits: usize) -> f64 {
    if hits == 0 {
        return 0.0;
    }
    (40.0 + 15.0 * (hits as f64 - 1.0)).min(100.0)
}

/// L3: 1 hit = 50, each additional +35, capped at 100. A single intent
/// pattern is worth more than a single trigger phrase.
fn intent_score(hits: usize) -> f64 {
    if hits == 0 {
        return 0.0;
    }
    (50.0 + 35.0 * (hits as f64 - 1.0)).min(100.0)
}

/// L4: overlap ratio between prompt tokens and the tag set.
fn tag_score(prompt_tokens: &HashSet<String>, tags: &[String]) -> f64 {
    let tag_set: HashSet<String> = tags.iter().map(|t| t.to_lowercase()).collect();
    if tag_set.is_empty() {
        return 0.0;
    }
    let overlap = tag_set.iter().filter(|t| prompt_tokens.contains(*t)).count();
    (100.0 * overlap as f64 / tag_set.len() as f64).min(100.0)
}

/// Function words excluded from description overlap, in both languages.
/// The list is fixed: scoring must stay stable across releases.
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "can", "shall", "to",
    "of", "in", "for", "on", "with", "at", "by", "from", "as", "into", "through", "during",
    "before", "after", "and", "but", "or", "nor", "not", "so", "yet", "both", "either", "neither",
    "each", "every", "all", "any", "few", "more", "most", "other", "some", "such", "no", "only",
    "own", "same", "than", "too", "very", "just", "that", "this", "it", "its", "的", "了", "是",
    "在", "我", "你", "他", "她", "它", "们", "这", "那", "和", "与", "或", "请", "把", "将",
    "被", "着", "过", "吗", "呢",
];

/// L5: overlap ratio between prompt tokens and description tokens, with
/// stop words removed from the description side.
fn description_score(prompt_tokens: &HashSet<String>, description: &str) -> f64 {
    let desc_tokens: HashSet<String> = tokenize(description)
        .into_iter()
        .filter(|t| !STOP_WORDS.contains(&t.as_str()))
        .collect();
    if desc_tokens.is_empty() {
        return 0.0;
    }
    let overlap = desc_tokens
        .iter()
        .filter(|t| prompt_tokens.contains(*t))
        .count();
    (100.0 * overlap as f64 / desc_tokens.len() as f64).min(100.0)
}
