//! Candidate Ranking and Selection
//!
//! Applies the score threshold, orders candidates deterministically, and
//! flags ambiguity between the top two.

use crate::index::{SkillDescriptor, SkillIndex};
use crate::matching::language::detect;
use crate::matching::score::{score_skill, ScoreRecord};

/// A skill that survived exclusion and the threshold
#[derive(Debug, Clone)]
pub struct Ranked<'a> {
    pub skill: &'a SkillDescriptor,
    pub record: ScoreRecord,
}

/// The chosen skill, with the runner-up attached when the race was close
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub best: &'a SkillDescriptor,
    pub score: f64,
    /// Present only when `top1 - top2 < gap`
    pub runner_up: Option<(&'a SkillDescriptor, f64)>,
}

impl Selection<'_> {
    pub fn is_ambiguous(&self) -> bool {
        self.runner_up.is_some()
    }
}

/// Score every skill in the index against the prompt, dropping excluded and
/// below-threshold candidates. The result is sorted by weighted total
/// descending with ties broken by id ascending, so a fixed (prompt, index)
/// pair always ranks identically.
pub fn rank_skills<'a>(prompt: &str, index: &'a SkillIndex, threshold: f64) -> Vec<Ranked<'a>> {
    let lang = detect(prompt);

    let mut ranked: Vec<Ranked<'a>> = index
        .skills
        .iter()
        .map(|skill| Ranked {
            skill,
            record: score_skill(prompt, skill, lang),
        })
        .filter(|r| !r.record.excluded && r.record.total >= threshold)
        .collect();

    ranked.sort_by(|a, b| {
        b.record
            .total
            .total_cmp(&a.record.total)
            .then_with(|| a.skill.id.cmp(&b.skill.id))
    });

    ranked
}

/// Pick the winner from an already-ranked list. The top candidate always
/// wins, even on an exact tie; a close runner-up is carried along so the
/// injector can mention it.
pub fn select_best<'a>(ranked: &[Ranked<'a>], gap: f64) -> Option<Selection<'a>> {
    let top = ranked.first()?;

    let runner_up = ranked
        .get(1)
        .filter(|second| top.record.total - second.record.total < gap)
        .map(|second| (second.skill, second.record.total));

    Some(Selection {
        best: top.skill,
        score: top.record.total,
        runner_up,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{Category, LanguageLists};

    fn make_skill(id: &str, triggers: &[&str]) -> SkillDescriptor {
        SkillDescriptor {
            id: id.to_string(),
            name: id.to_string(),
            category: Category::Coding,
            short_description: String::new(),
            tags: vec![],
            trigger_keywords: LanguageLists {
                en: triggers.iter().map(|s| s.to_string()).collect(),
                zh: vec![],
            },
            intent_patterns: LanguageLists::default(),
            negative_keywords: LanguageLists::default(),
            body_path: format!("skills/{id}/SKILL.md"),
            body_hash: "hash".to_string(),
        }
    }

    fn make_index(skills: Vec<SkillDescriptor>) -> SkillIndex {
        SkillIndex {
            generated_at: 0,
            skills,
        }
    }

    #[test]
    fn test_rank_filters_below_threshold() {
        let index = make_index(vec![
            make_skill("hit", &["deploy"]),
            make_skill("miss", &["kubernetes"]),
        ]);
        let ranked = rank_skills("deploy the service", &index, 18.0);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].skill.id, "hit");
    }

    #[test]
    fn test_rank_orders_by_score_desc() {
        let index = make_index(vec![
            make_skill("one-hit", &["deploy"]),
            make_skill("two-hits", &["deploy", "rollback"]),
        ]);
        let ranked = rank_skills("deploy then rollback", &index, 18.0);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].skill.id, "two-hits");
        assert_eq!(ranked[1].skill.id, "one-hit");
    }

    #[test]
    fn test_rank_tie_breaks_by_id_ascending() {
        let index = make_index(vec![
            make_skill("zeta", &["deploy"]),
            make_skill("alpha", &["deploy"]),
        ]);
        let ranked = rank_skills("deploy it", &index, 18.0);
        assert_eq!(ranked[0].skill.id, "alpha");
        assert_eq!(ranked[1].skill.id, "zeta");
    }

    #[test]
    fn test_select_empty_is_none() {
        assert!(select_best(&[], 10.0).is_none());
    }

    #[test]
    fn test_select_single_candidate_not_ambiguous() {
        let index = make_index(vec![make_skill("only", &["deploy"])]);
        let ranked = rank_skills("deploy it", &index, 18.0);
        let selection = select_best(&ranked, 10.0).unwrap();
        assert_eq!(selection.best.id, "only");
        assert!(!selection.is_ambiguous());
    }

    #[test]
    fn test_select_close_scores_are_ambiguous() {
        let index = make_index(vec![
            make_skill("alpha", &["deploy"]),
            make_skill("beta", &["deploy"]),
        ]);
        let ranked = rank_skills("deploy it", &index, 18.0);
        let selection = select_best(&ranked, 10.0).unwrap();
        // exact tie: alpha wins by id, beta is carried as runner-up
        assert_eq!(selection.best.id, "alpha");
        let (runner, score) = selection.runner_up.unwrap();
        assert_eq!(runner.id, "beta");
        assert_eq!(score, selection.score);
    }

    #[test]
    fn test_select_gap_boundary_is_not_ambiguous() {
        let index = make_index(vec![
            make_skill("strong", &["deploy", "rollback"]),
            make_skill("weak", &["deploy"]),
        ]);
        // strong: 2 hits = 55 * 0.4 = 22; weak: 1 hit = 40 * 0.4 = 16
        let ranked = rank_skills("deploy then rollback", &index, 10.0);
        let selection = select_best(&ranked, 6.0).unwrap();
        // gap is exactly 6.0, which is not < 6.0
        assert!(!selection.is_ambiguous());

        let selection = select_best(&ranked, 6.1).unwrap();
        assert!(selection.is_ambiguous());
    }
}
