//! Prompt Matching
//!
//! Pure text matching between a prompt and the skill index. No network, no
//! disk: for a fixed (prompt, index) pair the outcome is byte-identical
//! across runs.
//!
//! Architecture:
//! - language.rs: English/Chinese/mixed prompt classification
//! - score.rs:    five-layer scoring with negative-keyword veto
//! - select.rs:   threshold, deterministic ordering, ambiguity gap

pub mod language;
pub mod score;
pub mod select;

pub use language::{detect, Lang};
pub use score::{score_skill, tokenize, ScoreRecord};
pub use select::{rank_skills, select_best, Ranked, Selection};
