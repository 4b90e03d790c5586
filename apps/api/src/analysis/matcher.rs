//! Skill Matcher: pluggable, trait-based matcher that compares a user's skill
//! list with a job role's required skills.
//!
//! Default: `ContainmentMatcher` (case-insensitive substring containment in
//! either direction). Opt-in: `TokenMatcher` (whole-token runs, so "Java" no
//! longer matches "JavaScript").
//!
//! `AppState` holds an `Arc<dyn SkillMatcher>`, chosen at startup via
//! `SKILL_MATCH_MODE`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::stats::rounded_percentage;

/// Proficiency every required skill is measured against. A matched skill is
/// reported at this level regardless of the user's real proficiency.
pub const REQUIRED_LEVEL: i32 = 80;

// ────────────────────────────────────────────────────────────────────────────
// Output data models (shared across all matcher backends)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub skill: String,
    pub is_matched: bool,
    pub current_level: i32,
    pub required_level: i32,
    pub gap: i32,
}

impl SkillMatch {
    fn matched(skill: &str) -> Self {
        SkillMatch {
            skill: skill.to_string(),
            is_matched: true,
            current_level: REQUIRED_LEVEL,
            required_level: REQUIRED_LEVEL,
            gap: 0,
        }
    }

    fn missing(skill: &str) -> Self {
        SkillMatch {
            skill: skill.to_string(),
            is_matched: false,
            current_level: 0,
            required_level: REQUIRED_LEVEL,
            gap: REQUIRED_LEVEL,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillMatchReport {
    /// One entry per required skill, in the role's order.
    pub per_skill: Vec<SkillMatch>,
    pub match_percentage: i32, // 0 – 100
    pub matcher_backend: String,
}

impl SkillMatchReport {
    pub fn matched_skills(&self) -> Vec<String> {
        self.per_skill
            .iter()
            .filter(|s| s.is_matched)
            .map(|s| s.skill.clone())
            .collect()
    }

    pub fn missing_skills(&self) -> Vec<String> {
        self.per_skill
            .iter()
            .filter(|s| !s.is_matched)
            .map(|s| s.skill.clone())
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement `matches` to swap the per-pair rule; the report shape, the
/// fixed levels and the percentage formula are shared by every backend.
pub trait SkillMatcher: Send + Sync {
    fn backend(&self) -> &'static str;

    /// Whether one user skill satisfies one required skill.
    fn matches(&self, user_skill: &str, required_skill: &str) -> bool;

    fn match_skills(&self, user_skills: &[String], required_skills: &[String]) -> SkillMatchReport {
        compute_match(self, user_skills, required_skills)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    #[default]
    Containment,
    Token,
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "containment" => Ok(MatchMode::Containment),
            "token" => Ok(MatchMode::Token),
            other => Err(format!("unknown match mode '{other}' (expected containment|token)")),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Containment => f.write_str("containment"),
            MatchMode::Token => f.write_str("token"),
        }
    }
}

pub fn matcher_for(mode: MatchMode) -> Arc<dyn SkillMatcher> {
    match mode {
        MatchMode::Containment => Arc::new(ContainmentMatcher),
        MatchMode::Token => Arc::new(TokenMatcher),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ContainmentMatcher: default
// ────────────────────────────────────────────────────────────────────────────

/// Matches when either skill, lowercased, is a substring of the other.
///
/// Known false positives are kept on purpose for compatibility with stored
/// analyses: "Java" matches "JavaScript", "R" matches "React".
pub struct ContainmentMatcher;

impl SkillMatcher for ContainmentMatcher {
    fn backend(&self) -> &'static str {
        "containment"
    }

    fn matches(&self, user_skill: &str, required_skill: &str) -> bool {
        let user = user_skill.to_lowercase();
        let required = required_skill.to_lowercase();
        user.contains(&required) || required.contains(&user)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// TokenMatcher: token-aware variant
// ────────────────────────────────────────────────────────────────────────────

/// Matches when the token sequence of one skill appears as a contiguous run in
/// the other. "Machine Learning" matches "machine learning engineering";
/// "Java" does not match "JavaScript".
pub struct TokenMatcher;

impl SkillMatcher for TokenMatcher {
    fn backend(&self) -> &'static str {
        "token"
    }

    fn matches(&self, user_skill: &str, required_skill: &str) -> bool {
        let user = tokenize(user_skill);
        let required = tokenize(required_skill);
        contains_run(&user, &required) || contains_run(&required, &user)
    }
}

/// Lowercased alphanumeric tokens; `+` and `#` stay attached so "C++" and
/// "C#" survive as distinct tokens.
fn tokenize(skill: &str) -> Vec<String> {
    skill
        .to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

fn contains_run(haystack: &[String], needle: &[String]) -> bool {
    !needle.is_empty()
        && needle.len() <= haystack.len()
        && haystack.windows(needle.len()).any(|w| w == needle)
}

// ────────────────────────────────────────────────────────────────────────────
// Shared match algorithm
// ────────────────────────────────────────────────────────────────────────────

fn compute_match<M: SkillMatcher + ?Sized>(
    matcher: &M,
    user_skills: &[String],
    required_skills: &[String],
) -> SkillMatchReport {
    let per_skill: Vec<SkillMatch> = required_skills
        .iter()
        .map(|required| {
            let has_skill = user_skills
                .iter()
                .any(|user| matcher.matches(user, required));
            if has_skill {
                SkillMatch::matched(required)
            } else {
                SkillMatch::missing(required)
            }
        })
        .collect();

    let matched = per_skill.iter().filter(|s| s.is_matched).count();

    SkillMatchReport {
        match_percentage: rounded_percentage(matched, required_skills.len()),
        per_skill,
        matcher_backend: matcher.backend().to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
