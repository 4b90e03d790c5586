//! Job recommendations: scores every active role against the user's skills
//! with the configured matcher.
//!
//! Required skills drive the percentage. Preferred skills never change the
//! score; matched ones are only mentioned in the reason.

use serde::Serialize;
use uuid::Uuid;

use crate::analysis::matcher::SkillMatcher;
use crate::models::job::JobRole;

/// Score of one role for one user, ready to be stored.
#[derive(Debug, Clone, Serialize)]
pub struct RoleScore {
    pub job_role_id: Uuid,
    pub match_percentage: i32,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub matching_preferred: Vec<String>,
    pub reason: String,
}

pub fn score_role(matcher: &dyn SkillMatcher, user_skills: &[String], role: &JobRole) -> RoleScore {
    let required = matcher.match_skills(user_skills, &role.required_skills);
    let preferred = matcher.match_skills(user_skills, &role.preferred_skills);

    let matching_skills = required.matched_skills();
    let missing_skills = required.missing_skills();
    let matching_preferred = preferred.matched_skills();
    let reason = build_reason(
        required.match_percentage,
        &missing_skills,
        &matching_preferred,
    );

    RoleScore {
        job_role_id: role.id,
        match_percentage: required.match_percentage,
        matching_skills,
        missing_skills,
        matching_preferred,
        reason,
    }
}

/// Scores every role, best match first. Ties keep the input order.
pub fn rank_roles(
    matcher: &dyn SkillMatcher,
    user_skills: &[String],
    roles: &[JobRole],
) -> Vec<RoleScore> {
    let mut scores: Vec<RoleScore> = roles
        .iter()
        .map(|role| score_role(matcher, user_skills, role))
        .collect();
    scores.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
    scores
}

/// Builds a human-readable reason string from score and gaps.
fn build_reason(score: i32, missing: &[String], preferred: &[String]) -> String {
    let top_gaps: Vec<&str> = missing.iter().take(3).map(String::as_str).collect();

    let mut reason = if score >= 80 {
        format!("Strong match ({score}%). You cover the key required skills.")
    } else if score >= 50 {
        format!(
            "Good match ({score}%). Consider developing: {}.",
            top_gaps.join(", ")
        )
    } else if top_gaps.is_empty() {
        "This role lists no required skills.".to_string()
    } else {
        format!(
            "Stretch role ({score}%). Significant gaps: {}.",
            top_gaps.join(", ")
        )
    };

    if !preferred.is_empty() {
        reason.push_str(&format!(" Bonus skills you have: {}.", preferred.join(", ")));
    }
    reason
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::matcher::{ContainmentMatcher, TokenMatcher};

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn make_role(title: &str, required: &[&str], preferred: &[&str]) -> JobRole {
        JobRole {
            id: Uuid::new_v4(),
            title: title.to_string(),
            company: None,
            description: None,
            required_skills: skills(required),
            preferred_skills: skills(preferred),
            location: None,
            salary_range: None,
            experience_level: None,
            is_active: true,
        }
    }

    #[test]
    fn test_preferred_skills_do_not_change_score() {
        let role = make_role("Frontend Developer", &["React", "TypeScript"], &["CSS"]);
        let score = score_role(&ContainmentMatcher, &skills(&["React", "CSS"]), &role);
        assert_eq!(score.match_percentage, 50);
        assert_eq!(score.matching_skills, skills(&["React"]));
        assert_eq!(score.missing_skills, skills(&["TypeScript"]));
        assert_eq!(score.matching_preferred, skills(&["CSS"]));
        assert!(score.reason.contains("CSS"));
    }

    #[test]
    fn test_rank_orders_by_match_descending() {
        let roles = vec![
            make_role("Backend", &["Go", "Kafka"], &[]),
            make_role("Full Stack", &["Node.js", "React", "PostgreSQL"], &[]),
            make_role("Frontend", &["React"], &[]),
        ];
        let ranked = rank_roles(&ContainmentMatcher, &skills(&["React"]), &roles);
        let order: Vec<i32> = ranked.iter().map(|s| s.match_percentage).collect();
        assert_eq!(order, vec![100, 33, 0]);
        assert_eq!(ranked[0].job_role_id, roles[2].id);
    }

    #[test]
    fn test_rank_respects_matcher_backend() {
        let roles = vec![make_role("Java Developer", &["Java"], &[])];
        let containment = rank_roles(&ContainmentMatcher, &skills(&["JavaScript"]), &roles);
        let token = rank_roles(&TokenMatcher, &skills(&["JavaScript"]), &roles);
        assert_eq!(containment[0].match_percentage, 100);
        assert_eq!(token[0].match_percentage, 0);
    }

    #[test]
    fn test_reason_strong() {
        assert!(build_reason(85, &[], &[]).starts_with("Strong match"));
    }

    #[test]
    fn test_reason_lists_top_three_gaps() {
        let reason = build_reason(20, &skills(&["A", "B", "C", "D"]), &[]);
        assert!(reason.contains("A, B, C"));
        assert!(!reason.contains('D'));
    }

    #[test]
    fn test_reason_for_role_without_requirements() {
        assert_eq!(build_reason(0, &[], &[]), "This role lists no required skills.");
    }
}
