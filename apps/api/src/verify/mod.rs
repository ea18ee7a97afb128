//! Skill Matcher — fuzzy overlap between self-reported resume skills and the
//! evidence set mined from GitHub.
//!
//! The match rule is deliberately loose: a skill matches if its normalized
//! form equals, is contained in, or contains any evidence name. That makes
//! "Java" match "JavaScript" — a known false-positive source, kept because
//! existing scores depend on it. Do not tighten without a migration plan.

use std::path::Path;

use tracing::info;

use crate::errors::PipelineError;
use crate::models::evidence::{GithubAnalysis, SkillVerification};

/// Lowercase + trim, the shared comparison form.
fn normalize(text: &str) -> String {
    text.to_lowercase().trim().to_string()
}

/// Outcome of one matching pass.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// Matched / total self-reported, in [0.0, 1.0]. 0.0 for an empty input
    /// list — never a division fault.
    pub ratio: f64,
    /// Corroborated skills, original casing, source order, each at most once
    /// regardless of how many evidence names it satisfied.
    pub present_skills: Vec<String>,
    pub count: usize,
}

/// Compares self-reported skills against evidence names with the three-way
/// substring rule.
pub fn match_skills(resume_skills: &[String], evidence_skills: &[String]) -> MatchOutcome {
    let evidence_norm: Vec<String> = evidence_skills.iter().map(|s| normalize(s)).collect();

    let mut present_skills = Vec::new();
    for skill in resume_skills {
        let skill_norm = normalize(skill);
        let matched = evidence_norm
            .iter()
            .any(|g| skill_norm == *g || g.contains(&skill_norm) || skill_norm.contains(g));
        if matched {
            present_skills.push(skill.clone());
        }
    }

    let ratio = if resume_skills.is_empty() {
        0.0
    } else {
        present_skills.len() as f64 / resume_skills.len() as f64
    };

    MatchOutcome {
        ratio,
        count: present_skills.len(),
        present_skills,
    }
}

/// Flattened, deduplicated union of every repository's language list,
/// first-seen order.
pub fn aggregate_evidence_skills(analysis: &GithubAnalysis) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut skills = Vec::new();
    for repo in &analysis.verified_repos {
        for language in &repo.languages {
            if seen.insert(language.clone()) {
                skills.push(language.clone());
            }
        }
    }
    skills
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Runs the matcher over a profile's skills and an evidence analysis, and
/// writes `skill_verification.json` (on-disk field names are a contract).
pub fn verify_to_file(
    resume_skills: &[String],
    analysis: &GithubAnalysis,
    out_path: &Path,
) -> Result<SkillVerification, PipelineError> {
    let github_skills = aggregate_evidence_skills(analysis);
    let outcome = match_skills(resume_skills, &github_skills);

    let verification = SkillVerification {
        resume_skills: resume_skills.to_vec(),
        github_skills,
        percentage_score: round2(outcome.ratio * 100.0),
        present_skills: outcome.present_skills,
        count_skills: outcome.count,
    };

    std::fs::write(out_path, serde_json::to_string_pretty(&verification)?)?;
    info!(
        score = verification.percentage_score,
        matched = verification.count_skills,
        "Skill verification saved to {}",
        out_path.display()
    );
    Ok(verification)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evidence::RepoEvidence;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn repo(languages: &[&str]) -> RepoEvidence {
        RepoEvidence {
            repo_name: "engine".to_string(),
            owner: "ada".to_string(),
            languages: skills(languages),
            forks: 0,
            stars: 0,
            commit_count: 0,
            readme_content: String::new(),
        }
    }

    #[test]
    fn test_spec_example_python_react_vs_python_javascript() {
        let outcome = match_skills(&skills(&["Python", "React"]), &skills(&["python", "javascript"]));
        assert_eq!(outcome.ratio, 0.5);
        assert_eq!(outcome.present_skills, skills(&["Python"]));
        assert_eq!(outcome.count, 1);
    }

    #[test]
    fn test_empty_resume_skills_gives_zero_ratio() {
        let outcome = match_skills(&[], &skills(&["python", "rust"]));
        assert_eq!(outcome.ratio, 0.0);
        assert!(outcome.present_skills.is_empty());
    }

    #[test]
    fn test_ratio_is_bounded() {
        let outcome = match_skills(
            &skills(&["Python", "Rust", "Go"]),
            &skills(&["python", "rust", "go"]),
        );
        assert!(outcome.ratio >= 0.0 && outcome.ratio <= 1.0);
        assert_eq!(outcome.ratio, 1.0);
    }

    #[test]
    fn test_java_overmatches_javascript_by_design() {
        let outcome = match_skills(&skills(&["Java"]), &skills(&["JavaScript"]));
        assert_eq!(outcome.present_skills, skills(&["Java"]));
    }

    #[test]
    fn test_skill_listed_once_even_with_multiple_evidence_matches() {
        let outcome = match_skills(
            &skills(&["Script"]),
            &skills(&["JavaScript", "TypeScript", "script"]),
        );
        assert_eq!(outcome.present_skills, skills(&["Script"]));
        assert_eq!(outcome.count, 1);
    }

    #[test]
    fn test_matching_preserves_original_casing_and_order() {
        let outcome = match_skills(
            &skills(&["ReAcT", "Python", "Cobol"]),
            &skills(&["react", "python"]),
        );
        assert_eq!(outcome.present_skills, skills(&["ReAcT", "Python"]));
    }

    #[test]
    fn test_normalization_trims_whitespace() {
        let outcome = match_skills(&skills(&["  Rust  "]), &skills(&["rust"]));
        assert_eq!(outcome.count, 1);
    }

    #[test]
    fn test_aggregate_dedups_union_first_seen_order() {
        let analysis = GithubAnalysis {
            github_username: Some("ada".to_string()),
            total_repositories: 2,
            verified_repos: vec![repo(&["Python", "Docker"]), repo(&["Docker", "Rust"])],
        };
        assert_eq!(
            aggregate_evidence_skills(&analysis),
            skills(&["Python", "Docker", "Rust"])
        );
    }

    #[test]
    fn test_percentage_is_rounded_to_two_decimals() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("skill_verification.json");
        let analysis = GithubAnalysis {
            github_username: Some("ada".to_string()),
            total_repositories: 1,
            verified_repos: vec![repo(&["python"])],
        };
        // 1 of 3 matched → 33.333...% → 33.33
        let verification = verify_to_file(
            &skills(&["Python", "Cobol", "Fortran"]),
            &analysis,
            &out,
        )
        .unwrap();
        assert_eq!(verification.percentage_score, 33.33);
        assert_eq!(verification.count_skills, 1);

        // And the on-disk copy round-trips with the contract names intact.
        let reread: SkillVerification =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(reread.percentage_score, 33.33);
        assert_eq!(reread.present_skills, skills(&["Python"]));
    }

    #[test]
    fn test_unresolved_analysis_yields_zero_score() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("skill_verification.json");
        let verification = verify_to_file(
            &skills(&["Python"]),
            &GithubAnalysis::unresolved(),
            &out,
        )
        .unwrap();
        assert_eq!(verification.percentage_score, 0.0);
        assert!(verification.github_skills.is_empty());
    }
}
