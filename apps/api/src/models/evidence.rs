use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Evidence gathered for one discovered GitHub repository.
///
/// `languages` starts as the keys of the repository language map and is then
/// augmented with taxonomy terms mined from the README — detected keywords
/// are deliberately conflated with observed languages (that merge is what the
/// matcher consumes). Popularity counters default to 0 on fetch failure;
/// `readme_content` holds an inline error placeholder when unfetchable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoEvidence {
    pub repo_name: String,
    pub owner: String,
    pub languages: Vec<String>,
    pub forks: u64,
    pub stars: u64,
    pub commit_count: u64,
    pub readme_content: String,
}

/// Aggregate output of the evidence collector, written to
/// `github_analysis.json`. Field names are part of the on-disk contract.
///
/// `github_username: None` encodes resolution failure — an absence, not an
/// error. In that case the collector short-circuits and `verified_repos` is
/// empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubAnalysis {
    pub github_username: Option<String>,
    pub total_repositories: usize,
    pub verified_repos: Vec<RepoEvidence>,
}

impl GithubAnalysis {
    /// The unresolved-username short circuit: no repositories processed.
    pub fn unresolved() -> Self {
        GithubAnalysis {
            github_username: None,
            total_repositories: 0,
            verified_repos: Vec::new(),
        }
    }
}

/// Output of the skill matcher, written to `skill_verification.json`.
/// Field names are part of the on-disk contract and must not change.
///
/// The numeric fields read leniently: the hand-off file may have been edited
/// or produced by another writer, and a non-numeric value there coerces to
/// zero rather than failing the whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillVerification {
    pub resume_skills: Vec<String>,
    pub github_skills: Vec<String>,
    /// Match ratio × 100, rounded to 2 decimals.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub percentage_score: f64,
    /// Corroborated self-reported skills, original casing, source order.
    pub present_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_usize")]
    pub count_skills: usize,
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

fn lenient_usize<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_u64().unwrap_or(0) as usize,
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}
