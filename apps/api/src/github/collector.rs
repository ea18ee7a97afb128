//! Evidence Collector — resolves a candidate's GitHub username, fetches
//! per-repository signals, and augments observed languages with skills mined
//! from README text against the master taxonomy.
//!
//! Fetch failures are isolated: a failed source defaults its fields and the
//! batch continues. Only resolution failure short-circuits, and it does so as
//! an absence (`GithubAnalysis::unresolved`), never as an error.

use std::collections::HashSet;
use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use crate::errors::PipelineError;
use crate::github::EvidenceSource;
use crate::models::candidate::CandidateProfile;
use crate::models::evidence::{GithubAnalysis, RepoEvidence};
use crate::skills::taxonomy::master_skills;

/// Position of the owner segment in `https://github.com/{owner}/{repo}`
/// after splitting on `/`.
const OWNER_SEGMENT: usize = 3;

/// Resolves the candidate's GitHub username: first a case-insensitive
/// `github` platform link, then the owner segment of the first repository
/// URL. `None` means unresolvable — callers must tolerate the absence.
pub fn resolve_username(profile: &CandidateProfile) -> Option<String> {
    let from_links = profile
        .links
        .iter()
        .find(|link| {
            link.platform
                .as_deref()
                .is_some_and(|p| p.eq_ignore_ascii_case("github"))
        })
        .and_then(|link| link.username.clone());

    from_links.or_else(|| {
        profile
            .github_links
            .first()
            .and_then(|url| url.split('/').nth(OWNER_SEGMENT))
            .filter(|segment| !segment.is_empty())
            .map(String::from)
    })
}

/// Extracts `(owner, repo_name)` from a repository URL. Returns `None` for
/// anything that is not a `github.com` URL with both path segments —
/// malformed entries are skipped, never fatal.
pub fn parse_repo_url(url: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = url.split('/').collect();
    if parts.len() < 5 || !parts[2].eq_ignore_ascii_case("github.com") {
        return None;
    }
    let owner = parts[3];
    let name = parts[4];
    if owner.is_empty() || name.is_empty() {
        return None;
    }
    Some((owner.to_string(), name.to_string()))
}

/// Case-insensitive substring search of every taxonomy term against the
/// README text. The inline fetch-error placeholder is never mined. Returned
/// terms are deduplicated, in taxonomy order.
pub fn mine_readme_skills(readme: &str) -> Vec<&'static str> {
    if readme.is_empty() || readme.starts_with("Error") {
        return Vec::new();
    }

    let readme_lower = readme.to_lowercase();
    let mut seen = HashSet::new();
    master_skills()
        .filter(|skill| readme_lower.contains(&skill.to_lowercase()))
        .filter(|skill| seen.insert(*skill))
        .collect()
}

/// Appends mined taxonomy terms to the observed language list, skipping any
/// already present case-insensitively. This deliberately conflates "keyword
/// detected in README" with "language used" — the matcher consumes the
/// merged list as one evidence set.
pub fn merge_mined_skills(languages: &mut Vec<String>, mined: &[&'static str]) {
    let existing: HashSet<String> = languages.iter().map(|l| l.to_lowercase()).collect();
    for skill in mined {
        if !existing.contains(&skill.to_lowercase()) {
            languages.push((*skill).to_string());
        }
    }
}

/// Gathers evidence for one repository. Every source fetch is independent;
/// each failure is logged and its field defaulted.
async fn collect_repo(source: &dyn EvidenceSource, owner: &str, name: &str) -> RepoEvidence {
    info!("Processing repo: {owner}/{name}");

    let (forks, stars) = match source.repo_metadata(owner, name).await {
        Ok(meta) => (
            meta.get("forks_count").and_then(Value::as_u64).unwrap_or(0),
            meta.get("stargazers_count")
                .and_then(Value::as_u64)
                .unwrap_or(0),
        ),
        Err(e) => {
            warn!("Metadata fetch failed for {owner}/{name}: {e}");
            (0, 0)
        }
    };

    let mut languages = match source.repo_languages(owner, name).await {
        Ok(languages) => languages,
        Err(e) => {
            warn!("Language fetch failed for {owner}/{name}: {e}");
            Vec::new()
        }
    };

    let commit_count = match source.commit_count(owner, name).await {
        Ok(count) => count,
        Err(e) => {
            warn!("Commit listing failed for {owner}/{name}: {e}");
            0
        }
    };

    let readme_content = source.readme(owner, name).await;
    let mined = mine_readme_skills(&readme_content);
    merge_mined_skills(&mut languages, &mined);

    RepoEvidence {
        repo_name: name.to_string(),
        owner: owner.to_string(),
        languages,
        forks,
        stars,
        commit_count,
        readme_content,
    }
}

/// Collects evidence across all referenced repositories. Malformed URLs are
/// skipped silently; fetch-failed repositories still contribute an entry with
/// defaulted fields, so `total_repositories` counts every attempt.
pub async fn collect_evidence(
    source: &dyn EvidenceSource,
    profile: &CandidateProfile,
) -> GithubAnalysis {
    let Some(username) = resolve_username(profile) else {
        warn!("GitHub username not found; skipping evidence collection");
        return GithubAnalysis::unresolved();
    };

    let mut verified_repos = Vec::new();
    for url in &profile.github_links {
        match parse_repo_url(url) {
            Some((owner, name)) => {
                verified_repos.push(collect_repo(source, &owner, &name).await);
            }
            None => warn!("Skipping malformed repository URL: {url}"),
        }
    }

    GithubAnalysis {
        github_username: Some(username),
        total_repositories: verified_repos.len(),
        verified_repos,
    }
}

/// Runs collection and writes the analysis to `github_analysis.json` for the
/// matcher stage.
pub async fn collect_to_file(
    source: &dyn EvidenceSource,
    profile: &CandidateProfile,
    out_path: &Path,
) -> Result<GithubAnalysis, PipelineError> {
    let analysis = collect_evidence(source, profile).await;
    std::fs::write(out_path, serde_json::to_string_pretty(&analysis)?)?;
    info!(
        repos = analysis.total_repositories,
        "GitHub analysis saved to {}",
        out_path.display()
    );
    Ok(analysis)
}
