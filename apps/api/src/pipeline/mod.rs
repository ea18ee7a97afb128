//! Pipeline orchestrator — runs the four stages in order over the on-disk
//! hand-off files: normalize → collect evidence → verify skills → assemble
//! and persist.
//!
//! Per-item failures (one bad repo URL, one failed child insert) never abort
//! a run; whole-stage failures do, wrapped with the failing stage's name so
//! the caller sees exactly where and why the run stopped.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::assemble::assemble_and_persist;
use crate::db::CandidateSink;
use crate::errors::PipelineError;
use crate::github::collector::collect_to_file;
use crate::github::EvidenceSource;
use crate::models::record::InsertOutcome;
use crate::normalize::merge_github_links;
use crate::verify::verify_to_file;

pub mod handlers;

/// Locations of the four hand-off files, all under one data directory.
#[derive(Debug, Clone)]
pub struct PipelinePaths {
    /// Extraction output holding the `github_links` array.
    pub extracted: PathBuf,
    /// The resume record; normalized and re-written in place.
    pub resume: PathBuf,
    /// Evidence collector output.
    pub analysis: PathBuf,
    /// Skill matcher output.
    pub verification: PathBuf,
}

impl PipelinePaths {
    pub fn in_dir(data_dir: &Path) -> Self {
        PipelinePaths {
            extracted: data_dir.join("extracted_pdf_data.json"),
            resume: data_dir.join("resume_got_off.json"),
            analysis: data_dir.join("github_analysis.json"),
            verification: data_dir.join("skill_verification.json"),
        }
    }
}

/// Composed result of one full run. Never half-populated: a stage failure
/// surfaces as an error instead.
#[derive(Debug, Serialize)]
pub struct PipelineReport {
    pub github_username: Option<String>,
    pub total_repositories: usize,
    pub percentage_score: f64,
    pub present_skills: Vec<String>,
    pub outcome: InsertOutcome,
}

/// Runs the whole pipeline once, to completion.
pub async fn run_pipeline(
    github: &dyn EvidenceSource,
    sink: &dyn CandidateSink,
    paths: &PipelinePaths,
) -> Result<PipelineReport, PipelineError> {
    info!("Step 1: normalizing resume extraction");
    let profile = merge_github_links(&paths.extracted, &paths.resume)
        .map_err(|e| PipelineError::in_stage("normalize", e))?;

    info!("Step 2: collecting GitHub evidence");
    let analysis = collect_to_file(github, &profile, &paths.analysis)
        .await
        .map_err(|e| PipelineError::in_stage("collect", e))?;

    info!("Step 3: verifying skills");
    let verification = verify_to_file(&profile.technical_skills, &analysis, &paths.verification)
        .map_err(|e| PipelineError::in_stage("verify", e))?;

    info!("Step 4: assembling and persisting candidate record");
    let outcome = assemble_and_persist(sink, &paths.resume, &paths.verification)
        .await
        .map_err(|e| PipelineError::in_stage("assemble", e))?;

    info!(
        candidate_id = outcome.candidate_id,
        score = verification.percentage_score,
        "Pipeline run complete"
    );

    Ok(PipelineReport {
        github_username: analysis.github_username,
        total_repositories: analysis.total_repositories,
        percentage_score: verification.percentage_score,
        present_skills: verification.present_skills,
        outcome,
    })
}
