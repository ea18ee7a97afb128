//! Candidate Record Assembler — merges the normalized profile and the skill
//! verification into a persistence-ready record, then performs the two-phase
//! write: parent candidate row first, then child skill/link/experience rows
//! keyed by the sink-assigned identifier.
//!
//! No transaction spans parent and children. A crash in between leaves an
//! orphaned parent row; that trade-off is accepted and reconciled out-of-band.

use std::path::Path;

use rand::Rng;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::db::CandidateSink;
use crate::errors::PipelineError;
use crate::models::candidate::CandidateProfile;
use crate::models::evidence::SkillVerification;
use crate::models::record::{CandidateRecord, InsertOutcome, InsertTally};

const DEFAULT_NAME: &str = "Unknown";
const DEFAULT_EMAIL: &str = "unknown@example.com";
const DEFAULT_PHONE: &str = "0000000000";
const DEFAULT_GENDER: &str = "Male";
const DEFAULT_FIELD_OF_STUDY: &str = "Unknown";

/// Default substitution: absent, or blank after trimming, means missing.
fn or_default(value: Option<&str>, default: &str) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => default.to_string(),
    }
}

/// Defensive numeric coercion: numbers pass through, numeric strings parse,
/// everything else (including `"abc"`) falls back to 0.0.
pub fn coerce_f64(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Years of experience is the count of experience entries; 0 if none.
pub fn years_of_experience(experience: &[String]) -> usize {
    experience.len()
}

/// Synthetic university-style identifier: fixed prefix, 2-digit pseudo-random
/// year, fixed department code, zero-padded 3-digit sequence.
///
/// No uniqueness guarantee — collisions are possible and tolerated. Switching
/// to a verified or collision-resistant scheme is a behavior change tracked
/// in DESIGN.md.
pub fn generate_usn() -> String {
    let mut rng = rand::thread_rng();
    let year: u32 = rng.gen_range(20..=24);
    let roll: u32 = rng.gen_range(1..=300);
    format!("1RV{year}CS{roll:03}")
}

/// Builds the persistence-ready record from the normalized profile and the
/// verification output, applying defaults and coercion.
pub fn build_record(
    profile: &CandidateProfile,
    verification: &SkillVerification,
) -> CandidateRecord {
    let usn = match profile.usn.as_deref() {
        Some(u) if !u.trim().is_empty() => u.to_string(),
        _ => generate_usn(),
    };

    CandidateRecord {
        name: or_default(profile.name.as_deref(), DEFAULT_NAME),
        email: or_default(profile.email.as_deref(), DEFAULT_EMAIL),
        usn,
        phone: or_default(profile.phone.as_deref(), DEFAULT_PHONE),
        gender: or_default(profile.gender.as_deref(), DEFAULT_GENDER),
        cgpa: coerce_f64(profile.cgpa.as_ref()),
        field_of_study: or_default(profile.field_of_study.as_deref(), DEFAULT_FIELD_OF_STUDY),
        years_of_experience: years_of_experience(&profile.experience),
        no_of_skills: verification.count_skills,
        resume_score: round2(verification.percentage_score),
    }
}

/// Two-phase write: insert the parent record, read the sink-assigned
/// `candidate_id` from the response rows, then insert child skills, links,
/// and experience entries. Each child failure is caught, logged, and
/// recorded in the per-table tally; the run continues.
pub async fn persist_record(
    sink: &dyn CandidateSink,
    profile: &CandidateProfile,
    verification: &SkillVerification,
    record: &CandidateRecord,
) -> Result<InsertOutcome, PipelineError> {
    let rows = sink.insert_candidate(record).await?;
    let candidate_id = rows
        .first()
        .and_then(|row| row.get("candidate_id"))
        .and_then(Value::as_i64)
        .ok_or_else(|| {
            PipelineError::Persistence("candidate insertion returned no data".to_string())
        })?;

    info!(candidate_id, usn = %record.usn, "Candidate row inserted");

    let mut skills = InsertTally::default();
    for skill in &verification.present_skills {
        match sink.insert_skill(candidate_id, skill).await {
            Ok(()) => skills.record_success(),
            Err(e) => {
                error!("Failed to insert skill '{skill}' for candidate {candidate_id}: {e}");
                skills.record_failure(format!("{skill}: {e}"));
            }
        }
    }

    let mut links = InsertTally::default();
    for link in &profile.links {
        let platform = link.platform.as_deref().unwrap_or_default();
        let username = link.username.as_deref().unwrap_or_default();
        match sink.insert_link(candidate_id, platform, username).await {
            Ok(()) => links.record_success(),
            Err(e) => {
                error!(
                    "Failed to insert link {platform}/{username} for candidate {candidate_id}: {e}"
                );
                links.record_failure(format!("{platform}/{username}: {e}"));
            }
        }
    }

    let mut experience = InsertTally::default();
    for description in &profile.experience {
        match sink
            .insert_experience(candidate_id, record.years_of_experience, description)
            .await
        {
            Ok(()) => experience.record_success(),
            Err(e) => {
                error!("Failed to insert experience entry for candidate {candidate_id}: {e}");
                experience.record_failure(format!("{description}: {e}"));
            }
        }
    }

    if !(skills.all_succeeded() && links.all_succeeded() && experience.all_succeeded()) {
        warn!(candidate_id, "Some child rows were not inserted; see tally");
    }

    Ok(InsertOutcome {
        candidate_id,
        usn: record.usn.clone(),
        no_of_skills: record.no_of_skills,
        resume_score: record.resume_score,
        skills,
        links,
        experience,
    })
}

/// Loads the two hand-off files, assembles the record, and persists it.
pub async fn assemble_and_persist(
    sink: &dyn CandidateSink,
    resume_path: &Path,
    verification_path: &Path,
) -> Result<InsertOutcome, PipelineError> {
    let profile: CandidateProfile =
        serde_json::from_str(&PipelineError::read_file(resume_path)?)?;
    let verification: SkillVerification =
        serde_json::from_str(&PipelineError::read_file(verification_path)?)?;

    let record = build_record(&profile, &verification);
    persist_record(sink, &profile, &verification, &record).await
}
