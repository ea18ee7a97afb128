use serde::{Deserialize, Serialize};

/// Persistence-ready candidate record: profile fields after default
/// substitution, plus the computed verification numbers. Serializes to the
/// parent-table insert payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: String,
    pub email: String,
    pub usn: String,
    pub phone: String,
    pub gender: String,
    pub cgpa: f64,
    pub field_of_study: String,
    pub years_of_experience: usize,
    pub no_of_skills: usize,
    pub resume_score: f64,
}

/// Accounting for one child-table insert loop. Individual row failures are
/// caught and recorded here instead of aborting the run, so callers can tell
/// "all succeeded" from "some rows were dropped".
#[derive(Debug, Clone, Default, Serialize)]
pub struct InsertTally {
    pub attempted: usize,
    pub succeeded: usize,
    pub failures: Vec<String>,
}

impl InsertTally {
    pub fn record_success(&mut self) {
        self.attempted += 1;
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, reason: String) {
        self.attempted += 1;
        self.failures.push(reason);
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Result of the two-phase write: the sink-assigned parent identifier plus a
/// tally per child table. Partial success (parent present, some children
/// missing) is an explicit, accepted outcome.
#[derive(Debug, Clone, Serialize)]
pub struct InsertOutcome {
    pub candidate_id: i64,
    pub usn: String,
    pub no_of_skills: usize,
    pub resume_score: f64,
    pub skills: InsertTally,
    pub links: InsertTally,
    pub experience: InsertTally,
}
