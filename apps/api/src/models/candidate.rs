use serde::{Deserialize, Serialize};

/// One `(platform, username)` identity link from the resume.
/// Either side may be absent in loosely-extracted input; equality for
/// deduplication is over the full optional pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPair {
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Canonical candidate record, produced once by the normalizer.
///
/// Scalar fields stay optional — the assembler applies defaults later. The
/// four array fields are guaranteed present after normalization, so they
/// deserialize with `#[serde(default)]` and never show up as null downstream.
/// `cgpa` is kept as a raw JSON value because extraction emits it as either
/// a number or a string; the assembler owns the defensive coercion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub cgpa: Option<serde_json::Value>,
    #[serde(default)]
    pub field_of_study: Option<String>,
    #[serde(default)]
    pub links: Vec<LinkPair>,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub technical_skills: Vec<String>,
    #[serde(default)]
    pub github_links: Vec<String>,
    #[serde(default)]
    pub usn: Option<String>,
}
