//! JSON Normalizer — extracts and canonicalizes a candidate record from the
//! noisy text the extraction step produces.
//!
//! Extraction output is untrusted: the JSON object may be wrapped in markdown
//! fences or prose, string values carry stray whitespace, array fields may be
//! absent, and identity links repeat. Normalization repairs all of that in
//! place and hands downstream stages a typed `CandidateProfile`.

use std::collections::HashSet;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::errors::PipelineError;
use crate::models::candidate::CandidateProfile;

/// Array fields guaranteed present after normalization.
const ARRAY_FIELDS: &[&str] = &["links", "projects", "experience", "technical_skills"];

/// Locates the first top-level brace-delimited JSON object in `text` by
/// brace-depth counting (not regex): scan to the first `{`, then walk forward
/// until the depth counter returns to zero.
///
/// Braces inside string literals are counted too — same as the original
/// extractor. Real extraction output does not hit that case.
pub fn extract_json_object(text: &str) -> Result<&str, PipelineError> {
    let start = text
        .find('{')
        .ok_or_else(|| PipelineError::MalformedInput("no JSON object found".to_string()))?;

    let mut depth = 0usize;
    for (i, b) in text.as_bytes().iter().enumerate().skip(start) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&text[start..=i]);
                }
            }
            _ => {}
        }
    }

    Err(PipelineError::MalformedInput(
        "incomplete JSON object (unbalanced braces)".to_string(),
    ))
}

/// Recursively trims leading/trailing whitespace from every string value,
/// descending into arrays and objects. Non-string values pass through.
fn clean_value(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.trim().to_string()),
        Value::Array(items) => Value::Array(items.into_iter().map(clean_value).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, clean_value(v)))
                .collect::<Map<String, Value>>(),
        ),
        other => other,
    }
}

/// Deduplicates the `links` array by `(platform, username)` identity,
/// preserving first-seen order.
fn dedup_links(links: Vec<Value>) -> Vec<Value> {
    let mut seen: HashSet<(Option<String>, Option<String>)> = HashSet::new();
    let mut unique = Vec::with_capacity(links.len());

    for link in links {
        let key = (
            link.get("platform")
                .and_then(|v| v.as_str())
                .map(String::from),
            link.get("username")
                .and_then(|v| v.as_str())
                .map(String::from),
        );
        if seen.insert(key) {
            unique.push(link);
        }
    }

    unique
}

/// Applies the three normalization passes in order: default the array fields,
/// deduplicate links, trim strings recursively. Idempotent — normalizing the
/// result again yields an identical value.
pub fn normalize_value(value: Value) -> Value {
    let mut map = match value {
        Value::Object(map) => map,
        other => return clean_value(other),
    };

    for field in ARRAY_FIELDS {
        map.entry(*field).or_insert_with(|| Value::Array(vec![]));
    }

    if let Some(Value::Array(links)) = map.remove("links") {
        map.insert("links".to_string(), Value::Array(dedup_links(links)));
    } else {
        map.insert("links".to_string(), Value::Array(vec![]));
    }

    clean_value(Value::Object(map))
}

/// Reads the extraction output at `path`, extracts and normalizes the
/// embedded JSON object, writes the clean JSON back over the file, and
/// returns the typed profile.
///
/// The original file content is consumed: after this call the file holds
/// pure JSON, no fencing.
pub fn normalize_file(path: &Path) -> Result<CandidateProfile, PipelineError> {
    let text = PipelineError::read_file(path)?;
    let raw = extract_json_object(&text)?;
    let value: Value = serde_json::from_str(raw)?;
    let normalized = normalize_value(value);

    std::fs::write(path, serde_json::to_string_pretty(&normalized)?)?;

    let profile: CandidateProfile = serde_json::from_value(normalized)?;
    info!(
        links = profile.links.len(),
        skills = profile.technical_skills.len(),
        "Normalized resume extraction at {}",
        path.display()
    );
    Ok(profile)
}

/// Merges ONLY the `github_links` array from the extraction output file into
/// the resume file, normalizing the destination first. Either file holding a
/// one-element array wrapper is unwrapped.
///
/// A missing or unparseable source is logged and skipped — the resume file is
/// still left normalized, and the pipeline proceeds without repo links.
pub fn merge_github_links(source: &Path, dest: &Path) -> Result<CandidateProfile, PipelineError> {
    normalize_file(dest)?;

    let source_text = match PipelineError::read_file(source) {
        Ok(text) => text,
        Err(PipelineError::NotFound(path)) => {
            warn!("GitHub-links source file not found: {path}");
            return reload_profile(dest);
        }
        Err(e) => return Err(e),
    };

    let source_data: Value = match serde_json::from_str(&source_text) {
        Ok(v) => v,
        Err(e) => {
            warn!("Invalid JSON in {}: {e}", source.display());
            return reload_profile(dest);
        }
    };
    let source_data = unwrap_singleton(source_data);

    let dest_text = PipelineError::read_file(dest)?;
    let dest_data = unwrap_singleton(serde_json::from_str(&dest_text)?);

    let mut dest_map = match dest_data {
        Value::Object(map) => map,
        other => {
            warn!("Resume file {} is not a JSON object", dest.display());
            std::fs::write(dest, serde_json::to_string_pretty(&other)?)?;
            return reload_profile(dest);
        }
    };

    if let Some(links) = source_data.get("github_links") {
        dest_map.insert("github_links".to_string(), links.clone());
    }

    std::fs::write(
        dest,
        serde_json::to_string_pretty(&Value::Object(dest_map))?,
    )?;
    reload_profile(dest)
}

fn reload_profile(path: &Path) -> Result<CandidateProfile, PipelineError> {
    let text = PipelineError::read_file(path)?;
    let value: Value = serde_json::from_str(&text)?;
    Ok(serde_json::from_value(value)?)
}

/// Extraction sometimes wraps the object in a one-element array; take the
/// first element in that case.
fn unwrap_singleton(value: Value) -> Value {
    match value {
        Value::Array(mut items) if !items.is_empty() => items.remove(0),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_plain_object() {
        let text = r#"{"name": "A"}"#;
        assert_eq!(extract_json_object(text).unwrap(), r#"{"name": "A"}"#);
    }

    #[test]
    fn test_extract_strips_markdown_fences() {
        let text = "```json\n{\"name\": \"A\", \"nested\": {\"k\": 1}}\n```";
        assert_eq!(
            extract_json_object(text).unwrap(),
            r#"{"name": "A", "nested": {"k": 1}}"#
        );
    }

    #[test]
    fn test_extract_ignores_trailing_noise() {
        let text = "prefix {\"a\": 1} suffix {\"b\": 2}";
        assert_eq!(extract_json_object(text).unwrap(), r#"{"a": 1}"#);
    }

    #[test]
    fn test_extract_no_brace_is_malformed() {
        let err = extract_json_object("no json here").unwrap_err();
        assert!(matches!(err, PipelineError::MalformedInput(_)));
    }

    #[test]
    fn test_extract_unterminated_object_is_malformed() {
        let err = extract_json_object(r#"{"name": "A""#).unwrap_err();
        assert!(matches!(err, PipelineError::MalformedInput(_)));
    }

    #[test]
    fn test_normalize_defaults_the_four_array_fields() {
        let normalized = normalize_value(json!({"name": "A"}));
        for field in ARRAY_FIELDS {
            assert_eq!(
                normalized.get(*field),
                Some(&Value::Array(vec![])),
                "field {field} should default to an empty array"
            );
        }
    }

    #[test]
    fn test_normalize_dedups_links_preserving_first_seen_order() {
        let normalized = normalize_value(json!({
            "links": [
                {"platform": "Github", "username": "ada"},
                {"platform": "LinkedIn", "username": "ada-l"},
                {"platform": "Github", "username": "ada"},
                {"platform": "Github", "username": "other"},
            ]
        }));
        let links = normalized["links"].as_array().unwrap();
        assert_eq!(links.len(), 3);
        assert_eq!(links[0]["username"], "ada");
        assert_eq!(links[1]["platform"], "LinkedIn");
        assert_eq!(links[2]["username"], "other");
    }

    #[test]
    fn test_normalize_trims_strings_recursively() {
        let normalized = normalize_value(json!({
            "name": "  Ada  ",
            "experience": ["  intern at X ", {"note": " nested "}],
            "cgpa": 8.5
        }));
        assert_eq!(normalized["name"], "Ada");
        assert_eq!(normalized["experience"][0], "intern at X");
        assert_eq!(normalized["experience"][1]["note"], "nested");
        assert_eq!(normalized["cgpa"], 8.5);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let input = json!({
            "name": " Ada ",
            "links": [
                {"platform": "Github", "username": "ada"},
                {"platform": "Github", "username": "ada"},
            ],
            "technical_skills": [" Rust "]
        });
        let once = normalize_value(input);
        let twice = normalize_value(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_file_overwrites_with_clean_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume_got_off.json");
        std::fs::write(
            &path,
            "```json\n{\"name\": \" Ada \", \"technical_skills\": [\"Rust\"]}\n```",
        )
        .unwrap();

        let profile = normalize_file(&path).unwrap();
        assert_eq!(profile.name.as_deref(), Some("Ada"));
        assert_eq!(profile.technical_skills, vec!["Rust"]);

        // File now holds pure JSON: parsing it directly must succeed.
        let reread: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(reread["name"], "Ada");
    }

    #[test]
    fn test_normalize_missing_file_is_not_found() {
        let err = normalize_file(Path::new("/nonexistent/resume.json")).unwrap_err();
        assert!(matches!(err, PipelineError::NotFound(_)));
    }

    #[test]
    fn test_merge_github_links_copies_only_links() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("extracted_pdf_data.json");
        let dest = dir.path().join("resume_got_off.json");
        std::fs::write(
            &source,
            json!({
                "github_links": ["https://github.com/ada/engine"],
                "count": 1
            })
            .to_string(),
        )
        .unwrap();
        std::fs::write(&dest, r#"{"name": "Ada"}"#).unwrap();

        let profile = merge_github_links(&source, &dest).unwrap();
        assert_eq!(profile.github_links, vec!["https://github.com/ada/engine"]);

        let dest_json: Value =
            serde_json::from_str(&std::fs::read_to_string(&dest).unwrap()).unwrap();
        // Only github_links crossed over, not the source's count field.
        assert!(dest_json.get("count").is_none());
    }

    #[test]
    fn test_merge_github_links_tolerates_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("resume_got_off.json");
        std::fs::write(&dest, r#"{"name": "Ada"}"#).unwrap();

        let profile =
            merge_github_links(&dir.path().join("missing.json"), &dest).unwrap();
        assert!(profile.github_links.is_empty());
        assert_eq!(profile.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_merge_unwraps_singleton_array_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("extracted_pdf_data.json");
        let dest = dir.path().join("resume_got_off.json");
        std::fs::write(
            &source,
            json!([{"github_links": ["https://github.com/ada/engine"]}]).to_string(),
        )
        .unwrap();
        std::fs::write(&dest, r#"{"name": "Ada"}"#).unwrap();

        let profile = merge_github_links(&source, &dest).unwrap();
        assert_eq!(profile.github_links.len(), 1);
    }
}
