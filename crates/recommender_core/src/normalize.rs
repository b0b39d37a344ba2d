//! Reconciles the response shapes the upstream service has used over time
//! into one stable [`RecommendationView`] per entry.
//!
//! Observed variants: categories under `skills` or `keys`, support flags as
//! `"Yes"`/`"No"` strings under `remote_support`/`adaptive_support` or as
//! booleans under `remote`/`adaptive`, and `-1` as the "no duration" sentinel.
use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

const NOT_SPECIFIED: &str = "Not specified";
const DURATION_SENTINEL: i64 = -1;
// Largest magnitude an f64 holds exactly (2^53); anything wider is not a real duration.
const MAX_EXACT_MINUTES: f64 = 9_007_199_254_740_992.0;

const SKILL_CODES: &[(&str, char)] = &[
    ("Ability & Aptitude", 'A'),
    ("Biodata & Situational Judgement", 'B'),
    ("Competencies", 'C'),
    ("Development & 360", 'D'),
    ("Assessment Exercises", 'E'),
    ("Knowledge & Skills", 'K'),
    ("Personality & Behavior", 'P'),
    ("Simulations", 'S'),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentDuration {
    Minutes(i64),
    NotSpecified,
}

impl fmt::Display for AssessmentDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssessmentDuration::Minutes(minutes) => write!(f, "{minutes}"),
            AssessmentDuration::NotSpecified => f.write_str(NOT_SPECIFIED),
        }
    }
}

impl Serialize for AssessmentDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AssessmentDuration::Minutes(minutes) => serializer.serialize_i64(*minutes),
            AssessmentDuration::NotSpecified => serializer.serialize_str(NOT_SPECIFIED),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationView {
    pub name: String,
    pub link: String,
    pub duration: AssessmentDuration,
    pub skill_codes: Vec<char>,
    pub remote_supported: bool,
    pub adaptive_supported: bool,
}

/// Payload-level malformation: no usable `recommendations` sequence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedResponse {
    #[error("response body is not a json object")]
    NotAnObject,
    #[error("response has no `recommendations` field")]
    MissingRecommendations,
    #[error("`recommendations` is not a sequence")]
    RecommendationsNotASequence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DropReason {
    #[error("entry is not a record")]
    NotARecord,
    #[error("missing `name`")]
    MissingName,
    #[error("missing `link`")]
    MissingLink,
}

/// Diagnostic for an entry that was left out of the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DroppedEntry {
    pub index: usize,
    pub reason: DropReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedResponse {
    pub results: Vec<RecommendationView>,
    pub dropped: Vec<DroppedEntry>,
    pub malformed: Option<MalformedResponse>,
}

/// Normalizes one decoded response body. Pure; upstream order is preserved.
pub fn normalize_response(raw: &Value) -> NormalizedResponse {
    let entries = match recommendations(raw) {
        Ok(entries) => entries,
        Err(malformed) => {
            return NormalizedResponse {
                malformed: Some(malformed),
                ..NormalizedResponse::default()
            }
        }
    };

    let mut normalized = NormalizedResponse::default();
    for (index, entry) in entries.iter().enumerate() {
        match normalize_entry(entry) {
            Ok(view) => normalized.results.push(view),
            Err(reason) => normalized.dropped.push(DroppedEntry { index, reason }),
        }
    }
    normalized
}

/// Single-letter code for a category; unknown categories use their own first character.
pub fn skill_code(category: &str) -> Option<char> {
    SKILL_CODES
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, code)| *code)
        .or_else(|| category.trim().chars().next())
}

fn recommendations(raw: &Value) -> Result<&[Value], MalformedResponse> {
    let object = raw.as_object().ok_or(MalformedResponse::NotAnObject)?;
    match object.get("recommendations") {
        None | Some(Value::Null) => Err(MalformedResponse::MissingRecommendations),
        Some(Value::Array(entries)) => Ok(entries.as_slice()),
        Some(_) => Err(MalformedResponse::RecommendationsNotASequence),
    }
}

fn normalize_entry(entry: &Value) -> Result<RecommendationView, DropReason> {
    let record = entry.as_object().ok_or(DropReason::NotARecord)?;
    let name = required_text(record, "name").ok_or(DropReason::MissingName)?;
    let link = required_text(record, "link").ok_or(DropReason::MissingLink)?;

    Ok(RecommendationView {
        name,
        link,
        duration: duration(record.get("duration")),
        skill_codes: skill_codes(first_present(record, &["skills", "keys"])),
        remote_supported: flag(first_present(record, &["remote_support", "remote"])),
        adaptive_supported: flag(first_present(record, &["adaptive_support", "adaptive"])),
    })
}

fn required_text(record: &Map<String, Value>, field: &str) -> Option<String> {
    record
        .get(field)
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(ToOwned::to_owned)
}

fn first_present<'a>(record: &'a Map<String, Value>, fields: &[&str]) -> Option<&'a Value> {
    fields
        .iter()
        .filter_map(|field| record.get(*field))
        .find(|value| !value.is_null())
}

fn duration(value: Option<&Value>) -> AssessmentDuration {
    let minutes = value.and_then(|value| {
        value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|float| float.fract() == 0.0 && float.abs() <= MAX_EXACT_MINUTES)
                .map(|float| float as i64)
        })
    });
    match minutes {
        Some(DURATION_SENTINEL) | None => AssessmentDuration::NotSpecified,
        Some(minutes) => AssessmentDuration::Minutes(minutes),
    }
}

fn skill_codes(value: Option<&Value>) -> Vec<char> {
    let Some(Value::Array(categories)) = value else {
        return Vec::new();
    };
    categories
        .iter()
        .filter_map(Value::as_str)
        .filter_map(skill_code)
        .collect()
}

fn flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => text == "Yes",
        _ => false,
    }
}
