use pretty_assertions::assert_eq;
use recommender_core::{
    normalize_response, skill_code, AssessmentDuration, DropReason, DroppedEntry,
    MalformedResponse, RecommendationView,
};
use serde_json::json;

#[test]
fn yes_no_strings_and_skills_normalize() {
    let raw = json!({
        "recommendations": [{
            "name": "Verify - Deductive",
            "link": "https://x/y",
            "skills": ["Ability & Aptitude", "Simulations"],
            "remote_support": "Yes",
            "adaptive_support": "No"
        }]
    });

    let normalized = normalize_response(&raw);

    assert_eq!(normalized.malformed, None);
    assert!(normalized.dropped.is_empty());
    assert_eq!(
        normalized.results,
        vec![RecommendationView {
            name: "Verify - Deductive".to_string(),
            link: "https://x/y".to_string(),
            duration: AssessmentDuration::NotSpecified,
            skill_codes: vec!['A', 'S'],
            remote_supported: true,
            adaptive_supported: false,
        }]
    );
}

#[test]
fn duration_sentinel_and_minutes() {
    let raw = json!({
        "recommendations": [
            { "name": "a", "link": "https://x/a", "duration": -1 },
            { "name": "b", "link": "https://x/b", "duration": 45 },
            { "name": "c", "link": "https://x/c", "duration": 30.0 },
            { "name": "d", "link": "https://x/d", "duration": "45 minutes" },
            { "name": "e", "link": "https://x/e" }
        ]
    });

    let durations: Vec<_> = normalize_response(&raw)
        .results
        .iter()
        .map(|view| view.duration)
        .collect();

    assert_eq!(
        durations,
        vec![
            AssessmentDuration::NotSpecified,
            AssessmentDuration::Minutes(45),
            AssessmentDuration::Minutes(30),
            AssessmentDuration::NotSpecified,
            AssessmentDuration::NotSpecified,
        ]
    );
    assert_eq!(durations[0].to_string(), "Not specified");
    assert_eq!(durations[1].to_string(), "45");
}

#[test]
fn out_of_range_durations_are_not_specified() {
    let raw = json!({
        "recommendations": [
            { "name": "a", "link": "https://x/a", "duration": u64::MAX },
            { "name": "b", "link": "https://x/b", "duration": 1e20 },
            { "name": "c", "link": "https://x/c", "duration": -1e20 },
            { "name": "d", "link": "https://x/d", "duration": i64::MAX }
        ]
    });

    let durations: Vec<_> = normalize_response(&raw)
        .results
        .iter()
        .map(|view| view.duration)
        .collect();

    assert_eq!(
        durations,
        vec![
            AssessmentDuration::NotSpecified,
            AssessmentDuration::NotSpecified,
            AssessmentDuration::NotSpecified,
            AssessmentDuration::Minutes(i64::MAX),
        ]
    );
}

#[test]
fn duration_serializes_as_number_or_text() {
    let raw = json!({
        "recommendations": [
            { "name": "a", "link": "https://x/a", "duration": -1 },
            { "name": "b", "link": "https://x/b", "duration": 45 }
        ]
    });

    let results = normalize_response(&raw).results;
    let encoded = serde_json::to_value(&results).unwrap();

    assert_eq!(encoded[0]["duration"], json!("Not specified"));
    assert_eq!(encoded[1]["duration"], json!(45));
    assert_eq!(encoded[0]["skill_codes"], json!([]));
}

#[test]
fn normalization_is_deterministic() {
    let raw = json!({
        "recommendations": [
            { "name": "a", "link": "https://x/a", "keys": ["Competencies"], "remote": true },
            { "name": "b" },
            { "name": "c", "link": "https://x/c", "skills": ["Simulations"] }
        ]
    });

    assert_eq!(normalize_response(&raw), normalize_response(&raw));
}

#[test]
fn entry_missing_link_is_dropped() {
    let raw = json!({
        "recommendations": [
            { "name": "a", "link": "https://x/a" },
            { "name": "b" },
            { "name": "c", "link": "https://x/c" }
        ]
    });

    let normalized = normalize_response(&raw);

    assert_eq!(normalized.results.len(), 2);
    assert_eq!(
        normalized
            .results
            .iter()
            .map(|view| view.name.as_str())
            .collect::<Vec<_>>(),
        vec!["a", "c"]
    );
    assert_eq!(
        normalized.dropped,
        vec![DroppedEntry {
            index: 1,
            reason: DropReason::MissingLink
        }]
    );
}

#[test]
fn entries_without_usable_name_or_record_shape_are_dropped() {
    let raw = json!({
        "recommendations": [
            { "link": "https://x/a" },
            { "name": "   ", "link": "https://x/b" },
            { "name": 42, "link": "https://x/c" },
            "not a record",
            null
        ]
    });

    let normalized = normalize_response(&raw);

    assert!(normalized.results.is_empty());
    assert_eq!(normalized.malformed, None);
    let reasons: Vec<_> = normalized.dropped.iter().map(|d| d.reason).collect();
    assert_eq!(
        reasons,
        vec![
            DropReason::MissingName,
            DropReason::MissingName,
            DropReason::MissingName,
            DropReason::NotARecord,
            DropReason::NotARecord,
        ]
    );
}

#[test]
fn skills_and_keys_variants_agree() {
    let categories = json!(["Knowledge & Skills", "Personality & Behavior", "Development & 360"]);
    let with_skills = json!({
        "recommendations": [{ "name": "a", "link": "https://x/a", "skills": categories.clone() }]
    });
    let with_keys = json!({
        "recommendations": [{ "name": "a", "link": "https://x/a", "keys": categories }]
    });

    let from_skills = normalize_response(&with_skills).results;
    let from_keys = normalize_response(&with_keys).results;

    assert_eq!(from_skills[0].skill_codes, vec!['K', 'P', 'D']);
    assert_eq!(from_skills[0].skill_codes, from_keys[0].skill_codes);
}

#[test]
fn unknown_category_falls_back_to_first_character() {
    assert_eq!(skill_code("Biodata & Situational Judgement"), Some('B'));
    assert_eq!(skill_code("Assessment Exercises"), Some('E'));
    assert_eq!(skill_code("Leadership"), Some('L'));
    assert_eq!(skill_code(""), None);
}

#[test]
fn categories_that_are_not_a_sequence_yield_no_codes() {
    let raw = json!({
        "recommendations": [
            { "name": "a", "link": "https://x/a", "skills": "Simulations" },
            { "name": "b", "link": "https://x/b", "keys": null },
            { "name": "c", "link": "https://x/c", "skills": ["Simulations", 7, ""] }
        ]
    });

    let codes: Vec<_> = normalize_response(&raw)
        .results
        .into_iter()
        .map(|view| view.skill_codes)
        .collect();

    assert_eq!(codes, vec![vec![], vec![], vec!['S']]);
}

#[test]
fn support_flags_accept_booleans_and_exact_yes() {
    let raw = json!({
        "recommendations": [
            { "name": "a", "link": "https://x/a", "remote": true, "adaptive": false },
            { "name": "b", "link": "https://x/b", "remote_support": "yes", "adaptive_support": "Yes" },
            { "name": "c", "link": "https://x/c", "remote_support": 1, "adaptive_support": "No" },
            { "name": "d", "link": "https://x/d" }
        ]
    });

    let flags: Vec<_> = normalize_response(&raw)
        .results
        .iter()
        .map(|view| (view.remote_supported, view.adaptive_supported))
        .collect();

    assert_eq!(
        flags,
        vec![(true, false), (false, true), (false, false), (false, false)]
    );
}

#[test]
fn missing_or_misshapen_recommendations_is_malformed() {
    let cases = [
        (json!({}), MalformedResponse::MissingRecommendations),
        (
            json!({ "recommendations": null }),
            MalformedResponse::MissingRecommendations,
        ),
        (
            json!({ "recommendations": { "name": "a" } }),
            MalformedResponse::RecommendationsNotASequence,
        ),
        (json!([1, 2, 3]), MalformedResponse::NotAnObject),
    ];

    for (raw, expected) in cases {
        let normalized = normalize_response(&raw);
        assert!(normalized.results.is_empty());
        assert_eq!(normalized.malformed, Some(expected));
    }
}
