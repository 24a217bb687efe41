//! Validation, schema repair, and the deterministic fallback.
//!
//! The pipeline's availability contract: whatever the provider does, the
//! caller always gets a structurally valid `AnalysisResult`. Validation is
//! strict, the alternate-schema remap is best effort, and `fallback()` is
//! the floor everything lands on.

use serde_json::Value;

use crate::models::{AnalysisResult, CategoryFeedback, PersonaFeedback};

pub const PERSONAS: [&str; 2] = ["genuine", "roast"];
pub const CATEGORIES: [&str; 4] = [
    "format",
    "content_quality",
    "skills_presentation",
    "ats_compatibility",
];

/// Checks a parsed value against the canonical dual-persona schema: both
/// personas present, each with `overall_review` and all four categories, and
/// every score numeric in [0, 10] inclusive. Fractional scores are valid.
pub fn validate(feedback: &Value) -> bool {
    for persona in PERSONAS {
        let Some(section) = feedback.get(persona) else {
            return false;
        };
        if section.get("overall_review").is_none() {
            return false;
        }
        for category in CATEGORIES {
            let Some(entry) = section.get(category) else {
                return false;
            };
            let Some(score) = entry.get("score").and_then(Value::as_f64) else {
                return false;
            };
            if !(0.0..=10.0).contains(&score) {
                return false;
            }
        }
    }
    true
}

/// Maps a provider response onto the canonical shape.
///
/// Already-canonical input passes through unchanged (normalize is
/// idempotent). Input in the alternate ad-hoc schema — an `overall_score`
/// plus a flat `categories` list — is remapped: the four listed categories
/// map positionally onto the canonical four, the first `improvements` entry
/// becomes `good_point`, and the first `issues` entry becomes
/// `improvement_area`. That positional mapping is a heuristic carried over
/// from the alternate schema's looser shape. Anything else is `None`.
pub fn normalize(value: Value) -> Option<AnalysisResult> {
    if validate(&value) {
        return serde_json::from_value(value).ok();
    }

    let categories = value.get("categories")?.as_array()?;
    if categories.len() < CATEGORIES.len() {
        return None;
    }

    let mut remapped = Vec::with_capacity(CATEGORIES.len());
    for entry in categories.iter().take(CATEGORIES.len()) {
        let score = entry.get("score").and_then(Value::as_f64)?;
        let good_point = first_string(entry.get("improvements"));
        let improvement_area = first_string(entry.get("issues"));
        remapped.push(CategoryFeedback::new(score, good_point, improvement_area));
    }

    let [format, content_quality, skills_presentation, ats_compatibility]: [CategoryFeedback; 4] =
        remapped.try_into().ok()?;

    // The alternate schema predates the roast persona, so it only ever
    // carries one review. It fills the genuine half; the roast half comes
    // from the fixed fallback.
    let genuine = PersonaFeedback {
        overall_review: value
            .get("overall_review")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        format,
        content_quality,
        skills_presentation,
        ats_compatibility,
    };

    Some(AnalysisResult {
        genuine,
        roast: fallback().roast,
    })
}

fn first_string(list: Option<&Value>) -> String {
    list.and_then(Value::as_array)
        .and_then(|items| items.first())
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// The fixed response returned when the provider call fails or its output
/// cannot be validated. Always passes `validate`.
pub fn fallback() -> AnalysisResult {
    AnalysisResult {
        genuine: PersonaFeedback {
            overall_review: "A solid resume with room to grow.".to_string(),
            format: CategoryFeedback::new(7.0, "Clean layout", "Add more spacing"),
            content_quality: CategoryFeedback::new(7.0, "Good experience details", "Add more metrics"),
            skills_presentation: CategoryFeedback::new(
                7.0,
                "Clear skill sections",
                "Prioritize relevant skills",
            ),
            ats_compatibility: CategoryFeedback::new(7.0, "Good keyword usage", "Add more industry terms"),
        },
        roast: PersonaFeedback {
            overall_review: "The roast machine jammed. Consider yourself spared, for now.".to_string(),
            format: CategoryFeedback::new(
                7.0,
                "At least it fits on a page",
                "The margins are doing the heavy lifting",
            ),
            content_quality: CategoryFeedback::new(
                7.0,
                "Words, and plenty of them",
                "Numbers would make the words believable",
            ),
            skills_presentation: CategoryFeedback::new(
                7.0,
                "An impressive list of things you once clicked on",
                "Cut everything you could not survive an interview question about",
            ),
            ats_compatibility: CategoryFeedback::new(
                7.0,
                "The robots can read it",
                "The robots are not impressed yet",
            ),
        },
    }
}
