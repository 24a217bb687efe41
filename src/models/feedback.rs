use serde::{Deserialize, Serialize};

/// Score plus commentary for a single scoring category.
///
/// Scores are stored as `f64`: the provider is asked for integers but the
/// validator deliberately accepts fractional values in [0, 10], so a model
/// that returns `8.5` is not punished with a fallback response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryFeedback {
    pub score: f64,
    #[serde(default)]
    pub good_point: String,
    #[serde(default)]
    pub improvement_area: String,
}

impl CategoryFeedback {
    pub fn new(score: f64, good_point: impl Into<String>, improvement_area: impl Into<String>) -> Self {
        Self {
            score,
            good_point: good_point.into(),
            improvement_area: improvement_area.into(),
        }
    }
}

/// One complete review in a single tone: an overall one-liner plus the four
/// fixed scoring categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaFeedback {
    #[serde(default)]
    pub overall_review: String,
    pub format: CategoryFeedback,
    pub content_quality: CategoryFeedback,
    pub skills_presentation: CategoryFeedback,
    pub ats_compatibility: CategoryFeedback,
}

/// The canonical analysis shape: both personas, always.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub genuine: PersonaFeedback,
    pub roast: PersonaFeedback,
}

/// Wire wrapper returned by `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: AnalysisResult,
}

impl AnalyzeResponse {
    pub fn new(analysis: AnalysisResult) -> Self {
        Self { analysis }
    }
}
