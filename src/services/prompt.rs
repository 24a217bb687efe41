use serde::Serialize;

use crate::models::AnalysisMode;

/// Sampling parameters sent alongside the prompt. Serialized field names
/// match the provider's `generationConfig` wire format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

/// A fully built prompt plus the generation parameters to call it with.
#[derive(Debug, Clone)]
pub struct PromptSpec {
    pub prompt: String,
    pub generation: GenerationConfig,
}

const GENUINE_DIRECTIVE: &str = "Put most of your care into the genuine review: \
professional, structured, constructive feedback that mentions strengths and \
areas for improvement in a positive manner.";

const ROAST_DIRECTIVE: &str = "Put most of your care into the roast: brutally \
honest, sarcastic, and funny. Make jokes, but ensure the feedback is still useful.";

const DUAL_DIRECTIVE: &str = "Give equal care to both the genuine review and the roast.";

// The dual-persona request is noticeably longer than a single review, so it
// gets the widened output budget.
const MAX_OUTPUT_TOKENS_DUAL: u32 = 8192;
const MAX_OUTPUT_TOKENS_SINGLE: u32 = 4096;

/// Builds the analysis prompt for the provider.
///
/// Every prompt requests the full dual-persona JSON contract so the response
/// always has one fixed shape; the mode only steers which tone the model is
/// told to put its effort into, and how much output budget it gets.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(
        &self,
        resume_text: &str,
        mode: AnalysisMode,
        user_description: Option<&str>,
    ) -> PromptSpec {
        let (directive, max_output_tokens) = match mode {
            AnalysisMode::Genuine => (GENUINE_DIRECTIVE, MAX_OUTPUT_TOKENS_SINGLE),
            AnalysisMode::Roast => (ROAST_DIRECTIVE, MAX_OUTPUT_TOKENS_SINGLE),
            AnalysisMode::Both => (DUAL_DIRECTIVE, MAX_OUTPUT_TOKENS_DUAL),
        };

        let description_block = match user_description {
            Some(desc) if !desc.trim().is_empty() => {
                format!("About the candidate (their own words): {}\n\n", desc.trim())
            }
            _ => String::new(),
        };

        // The resume text goes in verbatim, never truncated.
        let prompt = format!(
            r#"You are a resume analyzer. Analyze this resume and provide feedback in both professional and humorous ways.
{directive}

{description_block}Resume Text:
{resume_text}

Provide your analysis in this exact JSON format:
{{
    "genuine": {{
        "overall_review": "Brief professional summary of the resume",
        "format": {{
            "score": 7,
            "good_point": "professional positive feedback about format",
            "improvement_area": "professional suggestion for improvement"
        }},
        "content_quality": {{
            "score": 7,
            "good_point": "professional positive feedback about content",
            "improvement_area": "professional suggestion for content"
        }},
        "skills_presentation": {{
            "score": 7,
            "good_point": "professional positive feedback about skills",
            "improvement_area": "professional suggestion for skills"
        }},
        "ats_compatibility": {{
            "score": 7,
            "good_point": "professional positive feedback about ATS",
            "improvement_area": "professional suggestion for ATS"
        }}
    }},
    "roast": {{
        "overall_review": "Humorous one-liner about the resume",
        "format": {{
            "score": anything between 0-10,
            "good_point": "humorous positive feedback about format",
            "improvement_area": "humorous suggestion for improvement"
        }},
        "content_quality": {{
            "score": anything between 0-10,
            "good_point": "humorous positive feedback about content",
            "improvement_area": "humorous suggestion for content"
        }},
        "skills_presentation": {{
            "score": anything between 0-10,
            "good_point": "humorous positive feedback about skills",
            "improvement_area": "humorous suggestion for skills"
        }},
        "ats_compatibility": {{
            "score": anything between 0-10,
            "good_point": "humorous positive feedback about ATS",
            "improvement_area": "humorous suggestion for ATS"
        }}
    }}
}}

Keep scores between 0-10, feedback concise, and overall_review under 100 characters."#
        );

        PromptSpec {
            prompt,
            generation: GenerationConfig {
                temperature: 0.7,
                top_p: 0.95,
                top_k: 40,
                max_output_tokens,
            },
        }
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resume_text_is_embedded_verbatim() {
        let text = "Jane Doe\nRust developer since 2015\nLikes long walks through borrow checker errors";
        let spec = PromptBuilder::new().build(text, AnalysisMode::Both, None);
        assert!(spec.prompt.contains(text));
    }

    #[test]
    fn user_description_is_included_when_present() {
        let spec = PromptBuilder::new().build(
            "resume body",
            AnalysisMode::Both,
            Some("Recent graduate looking for a backend role"),
        );
        assert!(spec.prompt.contains("Recent graduate looking for a backend role"));

        let spec = PromptBuilder::new().build("resume body", AnalysisMode::Both, Some("   "));
        assert!(!spec.prompt.contains("About the candidate"));
    }

    #[test]
    fn prompt_spells_out_the_output_contract() {
        let spec = PromptBuilder::new().build("text", AnalysisMode::Both, None);
        for key in [
            "\"genuine\"",
            "\"roast\"",
            "\"overall_review\"",
            "\"format\"",
            "\"content_quality\"",
            "\"skills_presentation\"",
            "\"ats_compatibility\"",
        ] {
            assert!(spec.prompt.contains(key), "prompt missing {key}");
        }
        assert!(spec.prompt.contains("between 0-10"));
        assert!(spec.prompt.contains("under 100 characters"));
    }

    #[test]
    fn dual_mode_widens_the_output_budget() {
        let both = PromptBuilder::new().build("text", AnalysisMode::Both, None);
        let single = PromptBuilder::new().build("text", AnalysisMode::Roast, None);
        assert_eq!(both.generation.max_output_tokens, 8192);
        assert_eq!(single.generation.max_output_tokens, 4096);
        assert!(both.generation.max_output_tokens > single.generation.max_output_tokens);
    }

    #[test]
    fn generation_config_serializes_to_provider_field_names() {
        let spec = PromptBuilder::new().build("text", AnalysisMode::Both, None);
        let json = serde_json::to_value(&spec.generation).unwrap();
        assert_eq!(json["temperature"], 0.7);
        assert_eq!(json["topP"], 0.95);
        assert_eq!(json["topK"], 40);
        assert_eq!(json["maxOutputTokens"], 8192);
    }
}
