pub mod analyzer;
pub mod extractor;
pub mod gemini;
pub mod normalizer;
pub mod parser;
pub mod prompt;

pub use analyzer::ResumeAnalyzer;
pub use extractor::TextExtractor;
pub use gemini::{GeminiClient, ProviderError, TextGenerator};
pub use prompt::{GenerationConfig, PromptBuilder, PromptSpec};
