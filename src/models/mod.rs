pub mod feedback;
pub mod request;

pub use feedback::{AnalysisResult, AnalyzeResponse, CategoryFeedback, PersonaFeedback};
pub use request::{AnalysisMode, AnalyzeTextRequest, DocumentFormat, UploadedDocument};
