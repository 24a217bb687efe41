//! Resume Roaster Service
//!
//! A Rust service that extracts text from uploaded resumes (PDF/DOCX) and
//! asks an LLM for structured per-category feedback in two tones: a genuine
//! professional review and a humorous roast.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
