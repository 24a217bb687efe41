pub mod analyze;
pub mod health;

pub use analyze::analyze_handler;
pub use health::{analyze_health_handler, health_handler};
