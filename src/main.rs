use std::env;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use resume_roaster::config::Config;
use resume_roaster::handlers::{analyze_handler, analyze_health_handler, health_handler};
use resume_roaster::services::{GeminiClient, ResumeAnalyzer};
use resume_roaster::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "resume_roaster=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!("Starting Resume Roaster Service");
    tracing::info!("Max file size: {}MB", config.max_file_size_mb);
    tracing::info!("Provider model: {}", config.gemini_model);

    let gemini = GeminiClient::new(&config)?;
    let analyzer = ResumeAnalyzer::new(Arc::new(gemini));
    let state = AppState::new(config.clone(), analyzer);

    // Build our application with routes
    let app = Router::new()
        .route("/analyze", get(analyze_health_handler).post(analyze_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(config.max_file_size_mb * 1024 * 1024)),
        )
        .with_state(state);

    // Determine port from environment (platform compatibility)
    let port = env::var("PORT")
        .unwrap_or_else(|_| config.server_port.to_string())
        .parse::<u16>()
        .unwrap_or(config.server_port);

    let addr = format!("{}:{}", config.server_host, port);

    tracing::info!("Server listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
