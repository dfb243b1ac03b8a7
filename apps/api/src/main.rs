mod config;
mod errors;
mod feedback;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::feedback::pipeline::FeedbackService;
use crate::feedback::prompt_builder::PromptBuilder;
use crate::llm_client::{
    GenerationParameters, InferenceClient, InferenceConfig, LocalModel, TextGenerator,
};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting FeedbackCraft API v{}", env!("CARGO_PKG_VERSION"));

    let prompt_builder = PromptBuilder::load(&config.prompt_template_path);
    info!(
        "Master prompt ready ({} characters)",
        prompt_builder.master_prompt().chars().count()
    );

    let generator: Arc<dyn TextGenerator> = if config.use_local_model {
        info!("Local model mode: every request is served by the rule-based fallback");
        Arc::new(LocalModel)
    } else {
        let client = InferenceClient::new(InferenceConfig::from_config(&config))?;
        info!(
            "Inference client initialized (model: {}, endpoint: {}, credential: {})",
            config.model_name,
            client.endpoint(),
            if config.api_key.is_some() { "set" } else { "unset" }
        );
        Arc::new(client)
    };

    let state = AppState {
        feedback: FeedbackService::new(
            prompt_builder,
            generator,
            GenerationParameters::from_config(&config),
            config.request_deadline(),
        ),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
