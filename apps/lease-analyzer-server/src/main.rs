//! Lease Analyzer Server
//!
//! Accepts an uploaded residential lease, asks a language model to review
//! it against a state-specific compliance checklist, and returns the
//! findings as markdown plus text and PDF downloads. Provides:
//!
//! - `POST /api/analyze` (one free analysis per email)
//! - `GET /api/sample` (canned demo report)
//! - `GET /api/jurisdictions`
//! - `GET /health`
//!
//! Uploaded leases are processed in memory and never stored.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use analysis_client::{
    CompletionProvider, GenerationParams, OpenAiConfig, OpenAiProvider, DEFAULT_ENDPOINT,
};
use anyhow::Context;
use clap::Parser;
use compliance_engine::Catalog;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use usage_guard::{GuardPolicy, MemoryStore, SheetDbStore, UsageStore};

mod api;
mod error;
mod pipeline;
mod state;

use state::AppState;

/// Command-line arguments for the lease analyzer server
#[derive(Parser, Debug)]
#[command(name = "lease-analyzer-server")]
#[command(about = "Lease compliance analysis server")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Rate limit: requests per second per IP
    #[arg(long, env = "RATE_LIMIT", default_value = "2")]
    rate_limit: u32,

    /// Chat model used for analysis
    #[arg(long, env = "ANALYSIS_MODEL", default_value = "gpt-4")]
    model: String,

    #[arg(long, env = "ANALYSIS_TEMPERATURE", default_value = "0.2")]
    temperature: f32,

    #[arg(long, env = "ANALYSIS_MAX_TOKENS", default_value = "800")]
    max_tokens: u32,

    /// Analysis request timeout in seconds
    #[arg(long, env = "ANALYSIS_TIMEOUT_SECS", default_value = "120")]
    analysis_timeout_secs: u64,

    /// Base URL of the chat-completions API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_ENDPOINT)]
    openai_base_url: String,

    /// SheetDB endpoint for usage records; in-memory when unset
    #[arg(long, env = "USAGE_STORE_URL")]
    usage_store_url: Option<String>,

    /// Block analyses when the usage store cannot be read
    #[arg(long, env = "USAGE_FAIL_CLOSED")]
    usage_fail_closed: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting lease analyzer server on {}:{}", args.host, args.port);

    Catalog::validate().context("rule catalog is incomplete")?;

    let api_key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?;
    let provider: Arc<dyn CompletionProvider> = Arc::new(OpenAiProvider::new(OpenAiConfig {
        endpoint: args.openai_base_url.clone(),
        api_key,
        params: GenerationParams {
            model: args.model.clone(),
            temperature: args.temperature,
            max_tokens: args.max_tokens,
        },
        timeout: Duration::from_secs(args.analysis_timeout_secs),
    })?);

    let store: Arc<dyn UsageStore> = match &args.usage_store_url {
        Some(url) => Arc::new(SheetDbStore::new(url.clone())?),
        None => {
            warn!("USAGE_STORE_URL not set; usage records are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };
    let policy = GuardPolicy {
        fail_open: !args.usage_fail_closed,
    };

    let state = AppState::new(provider, store, policy);

    // Create rate limiter configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit * 2)
            .finish()
            .context("Failed to create rate limiter config")?,
    );

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::router(state)
        .layer(GovernorLayer {
            config: governor_conf,
        })
        .layer(cors);

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!(
        "Analysis model: {} (timeout {}s)",
        args.model, args.analysis_timeout_secs
    );
    info!("Usage guard fail-open: {}", policy.fail_open);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
