mod advisor;
mod config;
mod errors;
mod knowledge;
mod llm_client;
mod mailer;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::advisor::session::SessionStore;
use crate::config::Config;
use crate::knowledge::loader::load_knowledge_base;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::mailer::{MailSender, SmtpMailer};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Careguide API v{}", env!("CARGO_PKG_VERSION"));

    // Static knowledge: loaded once, never fails the process
    let knowledge = load_knowledge_base(&config.data_dir, &config.hospice_fallback_dir);
    for error in &knowledge.load_errors {
        warn!("Knowledge load error: {error}");
    }

    // Initialize LLM client (optional; flows return a notice without it)
    let llm: Option<Arc<dyn TextGenerator>> = match &config.google_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(client))
        }
        None => {
            warn!("GOOGLE_API_KEY not set; AI replies are disabled");
            None
        }
    };

    // Initialize SMTP mailer (optional)
    let mailer: Option<Arc<dyn MailSender>> = match &config.smtp {
        Some(smtp) => {
            let mailer = SmtpMailer::new(smtp)?;
            info!("SMTP mailer initialized ({}:{})", smtp.host, smtp.port);
            Some(Arc::new(mailer))
        }
        None => {
            info!("SMTP not configured; email delivery is disabled");
            None
        }
    };

    let state = AppState {
        knowledge: Arc::new(knowledge),
        llm,
        mailer,
        sessions: SessionStore::with_max_sessions(config.max_sessions),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the deployed front-end origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
