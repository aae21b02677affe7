mod alerts;
mod auth;
mod companies;
mod config;
mod dashboard;
mod db;
mod errors;
mod extract;
mod jobs;
mod mailer;
mod matching;
mod models;
mod resumes;
mod routes;
mod seed;
mod state;
mod storage;
mod validation;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::auth::token::TokenSigner;
use crate::config::Config;
use crate::db::create_pool;
use crate::mailer::{DisabledMailer, Mailer, RelayMailer};
use crate::matching::SkillVocabulary;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::ResumeStorage;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting RoleRocket API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize S3 / MinIO
    let storage = match &config.storage {
        Some(storage_config) => {
            let storage = ResumeStorage::from_config(storage_config).await;
            info!("S3 client initialized (bucket: {})", storage_config.bucket);
            Some(storage)
        }
        None => {
            warn!("S3 is not configured; resume files will not be stored");
            None
        }
    };

    // Initialize mail relay
    let mailer: Arc<dyn Mailer> = match &config.mail {
        Some(mail_config) => {
            info!("Mail relay initialized ({})", mail_config.relay_url);
            Arc::new(RelayMailer::new(mail_config)?)
        }
        None => Arc::new(DisabledMailer),
    };

    if config.seed_jobs {
        seed::seed_jobs_if_empty(&db).await?;
    }
    if let Some(admin) = &config.admin {
        seed::ensure_admin(&db, admin).await?;
    }

    let vocabulary = SkillVocabulary::baseline();
    info!("Skill vocabulary loaded ({} terms)", vocabulary.len());

    let state = AppState {
        db,
        storage,
        mailer,
        tokens: Arc::new(TokenSigner::new(&config.auth_secret)),
        vocabulary: Arc::new(vocabulary),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS origins to APP_BASE_URL

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
