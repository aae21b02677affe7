use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::token::TokenSigner;
use crate::config::Config;
use crate::mailer::Mailer;
use crate::matching::SkillVocabulary;
use crate::storage::ResumeStorage;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// `None` when S3 is not configured; uploads then keep an empty URL.
    pub storage: Option<ResumeStorage>,
    /// Alert email sink. `DisabledMailer` when no relay is configured.
    pub mailer: Arc<dyn Mailer>,
    pub tokens: Arc<TokenSigner>,
    /// Terms resumes are scanned for. Baseline vocabulary by default.
    pub vocabulary: Arc<SkillVocabulary>,
    pub config: Config,
}
