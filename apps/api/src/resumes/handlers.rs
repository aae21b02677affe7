//! Axum route handlers for the Resume API.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::{ApiMultipart, ApiPath};
use crate::jobs::queries::{fetch_listing, latest_listings};
use crate::matching::{
    extract_skills, rank_jobs, resume_feedback, rocket_score, RankedJob, ResumeFeedback,
    SkillVocabulary,
};
use crate::models::job::JobListingRow;
use crate::models::resume::ResumeRow;
use crate::models::user::Role;
use crate::resumes::pdf::{extract_text, is_pdf_content_type};
use crate::resumes::queries::{insert_resume, latest_resume};
use crate::state::AppState;

/// How many recent jobs are ranked against a resume.
pub const MATCH_POOL_SIZE: i64 = 20;
/// How many ranked jobs are returned.
pub const TOP_MATCHES: usize = 5;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub resume: ResumeRow,
}

#[derive(Debug, Serialize)]
pub struct MatchesResponse {
    pub matches: Vec<RankedJob<JobListingRow>>,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub job_id: Uuid,
    pub rocket_score: u32,
    pub feedback: ResumeFeedback,
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Pulls the `file` part out of the multipart body, insisting on a PDF.
async fn read_pdf_field(multipart: &mut Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        if !is_pdf_content_type(field.content_type()) {
            return Err(AppError::Validation(
                "Only PDF resumes are supported".to_string(),
            ));
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid file: {e}")))?;
        if data.is_empty() {
            break;
        }
        return Ok(data);
    }
    Err(AppError::Validation("No file uploaded".to_string()))
}

/// Uploads to object storage when configured. Failures never block the
/// upload: the resume is stored with an empty URL instead.
async fn store_pdf(state: &AppState, user_id: Uuid, pdf: Bytes) -> String {
    let Some(storage) = &state.storage else {
        warn!("Object storage is not configured; storing resume without URL");
        return String::new();
    };
    match storage.upload_resume(user_id, pdf).await {
        Ok(url) => url,
        Err(e) => {
            error!("Resume upload failed, storing without URL: {e}");
            String::new()
        }
    }
}

/// Skills found in resume text, and the resume's own Rocket Score: its
/// coverage of the whole vocabulary.
pub(crate) fn resume_score(text: &str, vocabulary: &SkillVocabulary) -> (Vec<String>, u32) {
    let skills = extract_skills(text, vocabulary);
    let score = rocket_score(&skills, vocabulary.terms());
    (skills, score)
}

async fn require_latest_resume(state: &AppState, user_id: Uuid) -> Result<ResumeRow, AppError> {
    latest_resume(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No resume uploaded yet".to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/resume/upload
pub async fn handle_upload(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiMultipart(mut multipart): ApiMultipart,
) -> Result<(StatusCode, Json<ResumeResponse>), AppError> {
    auth.require(&[Role::Candidate])?;

    let pdf = read_pdf_field(&mut multipart).await?;
    let text = extract_text(pdf.clone()).await?;

    let (skills, score) = resume_score(&text, &state.vocabulary);

    let url = store_pdf(&state, auth.id(), pdf).await;
    let resume = insert_resume(&state.db, auth.id(), &text, &skills, score as i32, &url).await?;

    info!(
        user_id = %auth.id(),
        skills = skills.len(),
        rocket_score = score,
        "Resume processed"
    );

    Ok((StatusCode::CREATED, Json(ResumeResponse { resume })))
}

/// GET /api/resume
pub async fn handle_get_resume(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ResumeResponse>, AppError> {
    auth.require(&[Role::Candidate])?;
    let resume = require_latest_resume(&state, auth.id()).await?;
    Ok(Json(ResumeResponse { resume }))
}

/// GET /api/resume/matches
///
/// Ranks the newest jobs against the latest resume; ties stay newest-first.
pub async fn handle_matches(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MatchesResponse>, AppError> {
    auth.require(&[Role::Candidate])?;
    let resume = require_latest_resume(&state, auth.id()).await?;

    let jobs = latest_listings(&state.db, MATCH_POOL_SIZE).await?;
    let mut matches = rank_jobs(jobs, &resume.skills);
    matches.truncate(TOP_MATCHES);

    Ok(Json(MatchesResponse { matches }))
}

/// GET /api/resume/feedback/:job_id
pub async fn handle_feedback(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(job_id): ApiPath<Uuid>,
) -> Result<Json<FeedbackResponse>, AppError> {
    auth.require(&[Role::Candidate])?;

    let job = fetch_listing(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;
    let resume = require_latest_resume(&state, auth.id()).await?;

    Ok(Json(FeedbackResponse {
        job_id,
        rocket_score: rocket_score(&resume.skills, &job.job.skills),
        feedback: resume_feedback(&resume.skills, &job.job.skills),
    }))
}
