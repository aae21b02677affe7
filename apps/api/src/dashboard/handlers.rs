//! Axum route handlers for the dashboards.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::AuthUser;
use crate::dashboard::metrics::{employer_metrics, top_matches, EmployerMetrics};
use crate::errors::AppError;
use crate::jobs::queries::{company_listings, latest_listings};
use crate::matching::RankedJob;
use crate::models::application::{ApplicantRow, CandidateApplicationRow};
use crate::models::company::CompanyRow;
use crate::models::job::{JobListingRow, JOB_LISTING_SELECT};
use crate::models::resume::ResumeRow;
use crate::models::user::{PublicUser, Role, UserRow};
use crate::resumes::handlers::{MATCH_POOL_SIZE, TOP_MATCHES};
use crate::resumes::queries::latest_resume;
use crate::state::AppState;

const CANDIDATE_LIST_LIMIT: i64 = 6;
const EMPLOYER_APPLICANT_LIMIT: i64 = 8;
const ADMIN_LIST_LIMIT: i64 = 20;

#[derive(Debug, Serialize)]
pub struct CandidateDashboard {
    pub resume: Option<ResumeRow>,
    /// Skills found in the latest resume, out of `total_skills` vocabulary terms.
    pub matched_skills: usize,
    pub total_skills: usize,
    pub saved_jobs: Vec<JobListingRow>,
    pub applications: Vec<CandidateApplicationRow>,
    pub top_matches: Vec<RankedJob<JobListingRow>>,
}

#[derive(Debug, Serialize)]
pub struct EmployerDashboard {
    pub company: Option<CompanyRow>,
    pub jobs: Vec<JobListingRow>,
    pub recent_applicants: Vec<ApplicantRow>,
    pub metrics: EmployerMetrics,
}

#[derive(Debug, Serialize)]
pub struct AdminDashboard {
    pub users: Vec<PublicUser>,
    pub companies: Vec<CompanyRow>,
    pub jobs: Vec<JobListingRow>,
    pub total_applications: i64,
}

/// GET /api/dashboard/candidate
pub async fn handle_candidate_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<CandidateDashboard>, AppError> {
    auth.require(&[Role::Candidate])?;
    let user_id = auth.id();

    let resume = latest_resume(&state.db, user_id).await?;

    let saved_jobs = sqlx::query_as::<_, JobListingRow>(&format!(
        r#"{JOB_LISTING_SELECT}
        JOIN saved_jobs s ON s.job_id = j.id
        WHERE s.user_id = $1
        ORDER BY s.created_at DESC
        LIMIT $2"#
    ))
    .bind(user_id)
    .bind(CANDIDATE_LIST_LIMIT)
    .fetch_all(&state.db)
    .await?;

    let applications = sqlx::query_as::<_, CandidateApplicationRow>(
        r#"
        SELECT ap.*, j.title AS job_title, c.name AS company_name
        FROM applications ap
        JOIN jobs j ON j.id = ap.job_id
        LEFT JOIN companies c ON c.id = j.company_id
        WHERE ap.user_id = $1
        ORDER BY ap.created_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(CANDIDATE_LIST_LIMIT)
    .fetch_all(&state.db)
    .await?;

    let jobs = latest_listings(&state.db, MATCH_POOL_SIZE).await?;
    let top_matches = top_matches(
        jobs,
        resume.as_ref().map(|r| r.skills.as_slice()),
        TOP_MATCHES,
    );

    Ok(Json(CandidateDashboard {
        matched_skills: resume.as_ref().map_or(0, |r| r.skills.len()),
        total_skills: state.vocabulary.len(),
        resume,
        saved_jobs,
        applications,
        top_matches,
    }))
}

/// GET /api/dashboard/employer
pub async fn handle_employer_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<EmployerDashboard>, AppError> {
    let company_id = auth.company_id()?;

    let company = sqlx::query_as::<_, CompanyRow>("SELECT * FROM companies WHERE id = $1")
        .bind(company_id)
        .fetch_optional(&state.db)
        .await?;

    let jobs = company_listings(&state.db, company_id).await?;

    let recent_applicants = sqlx::query_as::<_, ApplicantRow>(
        r#"
        SELECT ap.*, u.name AS applicant_name, u.email AS applicant_email, j.title AS job_title
        FROM applications ap
        JOIN jobs j ON j.id = ap.job_id
        JOIN users u ON u.id = ap.user_id
        WHERE j.company_id = $1
        ORDER BY ap.created_at DESC
        LIMIT $2
        "#,
    )
    .bind(company_id)
    .bind(EMPLOYER_APPLICANT_LIMIT)
    .fetch_all(&state.db)
    .await?;

    let metrics = employer_metrics(&jobs);

    Ok(Json(EmployerDashboard {
        company,
        jobs,
        recent_applicants,
        metrics,
    }))
}

/// GET /api/dashboard/admin
pub async fn handle_admin_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<AdminDashboard>, AppError> {
    auth.require(&[Role::Admin])?;

    let users = sqlx::query_as::<_, UserRow>(
        "SELECT * FROM users ORDER BY created_at DESC LIMIT $1",
    )
    .bind(ADMIN_LIST_LIMIT)
    .fetch_all(&state.db)
    .await?;

    let companies = sqlx::query_as::<_, CompanyRow>(
        "SELECT * FROM companies ORDER BY created_at DESC LIMIT $1",
    )
    .bind(ADMIN_LIST_LIMIT)
    .fetch_all(&state.db)
    .await?;

    let jobs = latest_listings(&state.db, ADMIN_LIST_LIMIT).await?;

    let total_applications: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM applications")
        .fetch_one(&state.db)
        .await?;

    Ok(Json(AdminDashboard {
        users: users.iter().map(PublicUser::from).collect(),
        companies,
        jobs,
        total_applications,
    }))
}
