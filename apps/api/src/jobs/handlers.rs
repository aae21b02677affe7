//! Axum route handlers for the Jobs API.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::{Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

use crate::alerts::dispatch::spawn_job_alerts;
use crate::auth::AuthUser;
use crate::errors::{is_foreign_key_violation, is_unique_violation, AppError};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::jobs::queries::{fetch_listing, insert_job, record_view, NewJob};
use crate::jobs::search::{total_pages, JobSearchParams, PAGE_SIZE};
use crate::matching::rocket_score;
use crate::models::application::{ApplicationRow, SavedJobRow};
use crate::models::company::CompanyRow;
use crate::models::job::{JobListingRow, JobRow, JOB_LISTING_SELECT};
use crate::models::resume::ResumeRow;
use crate::models::user::Role;
use crate::resumes::queries::latest_resume;
use crate::state::AppState;
use crate::validation::{check_len, check_non_negative};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListResponse {
    pub jobs: Vec<JobListingRow>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub job_type: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub job: JobListingRow,
}

#[derive(Debug, Serialize)]
pub struct JobDetailResponse {
    pub job: JobListingRow,
    pub company: Option<CompanyRow>,
}

#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    pub application: ApplicationRow,
}

#[derive(Debug, Serialize)]
pub struct SavedJobResponse {
    pub saved: SavedJobRow,
}

impl CreateJobRequest {
    /// Validates field lengths and trims skills into a `NewJob`.
    pub(crate) fn validate(self) -> Result<NewJob, AppError> {
        check_len("title", &self.title, 3, None)?;
        check_len("description", &self.description, 20, None)?;
        check_len("location", &self.location, 2, None)?;
        check_len("jobType", &self.job_type, 2, None)?;
        check_non_negative("salaryMin", self.salary_min)?;
        check_non_negative("salaryMax", self.salary_max)?;

        let skills: Vec<String> = self.skills.iter().map(|s| s.trim().to_string()).collect();
        if skills.is_empty() {
            return Err(AppError::Validation(
                "skills must contain at least one skill".to_string(),
            ));
        }
        if skills.iter().any(|s| s.is_empty()) {
            return Err(AppError::Validation("skills must not be blank".to_string()));
        }

        Ok(NewJob {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            location: self.location.trim().to_string(),
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            job_type: self.job_type.trim().to_string(),
            skills,
        })
    }
}

/// Score stored on an application. Candidates without a resume get none.
pub(crate) fn application_score(resume: Option<&ResumeRow>, job: &JobRow) -> Option<i32> {
    resume.map(|r| rocket_score(&r.skills, &job.skills) as i32)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<JobSearchParams>,
) -> Result<Json<JobListResponse>, AppError> {
    let mut count = QueryBuilder::<Postgres>::new(
        "SELECT COUNT(*) FROM jobs j LEFT JOIN companies c ON c.id = j.company_id",
    );
    params.push_filters(&mut count);
    let total: i64 = count.build_query_scalar::<i64>().fetch_one(&state.db).await?;

    let mut select = QueryBuilder::<Postgres>::new(JOB_LISTING_SELECT);
    params.push_filters(&mut select);
    select
        .push(" ORDER BY j.created_at DESC LIMIT ")
        .push_bind(PAGE_SIZE)
        .push(" OFFSET ")
        .push_bind(params.offset());
    let jobs = select
        .build_query_as::<JobListingRow>()
        .fetch_all(&state.db)
        .await?;

    Ok(Json(JobListResponse {
        jobs,
        total,
        page: params.page(),
        page_size: PAGE_SIZE,
        total_pages: total_pages(total),
    }))
}

/// POST /api/jobs
///
/// Employer-only. Subscribers whose alerts match the new job are emailed in
/// the background; the response never waits on mail delivery.
pub async fn handle_create_job(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(request): ApiJson<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobResponse>), AppError> {
    let company_id = auth.company_id()?;
    let new_job = request.validate()?;

    let mut tx = state.db.begin().await?;
    let job = insert_job(&mut *tx, company_id, &new_job).await?;
    tx.commit().await?;

    info!("Employer {} posted job {}", auth.id(), job.id);

    let listing = fetch_listing(&state.db, job.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", job.id)))?;

    spawn_job_alerts(state.clone(), listing.clone());

    Ok((StatusCode::CREATED, Json(JobResponse { job: listing })))
}

/// GET /api/jobs/:id
///
/// Counts a view on every fetch.
pub async fn handle_get_job(
    State(state): State<AppState>,
    ApiPath(job_id): ApiPath<Uuid>,
) -> Result<Json<JobDetailResponse>, AppError> {
    // A job deleted mid-request surfaces as no row or as a FK violation.
    let recorded = record_view(&state.db, job_id).await.or_else(|e| {
        if is_foreign_key_violation(&e) {
            Ok(false)
        } else {
            Err(AppError::Database(e))
        }
    })?;
    if !recorded {
        return Err(AppError::NotFound("Job not found".to_string()));
    }

    let job = fetch_listing(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    let company = sqlx::query_as::<_, CompanyRow>("SELECT * FROM companies WHERE id = $1")
        .bind(job.job.company_id)
        .fetch_optional(&state.db)
        .await?;

    Ok(Json(JobDetailResponse { job, company }))
}

/// POST /api/jobs/:id/apply
///
/// Candidate-only. The application records the Rocket Score of the job
/// against the candidate's latest resume, or no score without a resume.
pub async fn handle_apply(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(job_id): ApiPath<Uuid>,
) -> Result<(StatusCode, Json<ApplicationResponse>), AppError> {
    auth.require(&[Role::Candidate])?;

    let job = fetch_listing(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    let resume = latest_resume(&state.db, auth.id()).await?;
    let rocket = application_score(resume.as_ref(), &job.job);

    let mut tx = state.db.begin().await?;

    let application = sqlx::query_as::<_, ApplicationRow>(
        "INSERT INTO applications (user_id, job_id, rocket_score) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(auth.id())
    .bind(job_id)
    .bind(rocket)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict("You have already applied to this job".to_string())
        } else if is_foreign_key_violation(&e) {
            AppError::NotFound("Job not found".to_string())
        } else {
            AppError::Database(e)
        }
    })?;

    sqlx::query(
        r#"
        INSERT INTO job_analytics (job_id, applications) VALUES ($1, 1)
        ON CONFLICT (job_id) DO UPDATE SET applications = job_analytics.applications + 1
        "#,
    )
    .bind(job_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    info!("Candidate {} applied to job {job_id} (score {:?})", auth.id(), rocket);

    Ok((StatusCode::CREATED, Json(ApplicationResponse { application })))
}

/// POST /api/jobs/:id/save
///
/// Candidate-only and idempotent.
pub async fn handle_save_job(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(job_id): ApiPath<Uuid>,
) -> Result<Json<SavedJobResponse>, AppError> {
    auth.require(&[Role::Candidate])?;

    let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(&state.db)
        .await?;
    if exists.is_none() {
        return Err(AppError::NotFound("Job not found".to_string()));
    }

    let saved = sqlx::query_as::<_, SavedJobRow>(
        r#"
        INSERT INTO saved_jobs (user_id, job_id) VALUES ($1, $2)
        ON CONFLICT (user_id, job_id) DO UPDATE SET user_id = EXCLUDED.user_id
        RETURNING *
        "#,
    )
    .bind(auth.id())
    .bind(job_id)
    .fetch_one(&state.db)
    .await
    .map_err(|e| {
        if is_foreign_key_violation(&e) {
            AppError::NotFound("Job not found".to_string())
        } else {
            AppError::Database(e)
        }
    })?;

    Ok(Json(SavedJobResponse { saved }))
}

/// DELETE /api/admin/jobs/:id
pub async fn handle_admin_delete_job(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(job_id): ApiPath<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require(&[Role::Admin])?;

    let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(job_id)
        .execute(&state.db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Job not found".to_string()));
    }

    info!("Admin {} deleted job {job_id}", auth.id());
    Ok(Json(serde_json::json!({ "success": true })))
}
