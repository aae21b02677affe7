//! Job persistence shared by handlers, dashboards and seeding.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::job::{JobListingRow, JobRow, JOB_LISTING_SELECT};

/// Validated input for a new job posting.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub job_type: String,
    pub skills: Vec<String>,
}

/// Inserts a job together with its zeroed analytics row.
pub async fn insert_job(
    conn: &mut PgConnection,
    company_id: Uuid,
    job: &NewJob,
) -> Result<JobRow, sqlx::Error> {
    let row = sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs
            (company_id, title, description, location, salary_min, salary_max, job_type, skills)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(company_id)
    .bind(&job.title)
    .bind(&job.description)
    .bind(&job.location)
    .bind(job.salary_min)
    .bind(job.salary_max)
    .bind(&job.job_type)
    .bind(&job.skills)
    .fetch_one(&mut *conn)
    .await?;

    sqlx::query("INSERT INTO job_analytics (job_id) VALUES ($1)")
        .bind(row.id)
        .execute(&mut *conn)
        .await?;

    Ok(row)
}

/// Counts one view. Returns false when the job does not exist.
pub async fn record_view(pool: &PgPool, job_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO job_analytics (job_id, views)
        SELECT id, 1 FROM jobs WHERE id = $1
        ON CONFLICT (job_id) DO UPDATE SET views = job_analytics.views + 1
        "#,
    )
    .bind(job_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn fetch_listing(pool: &PgPool, job_id: Uuid) -> Result<Option<JobListingRow>, sqlx::Error> {
    sqlx::query_as::<_, JobListingRow>(&format!("{JOB_LISTING_SELECT} WHERE j.id = $1"))
        .bind(job_id)
        .fetch_optional(pool)
        .await
}

/// Newest jobs first. This is the candidate pool for resume matching.
pub async fn latest_listings(pool: &PgPool, limit: i64) -> Result<Vec<JobListingRow>, sqlx::Error> {
    sqlx::query_as::<_, JobListingRow>(&format!(
        "{JOB_LISTING_SELECT} ORDER BY j.created_at DESC LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn company_listings(
    pool: &PgPool,
    company_id: Uuid,
) -> Result<Vec<JobListingRow>, sqlx::Error> {
    sqlx::query_as::<_, JobListingRow>(&format!(
        "{JOB_LISTING_SELECT} WHERE j.company_id = $1 ORDER BY j.created_at DESC"
    ))
    .bind(company_id)
    .fetch_all(pool)
    .await
}
