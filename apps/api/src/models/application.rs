use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub status: String,
    pub rocket_score: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// An application as the candidate sees it: with the job title and company.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CandidateApplicationRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub application: ApplicationRow,
    pub job_title: String,
    pub company_name: Option<String>,
}

/// An application as the employer sees it: with the applicant and job title.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApplicantRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub application: ApplicationRow,
    pub applicant_name: Option<String>,
    pub applicant_email: String,
    pub job_title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SavedJobRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub created_at: DateTime<Utc>,
}
