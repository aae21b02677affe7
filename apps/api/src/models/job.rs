use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::matching::Skilled;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub job_type: String,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Skilled for JobRow {
    fn skills(&self) -> &[String] {
        &self.skills
    }
}

/// A job joined with its company name and analytics counters.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobListingRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub job: JobRow,
    pub company_name: Option<String>,
    pub views: i32,
    pub applications: i32,
}

impl Skilled for JobListingRow {
    fn skills(&self) -> &[String] {
        &self.job.skills
    }
}

/// Column list producing a `JobListingRow`; callers append WHERE / ORDER BY.
pub const JOB_LISTING_SELECT: &str = r#"
    SELECT j.*, c.name AS company_name,
           COALESCE(a.views, 0) AS views,
           COALESCE(a.applications, 0) AS applications
    FROM jobs j
    LEFT JOIN companies c ON c.id = j.company_id
    LEFT JOIN job_analytics a ON a.job_id = j.id
"#;
