use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub skills: Vec<String>,
    pub rocket_score: i32,
    pub url: String,
    pub created_at: DateTime<Utc>,
}
