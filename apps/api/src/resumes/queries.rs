use sqlx::PgPool;
use uuid::Uuid;

use crate::models::resume::ResumeRow;

/// The candidate's most recent upload. Older resumes are kept as history.
pub async fn latest_resume(pool: &PgPool, user_id: Uuid) -> Result<Option<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        "SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_resume(
    pool: &PgPool,
    user_id: Uuid,
    text: &str,
    skills: &[String],
    rocket_score: i32,
    url: &str,
) -> Result<ResumeRow, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (user_id, text, skills, rocket_score, url)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(text)
    .bind(skills)
    .bind(rocket_score)
    .bind(url)
    .fetch_one(pool)
    .await
}
