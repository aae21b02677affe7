use axum::{
    extract::State,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::ApiPath;
use crate::jobs::queries::company_listings;
use crate::models::company::CompanyRow;
use crate::models::job::JobListingRow;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CompanyProfileResponse {
    pub company: CompanyRow,
    pub jobs: Vec<JobListingRow>,
    pub total_applicants: i64,
}

/// GET /api/companies/:id
pub async fn handle_get_company(
    State(state): State<AppState>,
    ApiPath(company_id): ApiPath<Uuid>,
) -> Result<Json<CompanyProfileResponse>, AppError> {
    let company = sqlx::query_as::<_, CompanyRow>("SELECT * FROM companies WHERE id = $1")
        .bind(company_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {company_id} not found")))?;

    let jobs = company_listings(&state.db, company_id).await?;

    let total_applicants: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM applications ap
        JOIN jobs j ON j.id = ap.job_id
        WHERE j.company_id = $1
        "#,
    )
    .bind(company_id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(CompanyProfileResponse {
        company,
        jobs,
        total_applicants,
    }))
}
