use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::alert::AlertSubscriptionRow;
use crate::state::AppState;
use crate::validation::{check_non_negative, non_blank};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    pub keywords: Option<String>,
    pub location: Option<String>,
    pub min_salary: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub subscription: AlertSubscriptionRow,
}

/// POST /api/alerts/subscribe
///
/// One subscription per user; a second call replaces the criteria.
pub async fn handle_subscribe(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<SubscribeRequest>,
) -> Result<Json<SubscriptionResponse>, AppError> {
    check_non_negative("minSalary", req.min_salary)?;

    let subscription = sqlx::query_as::<_, AlertSubscriptionRow>(
        r#"
        INSERT INTO job_alert_subscriptions (user_id, keywords, location, min_salary)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id) DO UPDATE
            SET keywords = EXCLUDED.keywords,
                location = EXCLUDED.location,
                min_salary = EXCLUDED.min_salary
        RETURNING *
        "#,
    )
    .bind(auth.id())
    .bind(non_blank(req.keywords))
    .bind(non_blank(req.location))
    .bind(req.min_salary)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(SubscriptionResponse { subscription }))
}
