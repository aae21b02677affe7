use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AlertSubscriptionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub keywords: Option<String>,
    pub location: Option<String>,
    pub min_salary: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// A subscription joined with the subscriber's email, for alert fan-out.
#[derive(Debug, Clone, FromRow)]
pub struct AlertRecipientRow {
    #[sqlx(flatten)]
    pub subscription: AlertSubscriptionRow,
    pub email: String,
}
