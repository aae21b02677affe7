use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::debug;
use uuid::Uuid;

use crate::auth::cookie::token_from_headers;
use crate::errors::AppError;
use crate::models::user::{Role, UserRow};
use crate::state::AppState;

/// The signed-in user, loaded fresh from the database on every request so a
/// deleted account or changed role takes effect immediately.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: UserRow,
    pub role: Role,
}

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.user.id
    }

    /// Rejects with 403 unless the user holds one of `roles`.
    pub fn require(&self, roles: &[Role]) -> Result<(), AppError> {
        if roles.contains(&self.role) {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }

    /// The employer's company, or 403 for employers without one.
    pub fn company_id(&self) -> Result<Uuid, AppError> {
        self.require(&[Role::Employer])?;
        self.user.company_id.ok_or(AppError::Forbidden)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let token = token_from_headers(&parts.headers).ok_or(AppError::Unauthorized)?;
        let claims = state
            .tokens
            .verify(&token, chrono::Utc::now().timestamp())
            .map_err(|e| {
                debug!("Rejected session token: {e}");
                AppError::Unauthorized
            })?;

        let user = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
            .bind(claims.user_id)
            .fetch_optional(&state.db)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let role = user
            .role
            .parse::<Role>()
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;

        Ok(AuthUser { user, role })
    }
}
