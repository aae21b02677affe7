//! Axum route handlers for registration and sessions.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::cookie::{cleared_cookie, session_cookie};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::AuthUser;
use crate::errors::{is_unique_violation, AppError};
use crate::extract::ApiJson;
use crate::models::user::{PublicUser, Role, UserRow};
use crate::state::AppState;
use crate::validation::{check_email, check_len};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub company_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: PublicUser,
}

/// Checks a registration and returns the requested role.
///
/// Admin accounts cannot be self-registered; they come from startup seeding.
fn validate_register(req: &RegisterRequest) -> Result<Role, AppError> {
    check_len("name", &req.name, 2, Some(80))?;
    check_email(req.email.trim())?;
    if !(8..=128).contains(&req.password.chars().count()) {
        return Err(AppError::Validation(
            "password must be between 8 and 128 characters".to_string(),
        ));
    }
    if let Some(company) = &req.company_name {
        check_len("companyName", company, 2, Some(120))?;
    }

    match req.role.parse::<Role>() {
        Ok(Role::Admin) => Err(AppError::Validation(
            "admin accounts cannot be self-registered".to_string(),
        )),
        Ok(role) => Ok(role),
        Err(e) => Err(AppError::Validation(e)),
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn signed_in(state: &AppState, user: &UserRow, role: Role) -> String {
    let token = state
        .tokens
        .issue(user.id, role, chrono::Utc::now().timestamp());
    session_cookie(&token, state.config.cookie_secure)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let role = validate_register(&req)?;
    let email = normalize_email(&req.email);

    let existing: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = hash_password(&req.password)?;

    let mut tx = state.db.begin().await?;

    let company_id: Option<Uuid> = match (role, &req.company_name) {
        (Role::Employer, Some(company_name)) => Some(
            sqlx::query_scalar("INSERT INTO companies (name) VALUES ($1) RETURNING id")
                .bind(company_name.trim())
                .fetch_one(&mut *tx)
                .await?,
        ),
        _ => None,
    };

    let user = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (email, password_hash, name, role, company_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(&email)
    .bind(&password_hash)
    .bind(req.name.trim())
    .bind(role.as_str())
    .bind(company_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict("Email already registered".to_string())
        } else {
            AppError::Database(e)
        }
    })?;

    tx.commit().await?;
    info!("Registered {} user {}", role, user.id);

    let cookie = signed_in(&state, &user, role);
    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(UserResponse {
            user: PublicUser::from(&user),
        }),
    ))
}

/// POST /api/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = $1")
        .bind(normalize_email(&req.email))
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(AppError::Unauthorized);
    }

    let role = user
        .role
        .parse::<Role>()
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;

    let cookie = signed_in(&state, &user, role);
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(UserResponse {
            user: PublicUser::from(&user),
        }),
    ))
}

/// POST /api/auth/logout
pub async fn handle_logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::SET_COOKIE, cleared_cookie(state.config.cookie_secure))],
        Json(serde_json::json!({ "success": true })),
    )
}

/// GET /api/auth/me
pub async fn handle_me(auth: AuthUser) -> Json<UserResponse> {
    Json(UserResponse {
        user: PublicUser::from(&auth.user),
    })
}
