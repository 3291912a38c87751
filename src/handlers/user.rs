use axum::extract::{Extension, State};
use axum::Json;
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use serde_json::json;

use crate::auth::jwt::{sign_token, TOKEN_LIFETIME_HOURS};
use crate::auth::reset::{generate_reset_token, hash_reset_token, RESET_TOKEN_LIFETIME_MINUTES};
use crate::dtos::user::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, ResetPasswordRequest, SignupRequest,
    UserResponse,
};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::user::User;
use crate::state::AppState;

pub async fn signup(
    State(AppState { db_pool }): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(axum::http::StatusCode, Json<UserResponse>), AppError> {
    // Basic validation
    if payload.business_name.trim().is_empty() {
        return Err(AppError::validation("Business name required"));
    }
    if !payload.email.contains('@') || !payload.email.contains('.') {
        return Err(AppError::validation("Valid email required"));
    }
    if payload.password.len() < 6 {
        return Err(AppError::validation("Password too short"));
    }

    let password_hash = hash(&payload.password, DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (business_name, email, password_hash)
         VALUES ($1, $2, $3)
         RETURNING id, business_name, email, password_hash,
                   password_reset_token, password_reset_expires, created_at",
    )
    .bind(&payload.business_name)
    .bind(&payload.email)
    .bind(&password_hash)
    .fetch_one(&db_pool)
    .await
    .map_err(|e| {
        if let Some(db_err) = e.as_database_error() {
            if db_err.code().as_deref() == Some("23505") {
                return AppError::conflict("Email already registered");
            }
        }
        AppError::db(e)
    })?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(UserResponse {
            id: user.id,
            business_name: user.business_name,
            email: user.email,
            created_at: user.created_at,
        }),
    ))
}

pub async fn login(
    State(AppState { db_pool }): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if payload.email.trim().is_empty() {
        return Err(AppError::validation("Email required"));
    }
    if payload.password.is_empty() {
        return Err(AppError::validation("Password required"));
    }

    let user = sqlx::query_as::<_, User>(
        "SELECT id, business_name, email, password_hash,
                password_reset_token, password_reset_expires, created_at
         FROM users WHERE email = $1",
    )
    .bind(&payload.email)
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

    let ok = verify(&payload.password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Password verify error: {e}")))?;

    if !ok {
        return Err(AppError::unauthorized("Invalid credentials"));
    }

    let secret =
        std::env::var("JWT_SECRET").map_err(|_| AppError::internal("JWT secret not configured"))?;

    let token = sign_token(user.id, &user.email, &secret)?;

    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer",
        expires_in_seconds: (TOKEN_LIFETIME_HOURS * 60 * 60) as usize,
    }))
}

// Authenticated endpoint: returns the account profile for the id in AuthContext
pub async fn get_me(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<UserResponse>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, business_name, email, password_hash,
                password_reset_token, password_reset_expires, created_at
         FROM users WHERE id = $1",
    )
    .bind(auth.user_id)
    .fetch_one(&db_pool)
    .await?;

    Ok(Json(UserResponse {
        id: user.id,
        business_name: user.business_name,
        email: user.email,
        created_at: user.created_at,
    }))
}

/// Always answers with a generic success so the endpoint cannot be used to
/// probe which emails are registered. Email delivery is out of scope: the
/// reset link is logged for the operator instead.
pub async fn forgot_password(
    State(AppState { db_pool }): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, business_name, email, password_hash,
                password_reset_token, password_reset_expires, created_at
         FROM users WHERE email = $1",
    )
    .bind(&payload.email)
    .fetch_optional(&db_pool)
    .await?;

    if let Some(user) = user {
        let (raw_token, token_hash) = generate_reset_token();
        let expires = Utc::now() + Duration::minutes(RESET_TOKEN_LIFETIME_MINUTES);

        sqlx::query(
            "UPDATE users SET password_reset_token = $1, password_reset_expires = $2 WHERE id = $3",
        )
        .bind(&token_hash)
        .bind(expires)
        .bind(user.id)
        .execute(&db_pool)
        .await?;

        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());
        tracing::info!(
            user_id = user.id,
            reset_url = %format!("{frontend_url}/reset-password/{raw_token}"),
            "password reset requested"
        );
    } else {
        tracing::info!("password reset requested for unknown email");
    }

    Ok(Json(json!({
        "message": "If that account exists, a reset link has been issued"
    })))
}

pub async fn reset_password(
    State(AppState { db_pool }): State<AppState>,
    axum::extract::Path(token): axum::extract::Path<String>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if payload.new_password.len() < 6 {
        return Err(AppError::validation("Password too short"));
    }

    let token_hash = hash_reset_token(&token);

    let user = sqlx::query_as::<_, User>(
        "SELECT id, business_name, email, password_hash,
                password_reset_token, password_reset_expires, created_at
         FROM users
         WHERE password_reset_token = $1 AND password_reset_expires > now()",
    )
    .bind(&token_hash)
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::validation("Token is invalid or has expired"))?;

    let password_hash = hash(&payload.new_password, DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;

    sqlx::query(
        "UPDATE users SET password_hash = $1,
                          password_reset_token = NULL,
                          password_reset_expires = NULL
         WHERE id = $2",
    )
    .bind(&password_hash)
    .bind(user.id)
    .execute(&db_pool)
    .await?;

    Ok(Json(json!({ "message": "Password updated" })))
}
