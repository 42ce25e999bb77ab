use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{generate_token, hash_password, hash_token, verify_password, AuthUser, SESSION_COOKIE};
use crate::error::{AppError, Result};
use crate::models::{CreateUser, UserResponse};
use crate::state::AppState;

pub(crate) const MIN_PASSWORD_LEN: usize = 8;
pub(crate) const MAX_PASSWORD_LEN: usize = 120;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: Option<String>,
}

pub(crate) fn validate_username(username: &str) -> Result<()> {
    let len = username.chars().count();
    if !(3..=20).contains(&len) {
        return Err(AppError::validation("Username must be 3 to 20 characters"));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(AppError::validation("Username must not contain whitespace"));
    }
    Ok(())
}

pub(crate) fn validate_email(email: &str) -> Result<()> {
    let well_formed = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !well_formed || email.len() > 50 {
        return Err(AppError::validation("A valid email address is required"));
    }
    Ok(())
}

pub(crate) fn validate_password(password: &str) -> Result<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password must be at most {} characters",
            MAX_PASSWORD_LEN
        )));
    }
    Ok(())
}

pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> Result<Json<AuthResponse>> {
    let username = input.username.trim();
    let email = input.email.trim();

    validate_username(username)?;
    validate_email(email)?;
    validate_password(&input.password)?;

    if state.users.username_exists(username).await? {
        return Err(AppError::Conflict("Username is already taken".to_string()));
    }
    if state.users.email_exists(email).await? {
        return Err(AppError::Conflict("Email is already in use".to_string()));
    }

    let password_hash = hash_password(&input.password)?;
    let user = state
        .users
        .create(Uuid::new_v4(), username, email, &password_hash)
        .await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok(Json(AuthResponse {
        user: user.into(),
        token: None,
    }))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    let user = state
        .users
        .find_by_username(input.username.trim())
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&input.password, &user.password_hash)? {
        tracing::debug!(user_id = %user.id, "login rejected");
        return Err(AppError::Unauthorized);
    }

    let token = generate_token();
    state.sessions.create(user.id, &hash_token(&token)).await?;

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((
        jar.add(cookie),
        Json(AuthResponse {
            user: user.into(),
            token: Some(token),
        }),
    ))
}

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    auth: AuthUser,
) -> Result<CookieJar> {
    state
        .sessions
        .delete_by_token_hash(&hash_token(&auth.session_token))
        .await?;

    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::seconds(0))
        .build();

    Ok(jar.add(cookie))
}
