use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use super::auth::{validate_email, validate_password, validate_username};
use crate::access::Denial;
use crate::auth::{hash_password, verify_password, AuthUser};
use crate::error::{AppError, Result};
use crate::models::{
    BoardResponse, UpdateEmail, UpdatePassword, UpdateUsername, UserResponse, UserSummary,
};
use crate::state::AppState;

/// Profile routes act on the caller's own account only.
fn ensure_self(auth: &AuthUser, user_id: Uuid) -> Result<()> {
    if auth.id() != user_id {
        return Err(AppError::Forbidden(Denial::NotOwner));
    }
    Ok(())
}

pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<UserSummary>>> {
    Ok(Json(state.users.list_all().await?))
}

pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>> {
    ensure_self(&auth, user_id)?;
    let user = state.users.get_by_id(user_id).await?;
    Ok(Json(user.into()))
}

pub async fn update_username(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
    Json(input): Json<UpdateUsername>,
) -> Result<Json<UserResponse>> {
    ensure_self(&auth, user_id)?;
    let username = input.username.trim();
    validate_username(username)?;

    if username != auth.user.username && state.users.username_exists(username).await? {
        return Err(AppError::Conflict("Username is already taken".to_string()));
    }

    let user = state.users.update_username(user_id, username).await?;
    tracing::info!(%user_id, "username updated");

    Ok(Json(user.into()))
}

pub async fn update_email(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
    Json(input): Json<UpdateEmail>,
) -> Result<Json<UserResponse>> {
    ensure_self(&auth, user_id)?;
    let email = input.email.trim();
    validate_email(email)?;

    if email != auth.user.email && state.users.email_exists(email).await? {
        return Err(AppError::Conflict("Email is already in use".to_string()));
    }

    let user = state.users.update_email(user_id, email).await?;
    tracing::info!(%user_id, "email updated");

    Ok(Json(user.into()))
}

pub async fn update_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
    Json(input): Json<UpdatePassword>,
) -> Result<()> {
    ensure_self(&auth, user_id)?;

    if !verify_password(&input.current_password, &auth.user.password_hash)? {
        return Err(AppError::validation("Current password is incorrect"));
    }
    validate_password(&input.password)?;

    let password_hash = hash_password(&input.password)?;
    state.users.update_password(user_id, &password_hash).await?;
    tracing::info!(%user_id, "password updated");

    Ok(())
}

pub async fn list_user_boards(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<BoardResponse>>> {
    let boards = state.workspace.list_user_boards(auth.id(), user_id).await?;
    Ok(Json(boards))
}
