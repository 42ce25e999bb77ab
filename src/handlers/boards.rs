use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::Result;
use crate::models::{AddMember, BoardResponse, BoardWithDetails, CreateBoard, UpdateBoard, UserSummary};
use crate::state::AppState;

pub async fn create_board(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateBoard>,
) -> Result<Json<BoardResponse>> {
    let board = state.workspace.create_board(auth.id(), input).await?;
    Ok(Json(board))
}

pub async fn list_boards(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<BoardResponse>>> {
    let boards = state.workspace.list_user_boards(auth.id(), auth.id()).await?;
    Ok(Json(boards))
}

pub async fn get_board(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(board_id): Path<Uuid>,
) -> Result<Json<BoardWithDetails>> {
    let board = state.workspace.get_board(auth.id(), board_id).await?;
    Ok(Json(board))
}

pub async fn update_board(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(board_id): Path<Uuid>,
    Json(input): Json<UpdateBoard>,
) -> Result<Json<BoardResponse>> {
    let board = state.workspace.update_board(auth.id(), board_id, input).await?;
    Ok(Json(board))
}

pub async fn delete_board(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(board_id): Path<Uuid>,
) -> Result<()> {
    state.workspace.delete_board(auth.id(), board_id).await
}

pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(board_id): Path<Uuid>,
) -> Result<Json<Vec<UserSummary>>> {
    let members = state.workspace.list_board_members(auth.id(), board_id).await?;
    Ok(Json(members))
}

pub async fn add_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(board_id): Path<Uuid>,
    Json(input): Json<AddMember>,
) -> Result<()> {
    state
        .workspace
        .add_board_member(auth.id(), board_id, input.user_id)
        .await
}

pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((board_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<()> {
    state
        .workspace
        .remove_board_member(auth.id(), board_id, user_id)
        .await
}
