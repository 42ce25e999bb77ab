use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::Result;
use crate::models::{AddMember, BoardList, CreateList, ListResponse, UpdateList, UserSummary};
use crate::state::AppState;

pub async fn create_list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(board_id): Path<Uuid>,
    Json(input): Json<CreateList>,
) -> Result<Json<BoardList>> {
    let list = state.workspace.create_list(auth.id(), board_id, input).await?;
    Ok(Json(list))
}

pub async fn list_lists(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(board_id): Path<Uuid>,
) -> Result<Json<Vec<BoardList>>> {
    let lists = state.workspace.list_lists(auth.id(), board_id).await?;
    Ok(Json(lists))
}

pub async fn get_list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((board_id, list_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ListResponse>> {
    let list = state.workspace.get_list(auth.id(), board_id, list_id).await?;
    Ok(Json(list))
}

pub async fn update_list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((board_id, list_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<UpdateList>,
) -> Result<Json<BoardList>> {
    let list = state
        .workspace
        .update_list(auth.id(), board_id, list_id, input)
        .await?;
    Ok(Json(list))
}

pub async fn delete_list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((board_id, list_id)): Path<(Uuid, Uuid)>,
) -> Result<()> {
    state.workspace.delete_list(auth.id(), board_id, list_id).await
}

pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((board_id, list_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<UserSummary>>> {
    let members = state
        .workspace
        .list_list_members(auth.id(), board_id, list_id)
        .await?;
    Ok(Json(members))
}

pub async fn add_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((board_id, list_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<AddMember>,
) -> Result<()> {
    state
        .workspace
        .add_list_member(auth.id(), board_id, list_id, input.user_id)
        .await
}

pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((board_id, list_id, user_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<()> {
    state
        .workspace
        .remove_list_member(auth.id(), board_id, list_id, user_id)
        .await
}
