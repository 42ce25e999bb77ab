use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::Result;
use crate::models::{AddMember, CreateTask, Task, UpdateTask, UserSummary};
use crate::state::AppState;

type TaskPath = (Uuid, Uuid, Uuid, Uuid);

pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<(Uuid, Uuid, Uuid)>,
    Json(input): Json<CreateTask>,
) -> Result<Json<Task>> {
    let task = state.workspace.create_task(auth.id(), path, input).await?;
    Ok(Json(task))
}

pub async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<Vec<Task>>> {
    let tasks = state.workspace.list_tasks(auth.id(), path).await?;
    Ok(Json(tasks))
}

pub async fn get_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((board_id, list_id, card_id, task_id)): Path<TaskPath>,
) -> Result<Json<Task>> {
    let task = state
        .workspace
        .get_task(auth.id(), (board_id, list_id, card_id), task_id)
        .await?;
    Ok(Json(task))
}

pub async fn update_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((board_id, list_id, card_id, task_id)): Path<TaskPath>,
    Json(input): Json<UpdateTask>,
) -> Result<Json<Task>> {
    let task = state
        .workspace
        .update_task(auth.id(), (board_id, list_id, card_id), task_id, input)
        .await?;
    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((board_id, list_id, card_id, task_id)): Path<TaskPath>,
) -> Result<()> {
    state
        .workspace
        .delete_task(auth.id(), (board_id, list_id, card_id), task_id)
        .await
}

pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((board_id, list_id, card_id, task_id)): Path<TaskPath>,
) -> Result<Json<Vec<UserSummary>>> {
    let members = state
        .workspace
        .list_task_members(auth.id(), (board_id, list_id, card_id), task_id)
        .await?;
    Ok(Json(members))
}

pub async fn add_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((board_id, list_id, card_id, task_id)): Path<TaskPath>,
    Json(input): Json<AddMember>,
) -> Result<()> {
    state
        .workspace
        .add_task_member(auth.id(), (board_id, list_id, card_id), task_id, input.user_id)
        .await
}

pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((board_id, list_id, card_id, task_id, user_id)): Path<(Uuid, Uuid, Uuid, Uuid, Uuid)>,
) -> Result<()> {
    state
        .workspace
        .remove_task_member(auth.id(), (board_id, list_id, card_id), task_id, user_id)
        .await
}
