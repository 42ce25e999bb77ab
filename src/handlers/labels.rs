use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::Result;
use crate::models::{AttachLabel, CreateGlobalLabel, Label};
use crate::state::AppState;

pub async fn attach_label(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<(Uuid, Uuid, Uuid)>,
    Json(input): Json<AttachLabel>,
) -> Result<Json<Label>> {
    let label = state.workspace.attach_label(auth.id(), path, input).await?;
    Ok(Json(label))
}

pub async fn list_card_labels(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<Vec<Label>>> {
    let labels = state.workspace.list_card_labels(auth.id(), path).await?;
    Ok(Json(labels))
}

pub async fn detach_label(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((board_id, list_id, card_id, label_id)): Path<(Uuid, Uuid, Uuid, Uuid)>,
) -> Result<()> {
    state
        .workspace
        .detach_label(auth.id(), (board_id, list_id, card_id), label_id)
        .await
}

pub async fn create_global_label(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateGlobalLabel>,
) -> Result<Json<Label>> {
    let label = state.workspace.create_global_label(auth.id(), input).await?;
    Ok(Json(label))
}

pub async fn list_global_labels(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Label>>> {
    Ok(Json(state.workspace.list_global_labels().await?))
}

pub async fn delete_global_label(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(label_id): Path<Uuid>,
) -> Result<()> {
    state.workspace.delete_global_label(auth.id(), label_id).await
}
