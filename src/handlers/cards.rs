use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::Result;
use crate::models::{
    AddMember, CardResponse, CreateCard, MoveCard, SetCardDates, UpdateCard, UserSummary,
};
use crate::state::AppState;

pub async fn create_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((board_id, list_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<CreateCard>,
) -> Result<Json<CardResponse>> {
    let card = state
        .workspace
        .create_card(auth.id(), board_id, list_id, input)
        .await?;
    Ok(Json(card))
}

pub async fn list_cards(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((board_id, list_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<CardResponse>>> {
    let cards = state.workspace.list_cards(auth.id(), board_id, list_id).await?;
    Ok(Json(cards))
}

pub async fn get_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((board_id, list_id, card_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<CardResponse>> {
    let card = state
        .workspace
        .get_card(auth.id(), board_id, list_id, card_id)
        .await?;
    Ok(Json(card))
}

pub async fn update_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((board_id, list_id, card_id)): Path<(Uuid, Uuid, Uuid)>,
    Json(input): Json<UpdateCard>,
) -> Result<Json<CardResponse>> {
    let card = state
        .workspace
        .update_card(auth.id(), board_id, list_id, card_id, input)
        .await?;
    Ok(Json(card))
}

pub async fn move_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((board_id, list_id, card_id)): Path<(Uuid, Uuid, Uuid)>,
    Json(input): Json<MoveCard>,
) -> Result<Json<CardResponse>> {
    let card = state
        .workspace
        .move_card(auth.id(), board_id, list_id, card_id, input)
        .await?;
    Ok(Json(card))
}

pub async fn set_dates(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((board_id, list_id, card_id)): Path<(Uuid, Uuid, Uuid)>,
    Json(input): Json<SetCardDates>,
) -> Result<Json<CardResponse>> {
    let card = state
        .workspace
        .set_card_dates(auth.id(), board_id, list_id, card_id, input)
        .await?;
    Ok(Json(card))
}

pub async fn delete_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((board_id, list_id, card_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<()> {
    state
        .workspace
        .delete_card(auth.id(), board_id, list_id, card_id)
        .await
}

pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((board_id, list_id, card_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<Vec<UserSummary>>> {
    let members = state
        .workspace
        .list_card_members(auth.id(), board_id, list_id, card_id)
        .await?;
    Ok(Json(members))
}

pub async fn add_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((board_id, list_id, card_id)): Path<(Uuid, Uuid, Uuid)>,
    Json(input): Json<AddMember>,
) -> Result<()> {
    state
        .workspace
        .add_card_member(auth.id(), board_id, list_id, card_id, input.user_id)
        .await
}

pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((board_id, list_id, card_id, user_id)): Path<(Uuid, Uuid, Uuid, Uuid)>,
) -> Result<()> {
    state
        .workspace
        .remove_card_member(auth.id(), board_id, list_id, card_id, user_id)
        .await
}
