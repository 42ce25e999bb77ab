use uuid::Uuid;

use super::{authorize, required_text, BoardScope, Workspace};
use crate::access::{Capability, Denial, Standing};
use crate::error::{AppError, Result};
use crate::models::{
    BoardResponse, BoardWithDetails, CreateBoard, ListResponse, UpdateBoard, UserSummary,
};

const MAX_BOARD_NAME: usize = 100;

impl Workspace {
    pub async fn create_board(&self, actor: Uuid, input: CreateBoard) -> Result<BoardResponse> {
        let name = required_text(&input.name, "Board name", MAX_BOARD_NAME)?;

        let board = self.boards.create(&name, actor).await?;
        tracing::info!(board_id = %board.id, owner_id = %actor, "board created");

        Ok(board.into_response(Standing::Owner))
    }

    /// Boards `user_id` owns or belongs to. Only the user may ask.
    pub async fn list_user_boards(&self, actor: Uuid, user_id: Uuid) -> Result<Vec<BoardResponse>> {
        if actor != user_id {
            return Err(AppError::Forbidden(Denial::NotOwner));
        }

        let boards = self.boards.list_for_user(user_id).await?;

        Ok(boards
            .into_iter()
            .map(|board| {
                let role = if board.owner_id == user_id {
                    Standing::Owner
                } else {
                    Standing::Member
                };
                board.into_response(role)
            })
            .collect())
    }

    pub async fn get_board(&self, actor: Uuid, board_id: Uuid) -> Result<BoardWithDetails> {
        let BoardScope { board, chain } = self.board_scope(board_id).await?;
        let role = authorize(&chain, actor, Capability::Read)?;

        let members = self.board_members.list_users(board.id).await?;
        let lists = self.lists.list_by_board(board.id).await?;

        let mut list_responses = Vec::with_capacity(lists.len());
        for list in lists {
            let cards = self.cards.list_by_list(list.id).await?;
            let mut card_responses = Vec::with_capacity(cards.len());
            for card in cards {
                card_responses.push(self.card_response(card).await?);
            }
            let mut response: ListResponse = list.into();
            response.cards = card_responses;
            list_responses.push(response);
        }

        Ok(BoardWithDetails {
            id: board.id,
            name: board.name,
            owner_id: board.owner_id,
            role,
            members,
            lists: list_responses,
            created_at: board.created_at,
            updated_at: board.updated_at,
        })
    }

    pub async fn update_board(
        &self,
        actor: Uuid,
        board_id: Uuid,
        input: UpdateBoard,
    ) -> Result<BoardResponse> {
        let BoardScope { chain, .. } = self.board_scope(board_id).await?;
        let role = authorize(&chain, actor, Capability::Update)?;

        let name = input
            .name
            .as_deref()
            .map(|n| required_text(n, "Board name", MAX_BOARD_NAME))
            .transpose()?;

        let board = self.boards.update(board_id, name.as_deref()).await?;
        tracing::info!(%board_id, %actor, "board updated");

        Ok(board.into_response(role))
    }

    pub async fn delete_board(&self, actor: Uuid, board_id: Uuid) -> Result<()> {
        let BoardScope { chain, .. } = self.board_scope(board_id).await?;
        authorize(&chain, actor, Capability::Delete)?;

        self.boards.delete(board_id).await?;
        tracing::info!(%board_id, %actor, "board deleted");

        Ok(())
    }

    pub async fn add_board_member(&self, actor: Uuid, board_id: Uuid, user_id: Uuid) -> Result<()> {
        let BoardScope { chain, .. } = self.board_scope(board_id).await?;
        self.add_member(actor, &chain, user_id).await
    }

    pub async fn remove_board_member(
        &self,
        actor: Uuid,
        board_id: Uuid,
        user_id: Uuid,
    ) -> Result<()> {
        let BoardScope { chain, .. } = self.board_scope(board_id).await?;
        self.remove_member(actor, &chain, user_id).await
    }

    pub async fn list_board_members(&self, actor: Uuid, board_id: Uuid) -> Result<Vec<UserSummary>> {
        let BoardScope { chain, .. } = self.board_scope(board_id).await?;
        self.list_members(actor, &chain).await
    }
}
