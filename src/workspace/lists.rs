use uuid::Uuid;

use super::{authorize, required_text, BoardScope, ListScope, Workspace};
use crate::access::Capability;
use crate::error::Result;
use crate::models::{BoardList, CreateList, ListResponse, UpdateList, UserSummary};
use crate::position::{apply_position, next_position};

const MAX_LIST_NAME: usize = 100;

impl Workspace {
    /// Appends a new list to the end of the board.
    pub async fn create_list(&self, actor: Uuid, board_id: Uuid, input: CreateList) -> Result<BoardList> {
        let BoardScope { chain, .. } = self.board_scope(board_id).await?;
        authorize(&chain, actor, Capability::CreateChild)?;

        let name = required_text(&input.name, "List name", MAX_LIST_NAME)?;

        let _guard = self.sequencer.lock(board_id).await;
        let position = next_position(self.lists.positions(board_id).await?)?;
        let list = self.lists.create(board_id, &name, position, actor).await?;

        tracing::info!(%board_id, list_id = %list.id, position, %actor, "list created");
        Ok(list)
    }

    pub async fn list_lists(&self, actor: Uuid, board_id: Uuid) -> Result<Vec<BoardList>> {
        let BoardScope { chain, .. } = self.board_scope(board_id).await?;
        authorize(&chain, actor, Capability::Read)?;

        self.lists.list_by_board(board_id).await
    }

    pub async fn get_list(&self, actor: Uuid, board_id: Uuid, list_id: Uuid) -> Result<ListResponse> {
        let ListScope { list, chain } = self.list_scope(board_id, list_id).await?;
        authorize(&chain, actor, Capability::Read)?;

        let cards = self.cards.list_by_list(list.id).await?;
        let mut response: ListResponse = list.into();
        for card in cards {
            response.cards.push(self.card_response(card).await?);
        }

        Ok(response)
    }

    pub async fn update_list(
        &self,
        actor: Uuid,
        board_id: Uuid,
        list_id: Uuid,
        input: UpdateList,
    ) -> Result<BoardList> {
        let ListScope { list, chain } = self.list_scope(board_id, list_id).await?;
        authorize(&chain, actor, Capability::Update)?;

        let name = input
            .name
            .as_deref()
            .map(|n| required_text(n, "List name", MAX_LIST_NAME))
            .transpose()?;
        let position = apply_position(list.position, input.position)?;

        let updated = self.lists.update(list_id, name.as_deref(), position).await?;
        tracing::info!(%board_id, %list_id, position, %actor, "list updated");

        Ok(updated)
    }

    /// Deletes the list with its cards. Remaining lists keep their positions.
    pub async fn delete_list(&self, actor: Uuid, board_id: Uuid, list_id: Uuid) -> Result<()> {
        let ListScope { chain, .. } = self.list_scope(board_id, list_id).await?;
        authorize(&chain, actor, Capability::Delete)?;

        self.lists.delete(list_id).await?;
        tracing::info!(%board_id, %list_id, %actor, "list deleted");

        Ok(())
    }

    pub async fn add_list_member(
        &self,
        actor: Uuid,
        board_id: Uuid,
        list_id: Uuid,
        user_id: Uuid,
    ) -> Result<()> {
        let ListScope { chain, .. } = self.list_scope(board_id, list_id).await?;
        self.add_member(actor, &chain, user_id).await
    }

    pub async fn remove_list_member(
        &self,
        actor: Uuid,
        board_id: Uuid,
        list_id: Uuid,
        user_id: Uuid,
    ) -> Result<()> {
        let ListScope { chain, .. } = self.list_scope(board_id, list_id).await?;
        self.remove_member(actor, &chain, user_id).await
    }

    pub async fn list_list_members(
        &self,
        actor: Uuid,
        board_id: Uuid,
        list_id: Uuid,
    ) -> Result<Vec<UserSummary>> {
        let ListScope { chain, .. } = self.list_scope(board_id, list_id).await?;
        self.list_members(actor, &chain).await
    }
}
