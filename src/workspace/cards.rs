use uuid::Uuid;

use super::{authorize, optional_text, required_text, CardScope, ListScope, Workspace};
use crate::access::{AccessChain, Capability, Grant, Level};
use crate::error::{AppError, Result};
use crate::models::{CardResponse, CreateCard, MoveCard, SetCardDates, UpdateCard, UserSummary};
use crate::position::{apply_position, next_position};

const MAX_TITLE: usize = 200;
const MAX_DESCRIPTION: usize = 2000;

impl Workspace {
    /// Appends a new card to the end of the list.
    pub async fn create_card(
        &self,
        actor: Uuid,
        board_id: Uuid,
        list_id: Uuid,
        input: CreateCard,
    ) -> Result<CardResponse> {
        let ListScope { chain, .. } = self.list_scope(board_id, list_id).await?;
        authorize(&chain, actor, Capability::CreateChild)?;

        let title = required_text(&input.title, "Card title", MAX_TITLE)?;
        optional_text(input.description.as_deref(), "Card description", MAX_DESCRIPTION)?;

        let _guard = self.sequencer.lock(list_id).await;
        let position = next_position(self.cards.positions(list_id).await?)?;
        let card = self
            .cards
            .create(list_id, &title, input.description.as_deref(), position, actor)
            .await?;

        tracing::info!(%list_id, card_id = %card.id, position, %actor, "card created");
        Ok(card.into_response(vec![]))
    }

    pub async fn list_cards(
        &self,
        actor: Uuid,
        board_id: Uuid,
        list_id: Uuid,
    ) -> Result<Vec<CardResponse>> {
        let ListScope { chain, .. } = self.list_scope(board_id, list_id).await?;
        authorize(&chain, actor, Capability::Read)?;

        let cards = self.cards.list_by_list(list_id).await?;
        let mut responses = Vec::with_capacity(cards.len());
        for card in cards {
            responses.push(self.card_response(card).await?);
        }

        Ok(responses)
    }

    pub async fn get_card(
        &self,
        actor: Uuid,
        board_id: Uuid,
        list_id: Uuid,
        card_id: Uuid,
    ) -> Result<CardResponse> {
        let CardScope { card, chain } = self.card_scope(board_id, list_id, card_id).await?;
        authorize(&chain, actor, Capability::Read)?;

        self.card_response(card).await
    }

    pub async fn update_card(
        &self,
        actor: Uuid,
        board_id: Uuid,
        list_id: Uuid,
        card_id: Uuid,
        input: UpdateCard,
    ) -> Result<CardResponse> {
        let CardScope { card, chain } = self.card_scope(board_id, list_id, card_id).await?;
        authorize(&chain, actor, Capability::Update)?;

        let title = input
            .title
            .as_deref()
            .map(|t| required_text(t, "Card title", MAX_TITLE))
            .transpose()?;
        optional_text(input.description.as_deref(), "Card description", MAX_DESCRIPTION)?;
        let position = apply_position(card.position, input.position)?;

        let updated = self
            .cards
            .update(card_id, title.as_deref(), input.description.as_deref(), position)
            .await?;
        tracing::info!(%list_id, %card_id, position, %actor, "card updated");

        self.card_response(updated).await
    }

    /// Moves a card to another list on the same board.
    ///
    /// Without an explicit position the card is appended to the destination;
    /// a card "moved" to its own list keeps its position.
    pub async fn move_card(
        &self,
        actor: Uuid,
        board_id: Uuid,
        list_id: Uuid,
        card_id: Uuid,
        input: MoveCard,
    ) -> Result<CardResponse> {
        let CardScope { card, chain } = self.card_scope(board_id, list_id, card_id).await?;
        authorize(&chain, actor, Capability::Update)?;

        let destination = self.lists.get_by_id(input.list_id).await?;
        if destination.board_id != board_id {
            return Err(AppError::ParentMismatch(
                "Cannot move card to a list on a different board".to_string(),
            ));
        }

        let destination_chain = AccessChain::board(chain.root().clone()).push(Grant::new(
            Level::List,
            destination.id,
            destination.owner_id,
            self.list_members.list(destination.id).await?,
        ));
        authorize(&destination_chain, actor, Capability::CreateChild)?;

        let _guard = self.sequencer.lock(destination.id).await;
        let position = match input.position {
            Some(_) => apply_position(card.position, input.position)?,
            None if destination.id == card.list_id => card.position,
            None => next_position(self.cards.positions(destination.id).await?)?,
        };

        let moved = self.cards.move_to(card_id, destination.id, position).await?;
        tracing::info!(
            %card_id,
            from = %list_id,
            to = %destination.id,
            position,
            %actor,
            "card moved"
        );

        self.card_response(moved).await
    }

    /// Deletes the card with its tasks and labels. Siblings are not reindexed.
    pub async fn delete_card(
        &self,
        actor: Uuid,
        board_id: Uuid,
        list_id: Uuid,
        card_id: Uuid,
    ) -> Result<()> {
        let CardScope { chain, .. } = self.card_scope(board_id, list_id, card_id).await?;
        authorize(&chain, actor, Capability::Delete)?;

        self.cards.delete(card_id).await?;
        tracing::info!(%list_id, %card_id, %actor, "card deleted");

        Ok(())
    }

    pub async fn set_card_dates(
        &self,
        actor: Uuid,
        board_id: Uuid,
        list_id: Uuid,
        card_id: Uuid,
        input: SetCardDates,
    ) -> Result<CardResponse> {
        let CardScope { chain, .. } = self.card_scope(board_id, list_id, card_id).await?;
        authorize(&chain, actor, Capability::Update)?;

        if let (Some(start), Some(due)) = (input.start_date, input.due_date) {
            if due < start {
                return Err(AppError::validation("Due date must not be before start date"));
            }
        }

        let card = self
            .cards
            .set_dates(card_id, input.start_date, input.due_date)
            .await?;
        tracing::info!(%card_id, %actor, "card dates set");

        self.card_response(card).await
    }

    pub async fn add_card_member(
        &self,
        actor: Uuid,
        board_id: Uuid,
        list_id: Uuid,
        card_id: Uuid,
        user_id: Uuid,
    ) -> Result<()> {
        let CardScope { chain, .. } = self.card_scope(board_id, list_id, card_id).await?;
        self.add_member(actor, &chain, user_id).await
    }

    pub async fn remove_card_member(
        &self,
        actor: Uuid,
        board_id: Uuid,
        list_id: Uuid,
        card_id: Uuid,
        user_id: Uuid,
    ) -> Result<()> {
        let CardScope { chain, .. } = self.card_scope(board_id, list_id, card_id).await?;
        self.remove_member(actor, &chain, user_id).await
    }

    pub async fn list_card_members(
        &self,
        actor: Uuid,
        board_id: Uuid,
        list_id: Uuid,
        card_id: Uuid,
    ) -> Result<Vec<UserSummary>> {
        let CardScope { chain, .. } = self.card_scope(board_id, list_id, card_id).await?;
        self.list_members(actor, &chain).await
    }
}
