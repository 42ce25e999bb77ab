//! Workspace operations: one method per use case.
//!
//! Every operation loads the entities named by its path, checks that each
//! child really sits under the given parent, authorizes the actor against
//! the full ancestor chain, and only then writes. Nothing is cached between
//! calls.

mod boards;
mod cards;
mod labels;
mod lists;
mod tasks;

use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

use crate::access::{AccessChain, Capability, Grant, Level, Standing};
use crate::error::{AppError, Result};
use crate::models::{Board, BoardList, Card, CardResponse, Task, UserSummary};
use crate::position::PositionSequencer;
use crate::repo::{
    board::BoardRepository, card::CardRepository, label::LabelRepository, list::ListRepository,
    member::MembershipRepository, task::TaskRepository, user::UserRepository,
};

/// Path to a card: board, list, card.
pub type CardPath = (Uuid, Uuid, Uuid);

#[derive(Clone)]
pub struct Workspace {
    pub users: UserRepository,
    pub boards: BoardRepository,
    pub lists: ListRepository,
    pub cards: CardRepository,
    pub tasks: TaskRepository,
    pub labels: LabelRepository,
    board_members: MembershipRepository,
    list_members: MembershipRepository,
    card_members: MembershipRepository,
    task_members: MembershipRepository,
    sequencer: PositionSequencer,
}

pub(crate) struct BoardScope {
    pub board: Board,
    pub chain: AccessChain,
}

pub(crate) struct ListScope {
    pub list: BoardList,
    pub chain: AccessChain,
}

pub(crate) struct CardScope {
    pub card: Card,
    pub chain: AccessChain,
}

pub(crate) struct TaskScope {
    pub task: Task,
    pub chain: AccessChain,
}

impl Workspace {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            boards: BoardRepository::new(pool.clone()),
            lists: ListRepository::new(pool.clone()),
            cards: CardRepository::new(pool.clone()),
            tasks: TaskRepository::new(pool.clone()),
            labels: LabelRepository::new(pool.clone()),
            board_members: MembershipRepository::new(pool.clone(), Level::Board),
            list_members: MembershipRepository::new(pool.clone(), Level::List),
            card_members: MembershipRepository::new(pool.clone(), Level::Card),
            task_members: MembershipRepository::new(pool, Level::Task),
            sequencer: PositionSequencer::new(),
        }
    }

    fn members(&self, level: Level) -> &MembershipRepository {
        match level {
            Level::Board => &self.board_members,
            Level::List => &self.list_members,
            Level::Card => &self.card_members,
            Level::Task => &self.task_members,
        }
    }

    async fn grant(&self, level: Level, entity_id: Uuid, owner_id: Option<Uuid>) -> Result<Grant> {
        let members = self.members(level).list(entity_id).await?;
        Ok(Grant::new(level, entity_id, owner_id, members))
    }

    pub(crate) async fn board_scope(&self, board_id: Uuid) -> Result<BoardScope> {
        let board = self.boards.get_by_id(board_id).await?;
        let chain = AccessChain::board(
            self.grant(Level::Board, board.id, Some(board.owner_id))
                .await?,
        );
        Ok(BoardScope { board, chain })
    }

    pub(crate) async fn list_scope(&self, board_id: Uuid, list_id: Uuid) -> Result<ListScope> {
        let BoardScope { chain, .. } = self.board_scope(board_id).await?;
        let list = self.lists.get_by_id(list_id).await?;
        if list.board_id != board_id {
            return Err(AppError::mismatch("List", "board"));
        }
        let chain = chain.push(self.grant(Level::List, list.id, list.owner_id).await?);
        Ok(ListScope { list, chain })
    }

    pub(crate) async fn card_scope(
        &self,
        board_id: Uuid,
        list_id: Uuid,
        card_id: Uuid,
    ) -> Result<CardScope> {
        let ListScope { chain, .. } = self.list_scope(board_id, list_id).await?;
        let card = self.cards.get_by_id(card_id).await?;
        if card.list_id != list_id {
            return Err(AppError::mismatch("Card", "list"));
        }
        let chain = chain.push(self.grant(Level::Card, card.id, card.owner_id).await?);
        Ok(CardScope { card, chain })
    }

    pub(crate) async fn task_scope(
        &self,
        board_id: Uuid,
        list_id: Uuid,
        card_id: Uuid,
        task_id: Uuid,
    ) -> Result<TaskScope> {
        let CardScope { chain, .. } = self.card_scope(board_id, list_id, card_id).await?;
        let task = self.tasks.get_by_id(task_id).await?;
        if task.card_id != card_id {
            return Err(AppError::mismatch("Task", "card"));
        }
        let chain = chain.push(self.grant(Level::Task, task.id, task.owner_id).await?);
        Ok(TaskScope { task, chain })
    }

    async fn card_response(&self, card: Card) -> Result<CardResponse> {
        let labels = self.labels.list_for_card(card.id).await?;
        Ok(card.into_response(labels))
    }

    async fn add_member(&self, actor: Uuid, chain: &AccessChain, user_id: Uuid) -> Result<()> {
        authorize(chain, actor, Capability::ManageMembers)?;
        let target = chain.target();

        self.users.get_by_id(user_id).await?;

        if target.is_owner(user_id) {
            return Err(AppError::validation(format!(
                "User already owns this {}",
                target.level
            )));
        }
        if target.level != Level::Board && chain.root().standing(user_id).is_none() {
            return Err(AppError::validation(
                "User must be a member of the board first",
            ));
        }

        let added = self
            .members(target.level)
            .add(target.entity_id, user_id)
            .await?;

        if added {
            tracing::info!(
                level = %target.level,
                entity_id = %target.entity_id,
                %user_id,
                "member added"
            );
        }

        Ok(())
    }

    async fn remove_member(&self, actor: Uuid, chain: &AccessChain, user_id: Uuid) -> Result<()> {
        authorize(chain, actor, Capability::ManageMembers)?;
        let target = chain.target();

        self.members(target.level)
            .remove(target.entity_id, user_id)
            .await?;

        tracing::info!(
            level = %target.level,
            entity_id = %target.entity_id,
            %user_id,
            "member removed"
        );

        Ok(())
    }

    async fn list_members(&self, actor: Uuid, chain: &AccessChain) -> Result<Vec<UserSummary>> {
        authorize(chain, actor, Capability::Read)?;
        let target = chain.target();
        self.members(target.level).list_users(target.entity_id).await
    }
}

/// Runs the evaluator and turns a denial into `Forbidden`.
pub(crate) fn authorize(
    chain: &AccessChain,
    actor: Uuid,
    capability: Capability,
) -> Result<Standing> {
    chain.authorize(actor, capability).map_err(|denial| {
        let target = chain.target();
        tracing::debug!(
            %actor,
            level = %target.level,
            entity_id = %target.entity_id,
            ?capability,
            reason = denial.code(),
            "access denied"
        );
        AppError::Forbidden(denial)
    })
}

/// Trims `value` and checks it is present and at most `max` characters.
pub(crate) fn required_text(value: &str, field: &str, max: usize) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{} is required", field)));
    }
    optional_text(Some(value), field, max)?;
    Ok(value.to_string())
}

pub(crate) fn optional_text(value: Option<&str>, field: &str, max: usize) -> Result<()> {
    match value {
        Some(v) if v.chars().count() > max => Err(AppError::validation(format!(
            "{} must be at most {} characters",
            field, max
        ))),
        _ => Ok(()),
    }
}
