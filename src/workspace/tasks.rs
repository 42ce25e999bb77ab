use uuid::Uuid;

use super::{authorize, required_text, CardPath, CardScope, TaskScope, Workspace};
use crate::access::Capability;
use crate::error::Result;
use crate::models::{CreateTask, Task, UpdateTask, UserSummary};

const MAX_DESCRIPTION: usize = 200;

impl Workspace {
    pub async fn create_task(&self, actor: Uuid, path: CardPath, input: CreateTask) -> Result<Task> {
        let (board_id, list_id, card_id) = path;
        let CardScope { chain, .. } = self.card_scope(board_id, list_id, card_id).await?;
        authorize(&chain, actor, Capability::CreateChild)?;

        let description = required_text(&input.description, "Task description", MAX_DESCRIPTION)?;

        let task = self.tasks.create(card_id, &description, actor).await?;
        tracing::info!(%card_id, task_id = %task.id, %actor, "task created");

        Ok(task)
    }

    pub async fn list_tasks(&self, actor: Uuid, path: CardPath) -> Result<Vec<Task>> {
        let (board_id, list_id, card_id) = path;
        let CardScope { chain, .. } = self.card_scope(board_id, list_id, card_id).await?;
        authorize(&chain, actor, Capability::Read)?;

        self.tasks.list_by_card(card_id).await
    }

    pub async fn get_task(&self, actor: Uuid, path: CardPath, task_id: Uuid) -> Result<Task> {
        let (board_id, list_id, card_id) = path;
        let TaskScope { task, chain } = self.task_scope(board_id, list_id, card_id, task_id).await?;
        authorize(&chain, actor, Capability::Read)?;

        Ok(task)
    }

    pub async fn update_task(
        &self,
        actor: Uuid,
        path: CardPath,
        task_id: Uuid,
        input: UpdateTask,
    ) -> Result<Task> {
        let (board_id, list_id, card_id) = path;
        let TaskScope { chain, .. } = self.task_scope(board_id, list_id, card_id, task_id).await?;
        authorize(&chain, actor, Capability::Update)?;

        let description = input
            .description
            .as_deref()
            .map(|d| required_text(d, "Task description", MAX_DESCRIPTION))
            .transpose()?;

        let task = self
            .tasks
            .update(task_id, description.as_deref(), input.completed)
            .await?;
        tracing::info!(%card_id, %task_id, completed = task.completed, %actor, "task updated");

        Ok(task)
    }

    pub async fn delete_task(&self, actor: Uuid, path: CardPath, task_id: Uuid) -> Result<()> {
        let (board_id, list_id, card_id) = path;
        let TaskScope { chain, .. } = self.task_scope(board_id, list_id, card_id, task_id).await?;
        authorize(&chain, actor, Capability::Delete)?;

        self.tasks.delete(task_id).await?;
        tracing::info!(%card_id, %task_id, %actor, "task deleted");

        Ok(())
    }

    pub async fn add_task_member(
        &self,
        actor: Uuid,
        path: CardPath,
        task_id: Uuid,
        user_id: Uuid,
    ) -> Result<()> {
        let (board_id, list_id, card_id) = path;
        let TaskScope { chain, .. } = self.task_scope(board_id, list_id, card_id, task_id).await?;
        self.add_member(actor, &chain, user_id).await
    }

    pub async fn remove_task_member(
        &self,
        actor: Uuid,
        path: CardPath,
        task_id: Uuid,
        user_id: Uuid,
    ) -> Result<()> {
        let (board_id, list_id, card_id) = path;
        let TaskScope { chain, .. } = self.task_scope(board_id, list_id, card_id, task_id).await?;
        self.remove_member(actor, &chain, user_id).await
    }

    pub async fn list_task_members(
        &self,
        actor: Uuid,
        path: CardPath,
        task_id: Uuid,
    ) -> Result<Vec<UserSummary>> {
        let (board_id, list_id, card_id) = path;
        let TaskScope { chain, .. } = self.task_scope(board_id, list_id, card_id, task_id).await?;
        self.list_members(actor, &chain).await
    }
}
