use uuid::Uuid;

use super::{authorize, CardPath, CardScope, Workspace};
use crate::access::{Capability, Denial};
use crate::error::{AppError, Result};
use crate::labels::{self, LabelSource};
use crate::models::{AttachLabel, CreateGlobalLabel, Label};

impl Workspace {
    /// Attaches a fresh card-scoped copy of a label. Templates are never
    /// linked or modified.
    pub async fn attach_label(&self, actor: Uuid, path: CardPath, input: AttachLabel) -> Result<Label> {
        let (board_id, list_id, card_id) = path;
        let CardScope { chain, .. } = self.card_scope(board_id, list_id, card_id).await?;
        authorize(&chain, actor, Capability::ManageLabels)?;

        let draft = match LabelSource::try_from(input)? {
            LabelSource::Template(template_id) => {
                let template = self.labels.get_by_id(template_id).await?;
                labels::instantiate(&template)?
            }
            LabelSource::Value { name, color } => {
                let matched = self.labels.find_global_by_value(&name, &color).await?;
                labels::from_value(&name, &color, matched.as_ref())?
            }
        };

        let label = self
            .labels
            .create_for_card(card_id, &draft.name, &draft.color, actor)
            .await?;

        tracing::info!(
            %card_id,
            label_id = %label.id,
            template_id = ?draft.template_id,
            %actor,
            "label attached"
        );

        Ok(label)
    }

    pub async fn detach_label(&self, actor: Uuid, path: CardPath, label_id: Uuid) -> Result<()> {
        let (board_id, list_id, card_id) = path;
        let CardScope { chain, .. } = self.card_scope(board_id, list_id, card_id).await?;
        authorize(&chain, actor, Capability::ManageLabels)?;

        let label = self.labels.get_by_id(label_id).await?;
        labels::check_detach(&label, card_id)?;

        self.labels.delete(label_id).await?;
        tracing::info!(%card_id, %label_id, %actor, "label detached");

        Ok(())
    }

    pub async fn list_card_labels(&self, actor: Uuid, path: CardPath) -> Result<Vec<Label>> {
        let (board_id, list_id, card_id) = path;
        let CardScope { chain, .. } = self.card_scope(board_id, list_id, card_id).await?;
        authorize(&chain, actor, Capability::Read)?;

        self.labels.list_for_card(card_id).await
    }

    pub async fn create_global_label(&self, actor: Uuid, input: CreateGlobalLabel) -> Result<Label> {
        labels::validate_name(&input.name)?;
        labels::validate_color(&input.color)?;

        let label = self
            .labels
            .create_global(input.name.trim(), &input.color, actor)
            .await?;
        tracing::info!(label_id = %label.id, %actor, "global label created");

        Ok(label)
    }

    pub async fn list_global_labels(&self) -> Result<Vec<Label>> {
        self.labels.list_global().await
    }

    /// Deletes a template. Only its creator may do so; a template whose
    /// creator account is gone may be deleted by any user. Card copies made
    /// from it are unaffected.
    pub async fn delete_global_label(&self, actor: Uuid, label_id: Uuid) -> Result<()> {
        let label = self.labels.get_by_id(label_id).await?;
        if !label.global {
            return Err(AppError::validation("Label is not a global template"));
        }
        if label.created_by.is_some_and(|creator| creator != actor) {
            tracing::debug!(%actor, %label_id, "global label delete denied");
            return Err(AppError::Forbidden(Denial::NotOwner));
        }

        self.labels.delete(label_id).await?;
        tracing::info!(%label_id, %actor, "global label deleted");

        Ok(())
    }
}
