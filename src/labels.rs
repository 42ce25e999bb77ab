//! Global label templates versus card-scoped label instances.
//!
//! A label attached to a card is always a fresh copy. Templates are only
//! ever read here.

use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{AttachLabel, Label};

const MAX_NAME_LEN: usize = 50;

/// What the caller asked to attach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelSource {
    Template(Uuid),
    Value { name: String, color: String },
}

impl TryFrom<AttachLabel> for LabelSource {
    type Error = AppError;

    fn try_from(input: AttachLabel) -> Result<Self> {
        match (input.global_label_id, input.name, input.color) {
            (Some(id), None, None) => Ok(LabelSource::Template(id)),
            (None, Some(name), Some(color)) => {
                let name = name.trim().to_string();
                validate_name(&name)?;
                validate_color(&color)?;
                Ok(LabelSource::Value { name, color })
            }
            (Some(_), _, _) => Err(AppError::validation(
                "Give either global_label_id or name and color, not both",
            )),
            _ => Err(AppError::validation("Label name and color are required")),
        }
    }
}

/// A card-scoped label ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDraft {
    pub name: String,
    pub color: String,
    /// Template the draft was copied from, if any.
    pub template_id: Option<Uuid>,
}

pub fn validate_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Label name is required"));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(AppError::validation(format!(
            "Label name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(())
}

/// Accepts `#RGB` and `#RRGGBB`, either case.
pub fn validate_color(color: &str) -> Result<()> {
    let valid = color
        .strip_prefix('#')
        .filter(|hex| matches!(hex.len(), 3 | 6))
        .is_some_and(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()));

    if valid {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Color must be a hex color such as #FF5733, got {:?}",
            color
        )))
    }
}

/// Copies a global template into a card-scoped draft.
pub fn instantiate(template: &Label) -> Result<LabelDraft> {
    if !template.global {
        return Err(AppError::validation("Label is not a global template"));
    }
    Ok(LabelDraft {
        name: template.name.clone(),
        color: template.color.clone(),
        template_id: Some(template.id),
    })
}

/// Draft for attaching by value. `matched` is the global template with the
/// exact same name and color, if the store found one.
pub fn from_value(name: &str, color: &str, matched: Option<&Label>) -> Result<LabelDraft> {
    validate_name(name)?;
    validate_color(color)?;

    match matched {
        Some(template) if template.global && template.name == name && template.color == color => {
            instantiate(template)
        }
        _ => Ok(LabelDraft {
            name: name.to_string(),
            color: color.to_string(),
            template_id: None,
        }),
    }
}

/// Checks that `label` is an instance on `card_id` and may be detached.
pub fn check_detach(label: &Label, card_id: Uuid) -> Result<()> {
    if label.global {
        return Err(AppError::validation(
            "Global templates are removed through the global label endpoints",
        ));
    }
    if label.card_id != Some(card_id) {
        return Err(AppError::mismatch("Label", "card"));
    }
    Ok(())
}
