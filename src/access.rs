//! Capability evaluation over the Board → List → Card → Task chain.
//!
//! An [`AccessChain`] is a snapshot of owner and member sets for the target
//! entity and every ancestor above it, loaded fresh for each operation.
//! Evaluation is pure: it never touches the store or mutates a grant.

use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Board,
    List,
    Card,
    Task,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Board => write!(f, "board"),
            Level::List => write!(f, "list"),
            Level::Card => write!(f, "card"),
            Level::Task => write!(f, "task"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Get or list the entity and its children.
    Read,
    /// Add a child entity beneath the target.
    CreateChild,
    /// Edit the target's own fields, including position and dates.
    Update,
    Delete,
    /// Add or remove users from the target's member set.
    ManageMembers,
    /// Attach or detach labels on a card.
    ManageLabels,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Denial {
    #[error("only the owner may do this")]
    NotOwner,
    #[error("not a member")]
    NotMember,
    #[error("no access through any enclosing board")]
    NoAncestorAccess,
}

impl Denial {
    pub fn code(&self) -> &'static str {
        match self {
            Denial::NotOwner => "not_owner",
            Denial::NotMember => "not_member",
            Denial::NoAncestorAccess => "no_ancestor_access",
        }
    }
}

/// How a capability was granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Standing {
    Owner,
    Member,
    Ancestor,
}

impl std::fmt::Display for Standing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Standing::Owner => write!(f, "owner"),
            Standing::Member => write!(f, "member"),
            Standing::Ancestor => write!(f, "ancestor"),
        }
    }
}

/// Owner and members of a single entity.
#[derive(Debug, Clone)]
pub struct Grant {
    pub level: Level,
    pub entity_id: Uuid,
    pub owner_id: Option<Uuid>,
    pub members: Vec<Uuid>,
}

impl Grant {
    pub fn new(level: Level, entity_id: Uuid, owner_id: Option<Uuid>, members: Vec<Uuid>) -> Self {
        Self {
            level,
            entity_id,
            owner_id,
            members,
        }
    }

    pub fn is_owner(&self, user_id: Uuid) -> bool {
        self.owner_id == Some(user_id)
    }

    pub fn is_member(&self, user_id: Uuid) -> bool {
        self.members.contains(&user_id)
    }

    pub fn standing(&self, user_id: Uuid) -> Option<Standing> {
        if self.is_owner(user_id) {
            Some(Standing::Owner)
        } else if self.is_member(user_id) {
            Some(Standing::Member)
        } else {
            None
        }
    }
}

/// Grants from the board down to the target entity, root first.
#[derive(Debug, Clone)]
pub struct AccessChain {
    grants: Vec<Grant>,
}

impl AccessChain {
    pub fn board(grant: Grant) -> Self {
        debug_assert_eq!(grant.level, Level::Board);
        Self {
            grants: vec![grant],
        }
    }

    pub fn push(mut self, grant: Grant) -> Self {
        debug_assert!(self.target().level < grant.level);
        self.grants.push(grant);
        self
    }

    pub fn target(&self) -> &Grant {
        // The chain is never empty: it is built from a board grant.
        &self.grants[self.grants.len() - 1]
    }

    pub fn root(&self) -> &Grant {
        &self.grants[0]
    }

    pub fn ancestors(&self) -> &[Grant] {
        &self.grants[..self.grants.len() - 1]
    }

    pub fn authorize(&self, user_id: Uuid, capability: Capability) -> Result<Standing, Denial> {
        let target = self.target();
        let direct = target.standing(user_id);

        // Nothing under a board is reachable without standing on the board itself.
        if self.root().standing(user_id).is_none() {
            return Err(if self.grants.len() == 1 {
                Denial::NotMember
            } else {
                Denial::NoAncestorAccess
            });
        }

        match capability {
            Capability::Delete => {
                if target.is_owner(user_id) {
                    Ok(Standing::Owner)
                } else {
                    Err(Denial::NotOwner)
                }
            }
            Capability::ManageMembers => {
                if target.is_owner(user_id) {
                    Ok(Standing::Owner)
                } else if self.ancestors().iter().any(|g| g.is_owner(user_id)) {
                    Ok(Standing::Ancestor)
                } else {
                    Err(Denial::NotOwner)
                }
            }
            Capability::Read | Capability::CreateChild => direct
                .or_else(|| {
                    self.ancestors()
                        .iter()
                        .any(|g| g.standing(user_id).is_some())
                        .then_some(Standing::Ancestor)
                })
                .ok_or(Denial::NoAncestorAccess),
            Capability::Update => direct
                .or_else(|| {
                    self.root()
                        .standing(user_id)
                        .map(|_| Standing::Ancestor)
                })
                .ok_or(Denial::NotMember),
            Capability::ManageLabels => self
                .root()
                .standing(user_id)
                .map(|board| direct.unwrap_or(if target.level == Level::Board {
                    board
                } else {
                    Standing::Ancestor
                }))
                .ok_or(Denial::NoAncestorAccess),
        }
    }
}
