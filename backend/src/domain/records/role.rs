//! Stored role rows.

use serde::{Deserialize, Serialize};

use super::{Entity, Record, RecordId, RecordValidationError, Validate, require_text};

/// A stored role. `permissions` is free text shown to administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RecordId,
    pub name: String,
    pub permissions: String,
}

/// Columns supplied when adding or editing a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDraft {
    pub name: String,
    #[serde(default)]
    pub permissions: String,
}

impl Validate for RoleDraft {
    fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("name", &self.name)
    }
}

impl Record for Role {
    type Draft = RoleDraft;
    const ENTITY: Entity = Entity::Role;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: RoleDraft) -> Self {
        Self {
            id,
            name: draft.name,
            permissions: draft.permissions,
        }
    }

    fn unique_key(draft: &RoleDraft) -> Option<&str> {
        Some(&draft.name)
    }
}
