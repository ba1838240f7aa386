//! Stored user accounts.

use serde::{Deserialize, Serialize};

use super::{Entity, Record, RecordId, RecordValidationError, Validate, require_text};

/// A stored user. `password_hash` is an Argon2 PHC string and is never
/// serialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role_id: RecordId,
}

/// Columns written to the users table. Built by the account service after
/// hashing, never straight from a request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub username: String,
    pub password_hash: String,
    pub role_id: RecordId,
}

impl Validate for UserDraft {
    fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("username", &self.username)?;
        require_text("password_hash", &self.password_hash)
    }
}

impl Record for User {
    type Draft = UserDraft;
    const ENTITY: Entity = Entity::User;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: UserDraft) -> Self {
        Self {
            id,
            username: draft.username,
            password_hash: draft.password_hash,
            role_id: draft.role_id,
        }
    }

    fn unique_key(draft: &UserDraft) -> Option<&str> {
        Some(&draft.username)
    }
}
