//! Driven port for the lookups authentication needs on top of user CRUD.

use async_trait::async_trait;

use super::{EntityRepository, RepositoryError};
use crate::domain::{Role, User};

/// User persistence with username and role-name lookups.
#[async_trait]
pub trait UserRepository: EntityRepository<User> {
    /// Find a user by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    /// Find a role row by exact name.
    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, RepositoryError>;
}
