//! Login, self-registration and administrator-managed user accounts.
//!
//! Plaintext passwords stop here: they are hashed through the
//! [`PasswordHasher`] port before any [`UserDraft`] is built.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use super::catalogue_service::{map_repository_error, map_validation_error};
use super::ports::{
    CatalogueAdmin, LoginService, PasswordHashError, PasswordHasher, RegistrationService,
    RepositoryError, UserRepository,
};
use super::{
    AccessRole, AuthenticatedUser, Error, LoginCredentials, RecordId, Registration,
    RegistrationValidationError, User, UserDraft, Validate,
};

const INVALID_CREDENTIALS: &str = "Invalid username or password.";
const USERNAME_TAKEN: &str = "Username already exists. Please choose a different one.";

/// User account submitted by an administrator.
#[derive(Clone, Deserialize)]
pub struct UserAccountDraft {
    pub username: String,
    pub password: String,
    pub role_id: RecordId,
}

impl fmt::Debug for UserAccountDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserAccountDraft")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role_id", &self.role_id)
            .finish()
    }
}

/// Account use-cases over a user repository and a password hasher.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl AccountService {
    /// Create the service.
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// Create an administrator account unless the username is already taken.
    ///
    /// Returns `true` when a row was inserted.
    pub async fn ensure_administrator(&self, username: &str, password: &str) -> Result<bool, Error> {
        let existing = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Ok(false);
        }
        let draft = self.user_draft(username, password, AccessRole::Administrator.id())?;
        self.users.add(&draft).await.map_err(map_repository_error)?;
        info!(username, "administrator account created");
        Ok(true)
    }

    fn user_draft(&self, username: &str, password: &str, role_id: RecordId) -> Result<UserDraft, Error> {
        if password.trim().is_empty() {
            return Err(Error::invalid_request("password must not be empty"));
        }
        let password_hash = self.hasher.hash(password).map_err(map_hash_error)?;
        let draft = UserDraft {
            username: username.trim().to_owned(),
            password_hash,
            role_id,
        };
        draft.validate().map_err(map_validation_error)?;
        Ok(draft)
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

fn map_user_write_error(error: RepositoryError) -> Error {
    match error {
        RepositoryError::Constraint { .. } => Error::conflict(USERNAME_TAKEN),
        other => map_repository_error(other),
    }
}

#[async_trait]
impl LoginService for AccountService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AuthenticatedUser, Error> {
        let user = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;

        let verified = match self.hasher.verify(credentials.password(), &user.password_hash) {
            Ok(verified) => verified,
            Err(error) => {
                warn!(user_id = %user.id, %error, "stored password hash rejected");
                false
            }
        };
        if !verified {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        info!(user_id = %user.id, role_id = %user.role_id, "user authenticated");
        Ok(AuthenticatedUser {
            user_id: user.id,
            username: user.username,
            role_id: user.role_id,
        })
    }
}

#[async_trait]
impl RegistrationService for AccountService {
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let role = self
            .users
            .find_role_by_name(registration.role().display_name())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::from(RegistrationValidationError::UnknownRole))?;

        let draft = self.user_draft(registration.username(), registration.password(), role.id)?;
        let user = self.users.add(&draft).await.map_err(map_user_write_error)?;
        info!(user_id = %user.id, role = %registration.role(), "user registered");
        Ok(user)
    }
}

#[async_trait]
impl CatalogueAdmin<User, UserAccountDraft> for AccountService {
    async fn list(&self) -> Result<Vec<User>, Error> {
        self.users.list().await.map_err(map_repository_error)
    }

    async fn add(&self, payload: UserAccountDraft) -> Result<User, Error> {
        let draft = self.user_draft(&payload.username, &payload.password, payload.role_id)?;
        let user = self.users.add(&draft).await.map_err(map_user_write_error)?;
        info!(user_id = %user.id, "user added by administrator");
        Ok(user)
    }

    async fn edit(&self, id: RecordId, payload: UserAccountDraft) -> Result<User, Error> {
        let draft = self.user_draft(&payload.username, &payload.password, payload.role_id)?;
        let user = self
            .users
            .edit(id, &draft)
            .await
            .map_err(map_user_write_error)?;
        info!(user_id = %user.id, "user updated by administrator");
        Ok(user)
    }

    async fn delete(&self, id: RecordId) -> Result<(), Error> {
        self.users.delete(id).await.map_err(map_repository_error)?;
        info!(user_id = %id, "user deleted by administrator");
        Ok(())
    }
}
