//! Driving ports for login and self-registration.
//!
//! Inbound adapters call these without knowing how users are stored or how
//! passwords are hashed.

use async_trait::async_trait;

use crate::domain::{AuthenticatedUser, Error, LoginCredentials, Registration, User};

/// Authenticate stored users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials. Unknown users and wrong passwords both yield
    /// `Unauthorized` with the same message.
    async fn authenticate(&self, credentials: &LoginCredentials)
    -> Result<AuthenticatedUser, Error>;
}

/// Create investor and researcher accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Hash the password and store the account.
    ///
    /// A taken username yields `Conflict` and leaves the existing row alone.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;
}
