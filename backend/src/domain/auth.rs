//! Authentication primitives: roles, credentials, registration input and the
//! per-request identity.
//!
//! Inbound adapters build these from raw strings so services only ever see
//! validated values.

use std::fmt;

use serde::Serialize;
use zeroize::Zeroizing;

use super::{Error, RecordId};

/// Minimum password length accepted at registration, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Built-in roles. Their ids match the rows seeded by the initial migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessRole {
    /// Manages every reference table.
    Administrator,
    /// Reads reports, exports and the price analysis.
    Investor,
    /// Reads reports and exports.
    Researcher,
}

impl AccessRole {
    const ALL: [Self; 3] = [Self::Administrator, Self::Investor, Self::Researcher];

    /// Primary key of the matching `roles` row.
    #[must_use]
    pub const fn id(self) -> RecordId {
        match self {
            Self::Administrator => RecordId::new(1),
            Self::Investor => RecordId::new(2),
            Self::Researcher => RecordId::new(3),
        }
    }

    /// Resolve a role from a stored role id.
    #[must_use]
    pub fn from_id(id: RecordId) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.id() == id)
    }

    /// Value stored in `roles.name`.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Administrator => "Administrator",
            Self::Investor => "Investor",
            Self::Researcher => "Researcher",
        }
    }

    /// Resolve a role from its `roles.name` value.
    #[must_use]
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.display_name() == name)
    }

    /// Leading URL segment for the role's pages.
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Administrator => "administrator",
            Self::Investor => "investor",
            Self::Researcher => "researcher",
        }
    }

    /// Resolve a role from a URL segment.
    ///
    /// # Errors
    /// Returns `NotFound` ("Unknown role.") for anything else.
    pub fn from_path_segment(segment: &str) -> Result<Self, Error> {
        Self::ALL
            .into_iter()
            .find(|role| role.path_segment() == segment)
            .ok_or_else(unknown_role)
    }

    /// Only investors and researchers may sign themselves up.
    #[must_use]
    pub const fn is_self_registerable(self) -> bool {
        matches!(self, Self::Investor | Self::Researcher)
    }
}

impl fmt::Display for AccessRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Error returned for role ids or URL segments no role matches.
pub fn unknown_role() -> Error {
    Error::not_found("Unknown role.")
}

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank once trimmed.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - Both values are trimmed and non-empty.
///
/// # Examples
/// ```
/// use mining_insights::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada ", " hunter22 ").unwrap();
/// assert_eq!(creds.username(), "ada");
/// assert_eq!(creds.password(), "hunter22");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        let password = password.trim();
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used for the lookup.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Plaintext password to verify.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Reasons a self-registration is refused. Checked in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// Username was blank once trimmed.
    EmptyUsername,
    /// Password shorter than [`MIN_PASSWORD_LENGTH`].
    PasswordTooShort,
    /// Password and confirmation differ.
    PasswordMismatch,
    /// The requested role is not Investor or Researcher.
    RoleNotRegisterable,
    /// The requested role has no row in the roles table.
    UnknownRole,
}

impl RegistrationValidationError {
    /// Field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "username",
            Self::PasswordTooShort => "password",
            Self::PasswordMismatch => "confirm_password",
            Self::RoleNotRegisterable | Self::UnknownRole => "role",
        }
    }
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => f.write_str("Username must not be empty."),
            Self::PasswordTooShort => write!(
                f,
                "Password must be at least {MIN_PASSWORD_LENGTH} characters."
            ),
            Self::PasswordMismatch => f.write_str("Passwords do not match. Please try again."),
            Self::RoleNotRegisterable => f.write_str("Only Investors and Researchers can register."),
            Self::UnknownRole => {
                f.write_str("Invalid role selected. Please choose Investor or Researcher.")
            }
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

impl From<RegistrationValidationError> for Error {
    fn from(error: RegistrationValidationError) -> Self {
        Self::invalid_request(error.to_string())
            .with_details(serde_json::json!({ "field": error.field() }))
    }
}

/// A validated self-registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: String,
    password: Zeroizing<String>,
    role: AccessRole,
}

impl Registration {
    /// Validate raw registration inputs.
    ///
    /// Inputs are trimmed. Checks run in this order: username present,
    /// password length, confirmation match, then role eligibility.
    pub fn try_from_parts(
        username: &str,
        password: &str,
        confirm_password: &str,
        role_name: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(RegistrationValidationError::EmptyUsername);
        }
        let password = password.trim();
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(RegistrationValidationError::PasswordTooShort);
        }
        if password != confirm_password.trim() {
            return Err(RegistrationValidationError::PasswordMismatch);
        }
        let role = match AccessRole::from_display_name(role_name.trim()) {
            Some(role) if role.is_self_registerable() => role,
            _ => return Err(RegistrationValidationError::RoleNotRegisterable),
        };
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
            role,
        })
    }

    /// Requested username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Plaintext password to hash.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Requested role.
    pub fn role(&self) -> AccessRole {
        self.role
    }
}

/// Identity established at login, returned to the session layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: RecordId,
    pub username: String,
    pub role_id: RecordId,
}

/// Per-request identity resolved from the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestContext {
    username: String,
    role: AccessRole,
}

impl RequestContext {
    /// Build a context for an authenticated user.
    pub fn new(username: impl Into<String>, role: AccessRole) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    /// Authenticated username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Role held by the user.
    pub fn role(&self) -> AccessRole {
        self.role
    }

    /// Fail with `Forbidden` unless the user holds one of `allowed`.
    pub fn require_any(&self, allowed: &[AccessRole]) -> Result<(), Error> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(Error::forbidden("You do not have access to this page."))
        }
    }

    /// Resolve a `/<role>/...` path segment and require it to match the
    /// session role, which must also be one of `allowed`.
    ///
    /// Unknown segments yield `NotFound` before any role comparison.
    pub fn require_path_role(
        &self,
        segment: &str,
        allowed: &[AccessRole],
    ) -> Result<AccessRole, Error> {
        let path_role = AccessRole::from_path_segment(segment)?;
        if !allowed.contains(&path_role) || path_role != self.role {
            return Err(Error::forbidden("You do not have access to this page."));
        }
        Ok(path_role)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "  ", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("ada", "short", "short", "Investor", RegistrationValidationError::PasswordTooShort)]
    #[case("ada", "longenough", "different1", "Investor", RegistrationValidationError::PasswordMismatch)]
    #[case("ada", "longenough", "longenough", "Administrator", RegistrationValidationError::RoleNotRegisterable)]
    #[case("ada", "longenough", "longenough", "Miner", RegistrationValidationError::RoleNotRegisterable)]
    #[case("  ", "longenough", "longenough", "Investor", RegistrationValidationError::EmptyUsername)]
    // length is checked before the confirmation
    #[case("ada", "short", "other", "Administrator", RegistrationValidationError::PasswordTooShort)]
    fn registration_rules_apply_in_order(
        #[case] username: &str,
        #[case] password: &str,
        #[case] confirm: &str,
        #[case] role: &str,
        #[case] expected: RegistrationValidationError,
    ) {
        let err = Registration::try_from_parts(username, password, confirm, role)
            .expect_err("registration must be refused");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn registration_trims_inputs() {
        let registration =
            Registration::try_from_parts(" ada ", " longenough ", "longenough", " Researcher ")
                .expect("valid registration");
        assert_eq!(registration.username(), "ada");
        assert_eq!(registration.password(), "longenough");
        assert_eq!(registration.role(), AccessRole::Researcher);
    }

    #[rstest]
    #[case(AccessRole::Administrator, 1, "administrator")]
    #[case(AccessRole::Investor, 2, "investor")]
    #[case(AccessRole::Researcher, 3, "researcher")]
    fn roles_map_ids_and_segments(#[case] role: AccessRole, #[case] id: i32, #[case] segment: &str) {
        assert_eq!(role.id(), RecordId::new(id));
        assert_eq!(AccessRole::from_id(RecordId::new(id)), Some(role));
        assert_eq!(AccessRole::from_path_segment(segment).ok(), Some(role));
    }

    #[rstest]
    fn unknown_path_segment_is_not_found() {
        let err = AccessRole::from_path_segment("miner").expect_err("unknown role");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Unknown role.");
    }

    #[rstest]
    #[case(AccessRole::Investor, "investor", Ok(AccessRole::Investor))]
    #[case(AccessRole::Investor, "researcher", Err(ErrorCode::Forbidden))]
    #[case(AccessRole::Administrator, "administrator", Err(ErrorCode::Forbidden))]
    #[case(AccessRole::Researcher, "geologist", Err(ErrorCode::NotFound))]
    fn path_role_must_match_session(
        #[case] session_role: AccessRole,
        #[case] segment: &str,
        #[case] expected: Result<AccessRole, ErrorCode>,
    ) {
        let context = RequestContext::new("ada", session_role);
        let result = context
            .require_path_role(segment, &[AccessRole::Investor, AccessRole::Researcher])
            .map_err(|err| err.code());
        assert_eq!(result, expected);
    }
}
