//! User identity model.
//!
//! Purpose: strongly typed representation of registered users. The stored
//! entity carries the password hash and is therefore never serialised
//! directly; inbound adapters project it through a dedicated DTO that has
//! no password field at all.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a plausible address"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an already-parsed UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Role attached to a user account.
///
/// Admins may mutate any grill; regular users only their own. There is no
/// self-service path to `Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Ordinary registered account.
    #[default]
    User,
    /// Moderation account with full mutation rights.
    Admin,
}

impl Role {
    /// Whether this role grants moderation rights.
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Admin => f.write_str("admin"),
        }
    }
}

/// Canonical email address.
///
/// ## Invariants
/// - Stored lowercased, so equality and uniqueness are case-insensitive.
/// - Shape-checked only: one `@` with a non-empty local part and a dotted
///   domain. Deliverability is out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`], lowercasing the input.
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(email.into())
    }

    fn from_owned(email: String) -> Result<Self, UserValidationError> {
        let canonical = email.trim().to_lowercase();
        if !Self::is_plausible(&canonical) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(canonical))
    }

    fn is_plausible(candidate: &str) -> bool {
        let Some((local, domain)) = candidate.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.is_empty() {
            return false;
        }
        if candidate.contains(char::is_whitespace) || domain.contains('@') {
            return false;
        }
        domain
            .split('.')
            .filter(|segment| !segment.is_empty())
            .count()
            >= 2
    }

    /// Borrow the canonical lowercased address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Unvalidated field bundle for building a [`User`].
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub id: UserId,
    pub name: String,
    pub email: EmailAddress,
    pub phone: Option<String>,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Registered account.
///
/// ## Invariants
/// - `name` is non-empty once trimmed.
/// - `email` is canonical (lowercased) and unique across the store.
/// - `password_hash` is a PHC-format hash, never a raw password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    email: EmailAddress,
    phone: Option<String>,
    password_hash: String,
    role: Role,
    created_at: DateTime<Utc>,
}

impl User {
    /// Build a new [`User`], enforcing the name invariant.
    pub fn new(draft: UserDraft) -> Result<Self, UserValidationError> {
        let UserDraft {
            id,
            name,
            email,
            phone,
            password_hash,
            role,
            created_at,
        } = draft;

        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }

        Ok(Self {
            id,
            name,
            email,
            phone,
            password_hash,
            role,
            created_at,
        })
    }

    /// Stable user identifier.
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name shown on grills the user owns.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Canonical email address.
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Optional contact number, stored as supplied.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// PHC-format password hash for credential verification.
    pub fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }

    /// Account role.
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Registration timestamp.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Per-request identity established by token verification.
///
/// Principals are derived from a verified token and dropped when the
/// request completes, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    /// Identifier of the authenticated user.
    pub user_id: UserId,
    /// Role claimed by the verified token.
    pub role: Role,
}

impl Principal {
    /// Build a principal from its verified parts.
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }
}
