//! User record domain model.
//!
//! # Responsibility
//! - Define the canonical user record persisted in the on-device slot.
//! - Provide constructors and submit-time validation.
//!
//! # Invariants
//! - `id` is stable, non-nil, and never reused for another record.
//! - `name` and `email` are non-empty for every persisted record.
//! - The JSON wire shape is exactly `{id, name, email, avatar}`, all strings.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a user record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type UserId = Uuid;

/// Canonical user record managed by the directory screen.
///
/// The avatar field always holds a usable URL by the time a record is
/// persisted; substitution of non-URL input happens at submit time, before
/// the record reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Stable global ID, serialized as its canonical string form.
    pub id: UserId,
    /// Display name. Required, non-empty.
    pub name: String,
    /// Contact email. Required, non-empty; format is not validated.
    pub email: String,
    /// Avatar image URL. Placeholder-substituted input lands here unchanged.
    pub avatar: String,
}

/// Validation failures for user records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Record id is the nil UUID.
    NilId,
    /// Name is empty or whitespace-only.
    EmptyName,
    /// Email is empty or whitespace-only.
    EmptyEmail,
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "user id must not be nil"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
        }
    }
}

impl Error for UserValidationError {}

impl UserRecord {
    /// Creates a new record with a generated stable ID.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            avatar: avatar.into(),
        }
    }

    /// Creates a record with a caller-provided stable ID.
    ///
    /// Used by load paths where identity already exists in storage.
    ///
    /// # Errors
    /// - Rejects the nil UUID; every persisted record must be addressable.
    pub fn with_id(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        if id.is_nil() {
            return Err(UserValidationError::NilId);
        }
        Ok(Self {
            id,
            name: name.into(),
            email: email.into(),
            avatar: avatar.into(),
        })
    }

    /// Checks submit-time invariants.
    ///
    /// # Contract
    /// - `name` and `email` must contain at least one non-whitespace char.
    /// - `avatar` is intentionally unconstrained here; URL shaping is the
    ///   avatar resolver's concern.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.id.is_nil() {
            return Err(UserValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if self.email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(())
    }
}
