//! User record store over a persistent key-value slot.
//!
//! # Responsibility
//! - Own the ordered in-memory collection of user records.
//! - Serialize the collection to the fixed `users` slot on every mutation.
//!
//! # Invariants
//! - Insertion order is preserved; there is no secondary ordering key.
//! - A missing or malformed persisted payload loads as the empty collection
//!   and never surfaces an error to the caller.
//! - `update` on an unknown id is a silent no-op; `remove` is idempotent.

use crate::model::user::{UserId, UserRecord, UserValidationError};
use crate::repo::slot_repo::{RepoError, SlotRepository};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed slot key holding the serialized user collection.
pub const USERS_SLOT_KEY: &str = "users";

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error for collection mutations and persistence.
#[derive(Debug)]
pub enum StoreError {
    /// Record failed submit-time invariants.
    Validation(UserValidationError),
    /// Slot persistence failure.
    Repo(RepoError),
    /// Collection could not be serialized for the slot payload.
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize user collection: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<UserValidationError> for StoreError {
    fn from(value: UserValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Replaceable field set for insert and update operations.
///
/// The record id is never part of this shape; it is assigned at insert and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFields {
    pub name: String,
    pub email: String,
    pub avatar: String,
}

/// Record store mirroring the in-memory collection to one slot.
pub struct UserStore<R: SlotRepository> {
    repo: R,
    records: Vec<UserRecord>,
}

impl<R: SlotRepository> UserStore<R> {
    /// Creates an empty store over the provided slot repository.
    ///
    /// Call [`UserStore::load`] before reading to pick up persisted state.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            records: Vec::new(),
        }
    }

    /// Reads the persisted collection and replaces the in-memory one.
    ///
    /// # Contract
    /// - Absent slot -> empty collection.
    /// - Malformed payload -> empty collection, logged as a warning; the
    ///   caller never sees a parse error.
    /// - Storage transport errors still propagate.
    pub fn load(&mut self) -> StoreResult<()> {
        let payload = self.repo.read_slot(USERS_SLOT_KEY)?;
        self.records = match payload.as_deref() {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<UserRecord>>(raw) {
                Ok(records) => records,
                Err(err) => {
                    warn!(
                        "event=users_load module=store status=corrupt_payload error={err}"
                    );
                    Vec::new()
                }
            },
        };
        info!(
            "event=users_load module=store status=ok count={}",
            self.records.len()
        );
        Ok(())
    }

    /// Replaces the whole collection and writes it through to the slot.
    pub fn save(&mut self, new_collection: Vec<UserRecord>) -> StoreResult<()> {
        self.records = new_collection;
        self.persist()
    }

    /// Appends a new record with a fresh unique id and writes through.
    ///
    /// Returns the assigned id.
    pub fn insert(&mut self, fields: UserFields) -> StoreResult<UserId> {
        let record = UserRecord::new(fields.name, fields.email, fields.avatar);
        record.validate()?;

        let id = record.id;
        self.records.push(record);
        self.persist()?;
        Ok(id)
    }

    /// Replaces all mutable fields of the matching record and writes through.
    ///
    /// # Contract
    /// - The id is immutable; only name/email/avatar change.
    /// - No matching record -> silent no-op, no persistence write.
    pub fn update(&mut self, id: UserId, fields: UserFields) -> StoreResult<()> {
        let Some(record) = self.records.iter_mut().find(|record| record.id == id) else {
            info!("event=users_update module=store status=no_match id={id}");
            return Ok(());
        };

        let candidate = UserRecord {
            id,
            name: fields.name,
            email: fields.email,
            avatar: fields.avatar,
        };
        candidate.validate()?;
        *record = candidate;
        self.persist()
    }

    /// Removes the matching record and writes through.
    ///
    /// Idempotent: removing an unknown id leaves the collection unchanged
    /// and skips the persistence write.
    pub fn remove(&mut self, id: UserId) -> StoreResult<()> {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        if self.records.len() == before {
            return Ok(());
        }
        self.persist()
    }

    /// Returns the record with the given id, if present.
    pub fn get(&self, id: UserId) -> Option<&UserRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Returns the current collection in insertion order.
    pub fn users(&self) -> &[UserRecord] {
        &self.records
    }

    fn persist(&self) -> StoreResult<()> {
        let payload = serde_json::to_string(&self.records).map_err(StoreError::Serialize)?;
        self.repo.write_slot(USERS_SLOT_KEY, &payload)?;
        info!(
            "event=users_save module=store status=ok count={}",
            self.records.len()
        );
        Ok(())
    }
}
