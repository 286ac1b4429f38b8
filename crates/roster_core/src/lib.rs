//! Core domain logic for Roster.
//! This crate is the single source of truth for business invariants.

pub mod avatar;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;
pub mod workflow;

pub use avatar::{is_url_shaped, resolve_avatar, AvatarResolution, PLACEHOLDER_AVATARS};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::user::{UserId, UserRecord, UserValidationError};
pub use repo::slot_repo::{RepoError, RepoResult, SlotRepository, SqliteSlotRepository};
pub use store::user_store::{StoreError, StoreResult, UserFields, UserStore, USERS_SLOT_KEY};
pub use workflow::edit_workflow::{
    DraftFields, DraftMode, EditWorkflow, Notification, SubmitOutcome, WorkflowError,
    NOTIFICATION_AUTO_DISMISS_SECS, PLACEHOLDER_NOTICE,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
