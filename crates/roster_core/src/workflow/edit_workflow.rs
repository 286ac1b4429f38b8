//! Edit workflow state machine.
//!
//! # Responsibility
//! - Model the add/edit form as an explicit state machine:
//!   `{mode, draft, notification}` with transition methods.
//! - Validate required fields and resolve the avatar at submit time.
//!
//! # Invariants
//! - `Closed` holds no draft data; opening a draft resets or pre-fills it.
//! - Submit commits through the record store or not at all; validation
//!   failures keep the current draft open and untouched.
//! - The placeholder notification is raised only when substitution occurred.

use crate::avatar::resolve_avatar;
use crate::model::user::{UserId, UserRecord, UserValidationError};
use crate::repo::slot_repo::SlotRepository;
use crate::store::user_store::{StoreError, UserFields, UserStore};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Seconds the UI keeps the placeholder notification visible.
///
/// The auto-dismiss timer itself lives in the UI layer; this constant is the
/// contract both sides agree on.
pub const NOTIFICATION_AUTO_DISMISS_SECS: u64 = 5;

/// User-facing text raised when a placeholder avatar was substituted.
pub const PLACEHOLDER_NOTICE: &str = "A placeholder avatar was used.";

/// Current form state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftMode {
    /// No form open.
    Closed,
    /// Creating a new record.
    Create,
    /// Editing the record with this id.
    Edit(UserId),
}

/// Transient, uncommitted field values held while the form is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftFields {
    pub name: String,
    pub email: String,
    pub avatar: String,
}

/// Transient toast-style notification for the list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
}

/// Successful submit summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Id of the created or updated record.
    pub user_id: UserId,
    /// True when the avatar was placeholder-substituted.
    pub used_placeholder: bool,
}

/// Workflow errors surfaced to the form.
#[derive(Debug)]
pub enum WorkflowError {
    /// Submit was called while no draft is open.
    DraftNotOpen,
    /// Required draft fields are missing.
    Validation(UserValidationError),
    /// Commit failed in the record store.
    Store(StoreError),
}

impl Display for WorkflowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DraftNotOpen => write!(f, "no draft is open"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WorkflowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DraftNotOpen => None,
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for WorkflowError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Validation(err) => Self::Validation(err),
            other => Self::Store(other),
        }
    }
}

/// Explicit state machine behind the add/edit form.
#[derive(Debug)]
pub struct EditWorkflow {
    mode: DraftMode,
    draft: DraftFields,
    notification: Option<Notification>,
}

impl Default for EditWorkflow {
    fn default() -> Self {
        Self {
            mode: DraftMode::Closed,
            draft: DraftFields::default(),
            notification: None,
        }
    }
}

impl EditWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an empty create draft.
    pub fn open_create(&mut self) {
        self.mode = DraftMode::Create;
        self.draft = DraftFields::default();
    }

    /// Opens an edit draft pre-filled from an existing record.
    pub fn open_edit(&mut self, record: &UserRecord) {
        self.mode = DraftMode::Edit(record.id);
        self.draft = DraftFields {
            name: record.name.clone(),
            email: record.email.clone(),
            avatar: record.avatar.clone(),
        };
    }

    /// Discards the draft and closes the form. No store mutation.
    pub fn cancel(&mut self) {
        self.mode = DraftMode::Closed;
        self.draft = DraftFields::default();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.draft.email = email.into();
    }

    pub fn set_avatar(&mut self, avatar: impl Into<String>) {
        self.draft.avatar = avatar.into();
    }

    /// Current form state.
    pub fn mode(&self) -> DraftMode {
        self.mode
    }

    /// Current staged field values.
    pub fn draft(&self) -> &DraftFields {
        &self.draft
    }

    /// Pending toast notification, if any.
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Dismisses the pending notification (UI auto-dismiss hook).
    pub fn clear_notification(&mut self) {
        self.notification = None;
    }

    /// Validates the draft, resolves the avatar, and commits to the store.
    ///
    /// # Contract
    /// - Empty name or email: returns a validation error; the draft stays
    ///   open and the store is untouched.
    /// - On success: commits via insert or update, raises the placeholder
    ///   notification when substitution occurred, then discards the draft
    ///   and closes the form.
    pub fn submit<R: SlotRepository>(
        &mut self,
        store: &mut UserStore<R>,
    ) -> Result<SubmitOutcome, WorkflowError> {
        let mode = self.mode;
        if mode == DraftMode::Closed {
            return Err(WorkflowError::DraftNotOpen);
        }
        if self.draft.name.trim().is_empty() {
            return Err(WorkflowError::Validation(UserValidationError::EmptyName));
        }
        if self.draft.email.trim().is_empty() {
            return Err(WorkflowError::Validation(UserValidationError::EmptyEmail));
        }

        let resolved = resolve_avatar(&self.draft.avatar);
        let fields = UserFields {
            name: self.draft.name.clone(),
            email: self.draft.email.clone(),
            avatar: resolved.url,
        };

        let user_id = match mode {
            DraftMode::Closed => return Err(WorkflowError::DraftNotOpen),
            DraftMode::Create => store.insert(fields)?,
            DraftMode::Edit(id) => {
                store.update(id, fields)?;
                id
            }
        };

        if resolved.used_placeholder {
            self.notification = Some(Notification {
                message: PLACEHOLDER_NOTICE.to_string(),
            });
        }

        info!(
            "event=workflow_submit module=workflow status=ok mode={} id={user_id} used_placeholder={}",
            match mode {
                DraftMode::Create => "create",
                _ => "edit",
            },
            resolved.used_placeholder
        );

        self.mode = DraftMode::Closed;
        self.draft = DraftFields::default();

        Ok(SubmitOutcome {
            user_id,
            used_placeholder: resolved.used_placeholder,
        })
    }
}
