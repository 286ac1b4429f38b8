//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Keep error semantics simple for the single-screen UI.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Return values are envelope structs with stable meaning.

use roster_core::db::open_db;
use roster_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    EditWorkflow, SqliteSlotRepository, UserId, UserStore, NOTIFICATION_AUTO_DISMISS_SECS,
    PLACEHOLDER_NOTICE,
};
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const ROSTER_DB_FILE_NAME: &str = "roster_users.sqlite3";
static ROSTER_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - UI-thread safe for current implementation.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - UI-thread safe for current implementation.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Seconds the UI should keep the placeholder toast visible.
///
/// # FFI contract
/// - Sync call, constant value.
#[flutter_rust_bridge::frb(sync)]
pub fn notification_auto_dismiss_secs() -> u32 {
    NOTIFICATION_AUTO_DISMISS_SECS as u32
}

/// List item returned by the user list API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserView {
    /// Stable record ID in string form.
    pub id: String,
    pub name: String,
    pub email: String,
    /// Always a usable image URL (placeholder-substituted at save time).
    pub avatar: String,
}

/// Response envelope for the user list flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserListResponse {
    /// Records in insertion order (empty when none are stored).
    pub items: Vec<UserView>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope for save/delete flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Affected record ID on success.
    pub user_id: Option<String>,
    /// True when the avatar was replaced with a placeholder.
    pub used_placeholder: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl UserActionResponse {
    fn success(message: impl Into<String>, user_id: String, used_placeholder: bool) -> Self {
        Self {
            ok: true,
            user_id: Some(user_id),
            used_placeholder,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            user_id: None,
            used_placeholder: false,
            message: message.into(),
        }
    }
}

/// Returns the stored user collection for the list screen.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - A missing or unreadable collection yields an empty list plus a
///   diagnostic message, never an exception.
#[flutter_rust_bridge::frb(sync)]
pub fn users_list() -> UserListResponse {
    match with_user_store(|store| {
        Ok(store
            .users()
            .iter()
            .map(|record| UserView {
                id: record.id.to_string(),
                name: record.name.clone(),
                email: record.email.clone(),
                avatar: record.avatar.clone(),
            })
            .collect::<Vec<_>>())
    }) {
        Ok(items) => {
            let message = if items.is_empty() {
                "No users stored.".to_string()
            } else {
                format!("Found {} user(s).", items.len())
            };
            UserListResponse { items, message }
        }
        Err(err) => UserListResponse {
            items: Vec::new(),
            message: format!("users_list failed: {err}"),
        },
    }
}

/// Creates or updates a user from the add/edit form.
///
/// Input semantics:
/// - `user_id = None`: create a new record.
/// - `user_id = Some(id)`: edit the record with that id.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Validation failures (empty name/email) return `ok = false` with the
///   message and leave the stored collection untouched.
/// - `used_placeholder = true` signals the UI to show the placeholder toast.
#[flutter_rust_bridge::frb(sync)]
pub fn users_save(
    user_id: Option<String>,
    name: String,
    email: String,
    avatar: String,
) -> UserActionResponse {
    let outcome = with_user_store(|store| {
        let mut workflow = EditWorkflow::new();
        match user_id.as_deref() {
            None => workflow.open_create(),
            Some(raw) => {
                let id = parse_user_id(raw)?;
                let record = store
                    .get(id)
                    .cloned()
                    .ok_or_else(|| format!("user not found: {id}"))?;
                workflow.open_edit(&record);
            }
        }
        workflow.set_name(name.trim());
        workflow.set_email(email.trim());
        workflow.set_avatar(avatar.as_str());
        workflow
            .submit(store)
            .map_err(|err| format!("user save failed: {err}"))
    });

    match outcome {
        Ok(result) => {
            let message = if result.used_placeholder {
                PLACEHOLDER_NOTICE
            } else {
                "User saved."
            };
            UserActionResponse::success(
                message,
                result.user_id.to_string(),
                result.used_placeholder,
            )
        }
        Err(err) => UserActionResponse::failure(err),
    }
}

/// Deletes a user after the UI's confirmation prompt.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Deleting an unknown id succeeds (idempotent remove).
#[flutter_rust_bridge::frb(sync)]
pub fn users_delete(user_id: String) -> UserActionResponse {
    let outcome = with_user_store(|store| {
        let id = parse_user_id(&user_id)?;
        store
            .remove(id)
            .map_err(|err| format!("user delete failed: {err}"))?;
        Ok(id)
    });

    match outcome {
        Ok(id) => UserActionResponse::success("User deleted.", id.to_string(), false),
        Err(err) => UserActionResponse::failure(err),
    }
}

fn parse_user_id(raw: &str) -> Result<UserId, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid user id `{raw}`"))
}

fn resolve_roster_db_path() -> PathBuf {
    ROSTER_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("ROSTER_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(ROSTER_DB_FILE_NAME)
        })
        .clone()
}

fn with_user_store<T>(
    f: impl FnOnce(&mut UserStore<SqliteSlotRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let db_path = resolve_roster_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("roster DB open failed: {err}"))?;
    let repo = SqliteSlotRepository::try_new(&conn)
        .map_err(|err| format!("roster repo init failed: {err}"))?;
    let mut store = UserStore::new(repo);
    store
        .load()
        .map_err(|err| format!("user list load failed: {err}"))?;
    f(&mut store)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, notification_auto_dismiss_secs, ping, users_delete,
        users_list, users_save,
    };
    use std::sync::{Mutex, MutexGuard};
    use std::time::{SystemTime, UNIX_EPOCH};

    // The save/delete flows rewrite the whole `users` slot; concurrent tests
    // on the shared test database would race on last-writer-wins. Serialize
    // the DB-backed tests instead.
    static DB_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn db_lock() -> MutexGuard<'static, ()> {
        DB_TEST_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn toast_duration_matches_contract() {
        assert_eq!(notification_auto_dismiss_secs(), 5);
    }

    #[test]
    fn save_create_then_list_contains_user() {
        let _guard = db_lock();
        let email = unique_token("create");
        let saved = users_save(
            None,
            "List Me".to_string(),
            email.clone(),
            "https://example.com/a.png".to_string(),
        );
        assert!(saved.ok, "{}", saved.message);
        assert!(!saved.used_placeholder);
        let saved_id = saved.user_id.clone().expect("create should return id");

        let listed = users_list();
        assert!(listed
            .items
            .iter()
            .any(|item| item.id == saved_id && item.email == email));
    }

    #[test]
    fn save_without_name_fails_and_stores_nothing() {
        let _guard = db_lock();
        let email = unique_token("invalid");
        let saved = users_save(
            None,
            String::new(),
            email.clone(),
            String::new(),
        );
        assert!(!saved.ok);
        assert!(saved.message.contains("name"));

        let listed = users_list();
        assert!(!listed.items.iter().any(|item| item.email == email));
    }

    #[test]
    fn save_with_blank_avatar_reports_placeholder() {
        let _guard = db_lock();
        let email = unique_token("placeholder");
        let saved = users_save(None, "Toast".to_string(), email, String::new());
        assert!(saved.ok, "{}", saved.message);
        assert!(saved.used_placeholder);
        assert!(saved.message.contains("placeholder"));
    }

    #[test]
    fn save_edit_updates_existing_record() {
        let _guard = db_lock();
        let email = unique_token("edit");
        let created = users_save(
            None,
            "Before".to_string(),
            email.clone(),
            "https://example.com/b.png".to_string(),
        );
        assert!(created.ok, "{}", created.message);
        let id = created.user_id.expect("create should return id");

        let edited = users_save(
            Some(id.clone()),
            "After".to_string(),
            email.clone(),
            "https://example.com/b.png".to_string(),
        );
        assert!(edited.ok, "{}", edited.message);
        assert_eq!(edited.user_id.as_deref(), Some(id.as_str()));

        let listed = users_list();
        let item = listed
            .items
            .iter()
            .find(|item| item.id == id)
            .expect("edited user should still be listed");
        assert_eq!(item.name, "After");
    }

    #[test]
    fn delete_removes_record_and_is_idempotent() {
        let _guard = db_lock();
        let email = unique_token("delete");
        let created = users_save(None, "Bye".to_string(), email, String::new());
        assert!(created.ok, "{}", created.message);
        let id = created.user_id.expect("create should return id");

        let deleted = users_delete(id.clone());
        assert!(deleted.ok, "{}", deleted.message);
        assert!(!users_list().items.iter().any(|item| item.id == id));

        let again = users_delete(id);
        assert!(again.ok, "{}", again.message);
    }

    #[test]
    fn delete_rejects_malformed_id() {
        let response = users_delete("not-a-uuid".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("invalid user id"));
    }

    #[test]
    fn saved_collection_lands_in_users_slot_as_json() {
        let _guard = db_lock();
        let email = unique_token("slot");
        let saved = users_save(
            None,
            "Wire Shape".to_string(),
            email.clone(),
            "https://example.com/w.png".to_string(),
        );
        assert!(saved.ok, "{}", saved.message);

        let conn = roster_core::db::open_db(super::resolve_roster_db_path()).expect("open db");
        let payload: String = conn
            .query_row(
                "SELECT value FROM slots WHERE key = ?1",
                [roster_core::USERS_SLOT_KEY],
                |row| row.get(0),
            )
            .expect("users slot should exist");
        assert!(payload.starts_with('['));
        assert!(payload.contains(&email));
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}@example.com")
    }
}
