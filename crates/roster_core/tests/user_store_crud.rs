use roster_core::db::open_db_in_memory;
use roster_core::{
    SlotRepository, SqliteSlotRepository, StoreError, UserFields, UserRecord, UserStore,
    UserValidationError, USERS_SLOT_KEY,
};
use uuid::Uuid;

#[test]
fn load_with_absent_slot_yields_empty_collection() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_on(&conn);

    store.load().unwrap();
    assert!(store.users().is_empty());
}

#[test]
fn insert_then_reload_yields_exactly_one_record() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_on(&conn);
    store.load().unwrap();

    let id = store.insert(fields("Ana", "ana@x.com")).unwrap();

    let mut reloaded = store_on(&conn);
    reloaded.load().unwrap();
    assert_eq!(reloaded.users().len(), 1);
    let record = &reloaded.users()[0];
    assert_eq!(record.id, id);
    assert_eq!(record.name, "Ana");
    assert_eq!(record.email, "ana@x.com");
}

#[test]
fn insert_assigns_unique_ids_and_preserves_order() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_on(&conn);
    store.load().unwrap();

    let first = store.insert(fields("a", "a@x.com")).unwrap();
    let second = store.insert(fields("b", "b@x.com")).unwrap();

    assert_ne!(first, second);
    assert_eq!(store.users()[0].id, first);
    assert_eq!(store.users()[1].id, second);
}

#[test]
fn insert_permits_duplicate_emails() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_on(&conn);
    store.load().unwrap();

    store.insert(fields("First", "same@x.com")).unwrap();
    store.insert(fields("Second", "same@x.com")).unwrap();

    assert_eq!(store.users().len(), 2);
}

#[test]
fn update_patches_matching_record_and_leaves_others_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_on(&conn);
    store.load().unwrap();

    let target = store.insert(fields("Ana", "ana@x.com")).unwrap();
    let other = store.insert(fields("Bob", "bob@x.com")).unwrap();

    store
        .update(
            target,
            UserFields {
                name: "Ana Silva".to_string(),
                email: "ana@x.com".to_string(),
                avatar: "https://example.com/new.png".to_string(),
            },
        )
        .unwrap();

    let mut reloaded = store_on(&conn);
    reloaded.load().unwrap();
    let patched = reloaded.get(target).unwrap();
    assert_eq!(patched.name, "Ana Silva");
    assert_eq!(patched.avatar, "https://example.com/new.png");

    let untouched = reloaded.get(other).unwrap();
    assert_eq!(untouched.name, "Bob");
    assert_eq!(untouched.email, "bob@x.com");
}

#[test]
fn update_with_unknown_id_is_silent_no_op() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_on(&conn);
    store.load().unwrap();
    store.insert(fields("Ana", "ana@x.com")).unwrap();

    store
        .update(Uuid::new_v4(), fields("Ghost", "ghost@x.com"))
        .unwrap();

    assert_eq!(store.users().len(), 1);
    assert_eq!(store.users()[0].name, "Ana");
}

#[test]
fn update_keeps_id_immutable() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_on(&conn);
    store.load().unwrap();

    let id = store.insert(fields("Ana", "ana@x.com")).unwrap();
    store.update(id, fields("Renamed", "renamed@x.com")).unwrap();

    assert_eq!(store.users()[0].id, id);
}

#[test]
fn remove_deletes_matching_record() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_on(&conn);
    store.load().unwrap();

    let id = store.insert(fields("Ana", "ana@x.com")).unwrap();
    store.remove(id).unwrap();

    assert!(store.users().is_empty());
    let mut reloaded = store_on(&conn);
    reloaded.load().unwrap();
    assert!(reloaded.users().is_empty());
}

#[test]
fn remove_is_idempotent_for_unknown_id() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_on(&conn);
    store.load().unwrap();
    store.insert(fields("Ana", "ana@x.com")).unwrap();

    store.remove(Uuid::new_v4()).unwrap();
    store.remove(Uuid::new_v4()).unwrap();

    assert_eq!(store.users().len(), 1);
}

#[test]
fn save_replaces_whole_collection_and_writes_through() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_on(&conn);
    store.load().unwrap();
    store.insert(fields("Old", "old@x.com")).unwrap();

    let replacement = vec![
        UserRecord::new("New A", "a@x.com", "https://example.com/a.png"),
        UserRecord::new("New B", "b@x.com", "https://example.com/b.png"),
    ];
    store.save(replacement.clone()).unwrap();

    let mut reloaded = store_on(&conn);
    reloaded.load().unwrap();
    assert_eq!(reloaded.users(), replacement.as_slice());
}

#[test]
fn malformed_payload_loads_as_empty_collection() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    repo.write_slot(USERS_SLOT_KEY, "{ definitely not json").unwrap();

    let mut store = store_on(&conn);
    store.load().unwrap();
    assert!(store.users().is_empty());
}

#[test]
fn validation_failure_blocks_insert_and_update() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_on(&conn);
    store.load().unwrap();

    let err = store.insert(fields("", "a@x.com")).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(UserValidationError::EmptyName)
    ));
    assert!(store.users().is_empty());

    let id = store.insert(fields("Ana", "ana@x.com")).unwrap();
    let err = store.update(id, fields("Ana", "")).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(UserValidationError::EmptyEmail)
    ));
    assert_eq!(store.users()[0].email, "ana@x.com");
}

fn store_on(conn: &rusqlite::Connection) -> UserStore<SqliteSlotRepository<'_>> {
    UserStore::new(SqliteSlotRepository::try_new(conn).unwrap())
}

fn fields(name: &str, email: &str) -> UserFields {
    UserFields {
        name: name.to_string(),
        email: email.to_string(),
        avatar: "https://example.com/avatar.png".to_string(),
    }
}
