//! Integration tests for accounts and the credential repository.

use std::fs;

use secretbook::errors::SecretBookError;
use secretbook::vault::{AccountStore, CredentialRecord, CredentialRepository};
use tempfile::TempDir;

/// Helper: a repository over a fresh store inside a temp dir.
fn repository() -> (TempDir, CredentialRepository) {
    let dir = TempDir::new().expect("create temp dir");
    let store = AccountStore::new(dir.path().join("users.json"));
    (dir, CredentialRepository::new(store))
}

/// Helper: register `name` and log in.
fn logged_in(name: &str) -> (TempDir, CredentialRepository) {
    let (dir, mut repo) = repository();
    repo.register(name, "login-secret").expect("register");
    repo.login(name, "login-secret").expect("login");
    (dir, repo)
}

// ---------------------------------------------------------------------------
// Registration and login
// ---------------------------------------------------------------------------

#[test]
fn register_twice_fails() {
    let (_dir, repo) = repository();
    repo.register("alice", "secret-1").unwrap();

    let result = repo.register("alice", "secret-2");
    assert!(matches!(result, Err(SecretBookError::AccountExists(name)) if name == "alice"));
}

#[test]
fn account_names_are_case_sensitive() {
    let (_dir, repo) = repository();
    repo.register("alice", "secret-1").unwrap();
    repo.register("Alice", "secret-2").unwrap();
    assert_eq!(repo.store().load().unwrap().len(), 2);
}

#[test]
fn login_rejects_unknown_account_and_wrong_secret() {
    let (_dir, mut repo) = repository();
    repo.register("alice", "secret-1").unwrap();

    assert!(matches!(
        repo.login("bob", "secret-1"),
        Err(SecretBookError::InvalidCredentials)
    ));
    assert!(matches!(
        repo.login("alice", "wrong"),
        Err(SecretBookError::InvalidCredentials)
    ));
    assert_eq!(repo.current_account(), None);
}

#[test]
fn stored_hash_is_not_the_secret() {
    let (dir, repo) = repository();
    repo.register("alice", "plain-secret").unwrap();

    let raw = fs::read_to_string(dir.path().join("users.json")).unwrap();
    assert!(raw.contains("passwordHash"));
    assert!(!raw.contains("plain-secret"));
}

// ---------------------------------------------------------------------------
// Save / list / update / delete
// ---------------------------------------------------------------------------

#[test]
fn save_and_list_roundtrip() {
    let (_dir, repo) = logged_in("alice");

    let record = CredentialRecord {
        category: "Work".into(),
        url: "https://github.com".into(),
        notes: "2FA on phone".into(),
        ..CredentialRecord::new("GitHub", "octo", "hunter2")
    };
    let id = repo.save(&record, false).unwrap();

    let listed = repo.list_credentials().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[0].record, record);
    assert!(listed[0].updated_at.is_none());
}

#[test]
fn plaintext_never_reaches_disk() {
    let (dir, repo) = logged_in("alice");
    repo.save(&CredentialRecord::new("GitHub", "octo", "hunter2"), false)
        .unwrap();

    let raw = fs::read_to_string(dir.path().join("users.json")).unwrap();
    assert!(!raw.contains("hunter2"));
    assert!(!raw.contains("GitHub"));
}

#[test]
fn duplicate_is_case_insensitive_on_both_fields() {
    let (_dir, repo) = logged_in("alice");
    let first = repo
        .save(&CredentialRecord::new("Mail", "a@x.com", "one"), false)
        .unwrap();

    let result = repo.save(&CredentialRecord::new("mail", "A@X.COM", "two"), false);
    match result {
        Err(SecretBookError::DuplicateFound(existing)) => {
            assert_eq!(existing.id, first);
            assert_eq!(existing.record.password, "one");
        }
        other => panic!("expected DuplicateFound, got {other:?}"),
    }
    assert_eq!(repo.list_credentials().unwrap().len(), 1);
}

#[test]
fn force_bypasses_duplicate_check() {
    let (_dir, repo) = logged_in("alice");
    repo.save(&CredentialRecord::new("Mail", "a@x.com", "one"), false)
        .unwrap();
    repo.save(&CredentialRecord::new("mail", "A@X.COM", "two"), true)
        .unwrap();

    assert_eq!(repo.list_credentials().unwrap().len(), 2);
}

#[test]
fn matching_only_one_field_is_not_a_duplicate() {
    let (_dir, repo) = logged_in("alice");
    repo.save(&CredentialRecord::new("Mail", "a@x.com", "one"), false)
        .unwrap();
    repo.save(&CredentialRecord::new("Mail", "b@x.com", "two"), false)
        .unwrap();
    repo.save(&CredentialRecord::new("Chat", "a@x.com", "three"), false)
        .unwrap();

    assert_eq!(repo.list_credentials().unwrap().len(), 3);
}

#[test]
fn find_duplicate_can_exclude_an_id() {
    let (_dir, repo) = logged_in("alice");
    let id = repo
        .save(&CredentialRecord::new("Mail", "a@x.com", "one"), false)
        .unwrap();

    assert!(repo.find_duplicate("MAIL", "a@x.com", None).unwrap().is_some());
    assert!(repo.find_duplicate("MAIL", "a@x.com", Some(id)).unwrap().is_none());
}

#[test]
fn update_replaces_contents_and_keeps_identity() {
    let (_dir, repo) = logged_in("alice");
    let id = repo
        .save(&CredentialRecord::new("GitHub", "octo", "old"), false)
        .unwrap();
    let created = repo.get(id).unwrap().unwrap().created_at;

    // Same identity as itself is fine without force.
    repo.update(id, &CredentialRecord::new("github", "octo", "new"), false)
        .unwrap();

    let entry = repo.get(id).unwrap().unwrap();
    assert_eq!(entry.record.password, "new");
    assert_eq!(entry.record.website, "github");
    assert_eq!(entry.created_at, created);
    assert!(entry.updated_at.is_some());
}

#[test]
fn update_into_another_identity_needs_force() {
    let (_dir, repo) = logged_in("alice");
    let a = repo
        .save(&CredentialRecord::new("Mail", "a@x.com", "one"), false)
        .unwrap();
    let b = repo
        .save(&CredentialRecord::new("Chat", "b@x.com", "two"), false)
        .unwrap();

    let clash = CredentialRecord::new("MAIL", "A@x.com", "two");
    match repo.update(b, &clash, false) {
        Err(SecretBookError::DuplicateFound(existing)) => assert_eq!(existing.id, a),
        other => panic!("expected DuplicateFound, got {other:?}"),
    }

    repo.update(b, &clash, true).unwrap();
    assert_eq!(repo.get(b).unwrap().unwrap().record, clash);
}

#[test]
fn update_of_unknown_id_is_a_silent_noop() {
    let (_dir, repo) = logged_in("alice");
    repo.save(&CredentialRecord::new("GitHub", "octo", "pw"), false)
        .unwrap();

    repo.update(999, &CredentialRecord::new("x", "y", "z"), false)
        .unwrap();

    let listed = repo.list_credentials().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].record.website, "GitHub");
}

#[test]
fn delete_removes_only_the_target() {
    let (_dir, repo) = logged_in("alice");
    let a = repo
        .save(&CredentialRecord::new("A", "u", "1"), false)
        .unwrap();
    let b = repo
        .save(&CredentialRecord::new("B", "u", "2"), false)
        .unwrap();

    repo.delete(a).unwrap();
    let listed = repo.list_credentials().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, b);

    // Deleting again is not an error.
    repo.delete(a).unwrap();
}

// ---------------------------------------------------------------------------
// Id assignment
// ---------------------------------------------------------------------------

#[test]
fn ids_are_never_reused_after_delete() {
    let (_dir, repo) = logged_in("alice");
    let first = repo
        .save(&CredentialRecord::new("A", "u", "1"), false)
        .unwrap();
    let second = repo
        .save(&CredentialRecord::new("B", "u", "2"), false)
        .unwrap();

    // A plain "live count + 1" scheme would hand out `second` again here.
    repo.delete(first).unwrap();
    let third = repo
        .save(&CredentialRecord::new("C", "u", "3"), false)
        .unwrap();
    assert!(third > second);

    // Deleting the highest id must not make it available again either.
    repo.delete(third).unwrap();
    let fourth = repo
        .save(&CredentialRecord::new("D", "u", "4"), false)
        .unwrap();
    assert!(fourth > third);

    let ids: Vec<u64> = repo.list_credentials().unwrap().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![second, fourth]);
}

// ---------------------------------------------------------------------------
// Corruption and key properties
// ---------------------------------------------------------------------------

#[test]
fn corrupted_token_is_skipped_without_hiding_others() {
    let (_dir, repo) = logged_in("alice");
    let keep_a = repo
        .save(&CredentialRecord::new("A", "u", "1"), false)
        .unwrap();
    let broken = repo
        .save(&CredentialRecord::new("B", "u", "2"), false)
        .unwrap();
    let keep_c = repo
        .save(&CredentialRecord::new("C", "u", "3"), false)
        .unwrap();

    let mut accounts = repo.store().load().unwrap();
    let account = accounts.get_mut("alice").unwrap();
    account
        .credentials
        .iter_mut()
        .find(|c| c.id == broken)
        .unwrap()
        .ciphertext = "corrupted-token".into();
    repo.store().save(&accounts).unwrap();

    let ids: Vec<u64> = repo.list_credentials().unwrap().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![keep_a, keep_c]);
}

#[test]
fn corrupt_document_surfaces_as_storage_error() {
    let (dir, repo) = repository();
    fs::write(dir.path().join("users.json"), "[[[").unwrap();

    assert!(matches!(
        repo.register("alice", "secret"),
        Err(SecretBookError::StorageCorrupt { .. })
    ));
}

#[test]
fn changing_login_secret_does_not_rekey_data() {
    let (dir, mut repo) = logged_in("alice");
    repo.save(&CredentialRecord::new("GitHub", "octo", "pw"), false)
        .unwrap();
    repo.logout();

    // Rewrite the stored login hash as a secret change would.
    let mut accounts = repo.store().load().unwrap();
    accounts.get_mut("alice").unwrap().password_hash =
        secretbook::crypto::hash_secret("brand-new-secret");
    repo.store().save(&accounts).unwrap();

    let mut fresh = CredentialRepository::new(AccountStore::new(dir.path().join("users.json")));
    fresh.login("alice", "brand-new-secret").unwrap();
    let listed = fresh.list_credentials().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].record.password, "pw");
}

#[test]
fn accounts_do_not_see_each_other() {
    let (dir, mut repo) = logged_in("alice");
    repo.save(&CredentialRecord::new("GitHub", "octo", "pw"), false)
        .unwrap();

    repo.register("bob", "bob-secret").unwrap();
    repo.login("bob", "bob-secret").unwrap();
    assert!(repo.list_credentials().unwrap().is_empty());

    // Same store, back to alice.
    let mut again = CredentialRepository::new(AccountStore::new(dir.path().join("users.json")));
    again.login("alice", "login-secret").unwrap();
    assert_eq!(again.list_credentials().unwrap().len(), 1);
}

#[test]
fn foreign_records_are_skipped() {
    // Move bob's token into alice's account: alice's key cannot open it.
    let (_dir, mut repo) = logged_in("alice");
    repo.save(&CredentialRecord::new("Mine", "a", "1"), false)
        .unwrap();

    repo.register("bob", "bob-secret").unwrap();
    repo.login("bob", "bob-secret").unwrap();
    repo.save(&CredentialRecord::new("Theirs", "b", "2"), false)
        .unwrap();

    let mut accounts = repo.store().load().unwrap();
    let mut foreign = accounts["bob"].credentials[0].clone();
    let alice = accounts.get_mut("alice").unwrap();
    foreign.id = alice.allocate_id().unwrap();
    alice.credentials.push(foreign);
    repo.store().save(&accounts).unwrap();

    repo.login("alice", "login-secret").unwrap();
    let listed = repo.list_credentials().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].record.website, "Mine");
}

#[test]
fn document_with_offsetless_timestamps_still_logs_in() {
    let (dir, mut repo) = repository();
    let document = serde_json::json!({
        "alice": {
            "passwordHash": secretbook::crypto::hash_secret("secret1"),
            "createdAt": "2024-05-01T10:00:00.123456",
            "passwords": []
        }
    });
    fs::write(dir.path().join("users.json"), document.to_string()).unwrap();

    repo.login("alice", "secret1").unwrap();
    let id = repo
        .save(&CredentialRecord::new("GitHub", "octo", "pw"), false)
        .unwrap();
    assert_eq!(id, 1);

    // The rewritten document carries an explicit offset.
    let accounts = repo.store().load().unwrap();
    assert_eq!(
        accounts["alice"].created_at.to_rfc3339(),
        "2024-05-01T10:00:00.123456+00:00"
    );
}
