use std::fs;

use passkeep::{Credential, Error, Store};
use tempfile::tempdir;

fn cred(username: &str, website: &str, password: &str) -> Credential {
    Credential::new(
        username.to_string(),
        website.to_string(),
        password.to_string(),
    )
}

#[test]
fn load_all_on_missing_file_returns_empty() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path().join("passwords.json"));

    assert!(!store.exists());
    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn append_grows_collection_by_one_at_the_end() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path().join("passwords.json"));

    store.append(cred("alice", "example.com", "pw1")).unwrap();
    store.append(cred("bob", "example.org", "pw2")).unwrap();

    let all = store.load_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all.last().unwrap(), &cred("bob", "example.org", "pw2"));
}

#[test]
fn duplicate_entries_are_permitted() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path().join("passwords.json"));

    store.append(cred("alice", "example.com", "pw")).unwrap();
    store.append(cred("alice", "example.com", "pw")).unwrap();

    assert_eq!(store.load_all().unwrap().len(), 2);
}

#[test]
fn replace_at_overwrites_position_in_place() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path().join("passwords.json"));

    store.append(cred("alice", "example.com", "pw1")).unwrap();
    store.append(cred("bob", "example.org", "pw2")).unwrap();

    store.replace_at(0, cred("carol", "example.net", "pw3")).unwrap();

    let all = store.load_all().unwrap();
    assert_eq!(all[0], cred("carol", "example.net", "pw3"));
    assert_eq!(all[1], cred("bob", "example.org", "pw2"));
}

#[test]
fn delete_at_shifts_later_entries_down() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path().join("passwords.json"));

    store.append(cred("a", "one.com", "1")).unwrap();
    store.append(cred("b", "two.com", "2")).unwrap();
    store.append(cred("c", "three.com", "3")).unwrap();

    store.delete_at(1).unwrap();

    let all = store.load_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0], cred("a", "one.com", "1"));
    assert_eq!(all[1], cred("c", "three.com", "3"));
}

#[test]
fn out_of_range_index_fails_and_leaves_file_untouched() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("passwords.json");
    let store = Store::open(&path);

    store.append(cred("alice", "example.com", "pw")).unwrap();
    let before = fs::read(&path).unwrap();

    let err = store.replace_at(5, cred("x", "y", "z")).unwrap_err();
    assert!(matches!(err, Error::IndexOutOfRange { index: 5, len: 1 }));

    let err = store.delete_at(1).unwrap_err();
    assert!(matches!(err, Error::IndexOutOfRange { index: 1, len: 1 }));

    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn delete_on_empty_store_is_out_of_range() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path().join("passwords.json"));

    let err = store.delete_at(0).unwrap_err();
    assert!(matches!(err, Error::IndexOutOfRange { index: 0, len: 0 }));
}

#[test]
fn replace_all_discards_previous_contents() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path().join("passwords.json"));

    store.append(cred("old", "old.com", "old")).unwrap();

    let imported = vec![
        cred("new1", "one.com", "pw1"),
        cred("new2", "two.com", "pw2"),
    ];
    store.replace_all(&imported).unwrap();

    assert_eq!(store.load_all().unwrap(), imported);
}

#[test]
fn dump_all_writes_the_same_shape_to_the_destination() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path().join("passwords.json"));
    let export_path = dir.path().join("export.json");

    store.append(cred("alice", "example.com", "pw")).unwrap();
    let dumped = store.dump_all(&export_path).unwrap();

    let reread: Vec<Credential> =
        serde_json::from_slice(&fs::read(&export_path).unwrap()).unwrap();
    assert_eq!(reread, dumped);
    assert_eq!(reread, store.load_all().unwrap());
}

#[test]
fn corrupt_backing_file_is_reported_not_swallowed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("passwords.json");
    fs::write(&path, b"not json at all").unwrap();

    let store = Store::open(&path);
    assert!(matches!(store.load_all().unwrap_err(), Error::Corrupt { .. }));
}

#[test]
fn extra_record_fields_are_ignored_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("passwords.json");
    fs::write(
        &path,
        br#"[{"username": "alice", "website": "example.com", "password": "pw", "note": "spare"}]"#,
    )
    .unwrap();

    let store = Store::open(&path);
    assert_eq!(
        store.load_all().unwrap(),
        vec![cred("alice", "example.com", "pw")]
    );
}

#[test]
fn missing_record_fields_are_corrupt() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("passwords.json");
    fs::write(&path, br#"[{"username": "alice", "website": "example.com"}]"#).unwrap();

    let store = Store::open(&path);
    assert!(matches!(store.load_all().unwrap_err(), Error::Corrupt { .. }));
}

#[test]
fn wrong_shape_is_corrupt_too() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("passwords.json");
    // Valid JSON, but an object instead of an array of records.
    fs::write(&path, br#"{"username": "alice"}"#).unwrap();

    let store = Store::open(&path);
    assert!(matches!(store.load_all().unwrap_err(), Error::Corrupt { .. }));
}

#[test]
fn persisted_format_is_a_plain_json_array_of_objects() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("passwords.json");
    let store = Store::open(&path);

    store.append(cred("alice", "example.com", "pw")).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "username": "alice",
            "website": "example.com",
            "password": "pw"
        }])
    );
}

#[test]
fn search_returns_matches_with_their_indices() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path().join("passwords.json"));

    store.append(cred("alice", "example.com", "pw1")).unwrap();
    store.append(cred("bob", "other.org", "pw2")).unwrap();
    store.append(cred("carol", "Example.net", "pw3")).unwrap();

    let matches = store.search("example").unwrap();
    let indices: Vec<usize> = matches.iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, vec![0, 2]);

    assert!(store.search("nothing-here").unwrap().is_empty());
}
