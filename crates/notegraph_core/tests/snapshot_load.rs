use notegraph_core::{
    cache_from_json, load_snapshot, CacheError, HoistContext, PathResolver, SnapshotError,
    StaticSession,
};
use std::io::Write;

const SNAPSHOT: &str = r#"{
    "notes": [
        { "note_id": "root", "title": "root", "utc_date_created": "2021-01-01 00:00:00.000Z" },
        { "note_id": "journal", "title": "Journal", "utc_date_created": "2021-01-01 00:00:00.000Z" },
        { "note_id": "ideas", "title": "Ideas", "utc_date_created": "2021-01-01 00:00:00.000Z" },
        {
            "note_id": "day",
            "title": "Monday",
            "is_protected": true,
            "flat_text": "monday standup",
            "utc_date_created": "2021-01-04 09:00:00.000Z"
        }
    ],
    "branches": [
        { "branch_id": "b1", "note_id": "journal", "parent_note_id": "root" },
        { "branch_id": "b2", "note_id": "ideas", "parent_note_id": "root", "prefix": "x" },
        { "branch_id": "b3", "note_id": "day", "parent_note_id": "ideas" },
        { "branch_id": "b4", "note_id": "day", "parent_note_id": "journal" }
    ]
}"#;

#[test]
fn snapshot_branch_order_defines_parent_order() {
    let cache = cache_from_json(SNAPSHOT).unwrap();

    let day = cache.note("day").unwrap();
    assert_eq!(day.parents, vec!["ideas".to_string(), "journal".to_string()]);
    assert!(day.is_protected);
    assert!(!day.is_archived);
    assert_eq!(day.flat_text, "monday standup");
}

#[test]
fn snapshot_file_loads_into_resolvable_cache() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SNAPSHOT.as_bytes()).unwrap();

    let cache = load_snapshot(file.path()).unwrap();
    let hoist = HoistContext::root();
    let resolver = PathResolver::new(&cache, &hoist, &StaticSession::UNLOCKED);

    let record = resolver.note_path("day").unwrap();
    assert_eq!(record.path, "root/ideas/day");
    assert_eq!(record.title, "x - Ideas / Monday");
    assert_eq!(record.branch_id.as_deref(), Some("b3"));
}

#[test]
fn snapshot_parents_field_does_not_bypass_branches() {
    let text = r#"{
        "notes": [
            { "note_id": "root", "title": "root", "utc_date_created": "" },
            { "note_id": "a", "title": "A", "utc_date_created": "", "parents": ["root", "ghost"] }
        ],
        "branches": []
    }"#;

    let cache = cache_from_json(text).unwrap();
    assert!(cache.note("a").unwrap().parents.is_empty());

    let hoist = HoistContext::root();
    let resolver = PathResolver::new(&cache, &hoist, &StaticSession::LOCKED);
    assert!(!resolver.is_available("a"));
}

#[test]
fn malformed_snapshot_is_rejected() {
    let err = cache_from_json("{ \"notes\": 5 }").unwrap_err();
    assert!(matches!(err, SnapshotError::Decode(_)));
}

#[test]
fn dangling_branch_is_rejected() {
    let text = r#"{
        "notes": [{ "note_id": "root", "title": "root", "utc_date_created": "" }],
        "branches": [{ "branch_id": "b1", "note_id": "ghost", "parent_note_id": "root" }]
    }"#;

    let err = cache_from_json(text).unwrap_err();
    assert!(matches!(
        err,
        SnapshotError::Cache(CacheError::ChildNotFound(ref id)) if id == "ghost"
    ));
}

#[test]
fn missing_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_snapshot(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SnapshotError::Io(_)));
}
