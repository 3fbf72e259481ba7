mod common;

use common::{build, note, sample_cache};
use notegraph_core::{
    find_some_path, Branch, HoistContext, PathResolver, StaticSession, MISSING_NOTE_TITLE,
    PROTECTED_NOTE_TITLE,
};

fn ids(path: &[&str]) -> Vec<String> {
    path.iter().map(|id| id.to_string()).collect()
}

#[test]
fn some_path_prefers_first_parent_that_reaches_root() {
    let cache = sample_cache();
    let hoist = HoistContext::root();

    let path = find_some_path(&cache, &hoist, "alpha").unwrap();
    assert_eq!(path, ids(&["root", "work", "projects", "alpha"]));
}

#[test]
fn some_path_falls_back_to_parent_under_hoist() {
    let cache = sample_cache();
    let hoist = HoistContext::new("archive");

    let path = find_some_path(&cache, &hoist, "alpha").unwrap();
    assert_eq!(path, ids(&["root", "archive", "alpha"]));
}

#[test]
fn note_outside_hoist_is_not_available() {
    let cache = sample_cache();
    let hoist = HoistContext::new("work");
    let resolver = PathResolver::new(&cache, &hoist, &StaticSession::LOCKED);

    assert!(resolver.some_path("old").is_none());
    assert!(resolver.note_path("old").is_none());
    assert!(!resolver.is_available("old"));
    assert!(resolver.is_available("alpha"));
}

#[test]
fn unknown_note_is_not_available() {
    let cache = sample_cache();
    let hoist = HoistContext::root();
    let resolver = PathResolver::new(&cache, &hoist, &StaticSession::LOCKED);

    assert!(resolver.note_path("ghost").is_none());
    assert!(!resolver.is_available("ghost"));
}

#[test]
fn note_path_record_describes_resolved_path() {
    let cache = sample_cache();
    let hoist = HoistContext::root();
    let resolver = PathResolver::new(&cache, &hoist, &StaticSession::LOCKED);

    let record = resolver.note_path("alpha").unwrap();
    assert_eq!(record.note_id, "alpha");
    assert_eq!(record.branch_id.as_deref(), Some("b-alpha"));
    assert_eq!(record.note_path, ids(&["root", "work", "projects", "alpha"]));
    assert_eq!(record.path, "root/work/projects/alpha");
    assert_eq!(record.title, "Work / 2021 - Projects / Alpha");
}

#[test]
fn branch_id_follows_resolved_parent_not_first_parent() {
    let cache = sample_cache();
    let hoist = HoistContext::new("archive");
    let resolver = PathResolver::new(&cache, &hoist, &StaticSession::LOCKED);

    let record = resolver.note_path("alpha").unwrap();
    assert_eq!(record.branch_id.as_deref(), Some("b-archive-alpha"));
    assert_eq!(record.title, "Alpha");
}

#[test]
fn titles_start_after_hoisted_note() {
    let cache = sample_cache();
    let hoist = HoistContext::new("work");
    let resolver = PathResolver::new(&cache, &hoist, &StaticSession::LOCKED);

    let path = resolver.some_path("alpha").unwrap();
    assert_eq!(
        resolver.note_title_array_for_path(&path),
        vec!["2021 - Projects".to_string(), "Alpha".to_string()]
    );
}

#[test]
fn hoisted_note_alone_renders_its_own_title() {
    let cache = sample_cache();
    let hoist = HoistContext::new("work");
    let resolver = PathResolver::new(&cache, &hoist, &StaticSession::LOCKED);

    assert_eq!(resolver.note_title_for_path(&ids(&["work"])), "Work");

    let root_hoist = HoistContext::root();
    let resolver = PathResolver::new(&cache, &root_hoist, &StaticSession::LOCKED);
    let record = resolver.note_path("root").unwrap();
    assert_eq!(record.note_path, ids(&["root"]));
    assert_eq!(record.branch_id, None);
    assert_eq!(record.title, "root");
}

#[test]
fn protected_title_is_redacted_without_session() {
    let cache = sample_cache();
    let hoist = HoistContext::root();

    let locked = PathResolver::new(&cache, &hoist, &StaticSession::LOCKED);
    assert_eq!(locked.note_title("secret", Some("work")), PROTECTED_NOTE_TITLE);

    let unlocked = PathResolver::new(&cache, &hoist, &StaticSession::UNLOCKED);
    assert_eq!(unlocked.note_title("secret", Some("work")), "Payroll");

    let session = || true;
    let resolver = PathResolver::new(&cache, &hoist, &session);
    assert_eq!(resolver.note_path("secret").unwrap().title, "Work / Payroll");
}

#[test]
fn missing_segment_renders_placeholder_and_continues() {
    let cache = sample_cache();
    let hoist = HoistContext::root();
    let resolver = PathResolver::new(&cache, &hoist, &StaticSession::LOCKED);

    assert_eq!(resolver.note_title("ghost", None), MISSING_NOTE_TITLE);
    assert_eq!(
        resolver.note_title_for_path(&ids(&["root", "ghost", "work"])),
        format!("{MISSING_NOTE_TITLE} / Work")
    );
}

#[test]
fn refreshing_note_record_keeps_it_resolvable() {
    let mut cache = sample_cache();
    cache.insert_note(note("alpha", "Alpha renamed"));
    let hoist = HoistContext::root();
    let resolver = PathResolver::new(&cache, &hoist, &StaticSession::LOCKED);

    let record = resolver.note_path("alpha").unwrap();
    assert_eq!(record.path, "root/work/projects/alpha");
    assert_eq!(record.title, "Work / 2021 - Projects / Alpha renamed");
    assert!(resolver.is_available("alpha"));
}

#[test]
fn empty_prefix_is_not_rendered() {
    let mut cache = build(vec![note("root", "root"), note("a", "A")], &[]);
    let mut branch = Branch::new("b-a", "a", "root");
    branch.prefix = Some(String::new());
    cache.insert_branch(branch).unwrap();

    let hoist = HoistContext::root();
    let resolver = PathResolver::new(&cache, &hoist, &StaticSession::LOCKED);
    assert_eq!(resolver.note_title("a", Some("root")), "A");
}

#[test]
fn orphan_and_cyclic_notes_resolve_to_nothing() {
    let cache = build(
        vec![
            note("root", "root"),
            note("orphan", "Orphan"),
            note("first", "First"),
            note("second", "Second"),
        ],
        &[("c1", "first", "second"), ("c2", "second", "first")],
    );
    let hoist = HoistContext::root();

    assert!(find_some_path(&cache, &hoist, "orphan").is_none());
    assert!(find_some_path(&cache, &hoist, "first").is_none());
}

#[test]
fn diamond_resolves_through_first_parent() {
    let cache = build(
        vec![
            note("root", "root"),
            note("left", "Left"),
            note("right", "Right"),
            note("leaf", "Leaf"),
        ],
        &[
            ("b1", "left", "root"),
            ("b2", "right", "root"),
            ("b3", "leaf", "right"),
            ("b4", "leaf", "left"),
        ],
    );
    let hoist = HoistContext::root();

    let path = find_some_path(&cache, &hoist, "leaf").unwrap();
    assert_eq!(path, ids(&["root", "right", "leaf"]));

    let hoist = HoistContext::new("left");
    let path = find_some_path(&cache, &hoist, "leaf").unwrap();
    assert_eq!(path, ids(&["root", "left", "leaf"]));
}
