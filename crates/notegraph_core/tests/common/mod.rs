#![allow(dead_code)]

use chrono::Duration;
use notegraph_core::dates::{format_utc_date_time, parse_utc_date_time};
use notegraph_core::{Branch, Note, NoteCache};

pub const T0: &str = "2021-05-01 12:00:00.000Z";

/// Timestamp `offset_secs` away from `T0`.
pub fn at(offset_secs: i64) -> String {
    let base = parse_utc_date_time(T0).unwrap();
    format_utc_date_time(base + Duration::seconds(offset_secs))
}

pub fn note(id: &str, title: &str) -> Note {
    Note::new(id, title, T0)
}

/// Builds a cache from notes and `(branch_id, child, parent)` triples.
pub fn build(notes: Vec<Note>, branches: &[(&str, &str, &str)]) -> NoteCache {
    let mut cache = NoteCache::new();
    for note in notes {
        cache.insert_note(note);
    }
    for (branch_id, child, parent) in branches {
        cache
            .insert_branch(Branch::new(*branch_id, *child, *parent))
            .unwrap();
    }
    cache
}

/// root
/// ├─ work
/// │  ├─ projects   (prefix "2021" under work)
/// │  │  └─ alpha
/// │  └─ secret     (protected)
/// ├─ archive       (inheritable archived label)
/// │  ├─ old
/// │  └─ alpha      (second parent)
/// └─ inbox         (archived itself)
pub fn sample_cache() -> NoteCache {
    let mut secret = note("secret", "Payroll");
    secret.is_protected = true;
    let mut archive = note("archive", "Archive");
    archive.has_inheritable_owned_archived_label = true;
    let mut inbox = note("inbox", "Inbox");
    inbox.is_archived = true;

    let mut cache = build(
        vec![
            note("root", "root"),
            note("work", "Work"),
            note("projects", "Projects"),
            note("alpha", "Alpha"),
            secret,
            archive,
            note("old", "Old"),
            inbox,
        ],
        &[
            ("b-work", "work", "root"),
            ("b-alpha", "alpha", "projects"),
            ("b-secret", "secret", "work"),
            ("b-archive", "archive", "root"),
            ("b-old", "old", "archive"),
            ("b-archive-alpha", "alpha", "archive"),
            ("b-inbox", "inbox", "root"),
        ],
    );

    let mut projects = Branch::new("b-projects", "projects", "work");
    projects.prefix = Some("2021".to_string());
    cache.insert_branch(projects).unwrap();

    cache
}
