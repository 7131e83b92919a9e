//! Memory log and handoff behavior through the library API.

use crumbs::fs::Store;
use crumbs::handoff::HandoffTracker;
use crumbs::memory::MemoryLog;
use crumbs::models::{Entry, EntryKind};
use crumbs::CrumbsError;
use std::fs;
use std::io::Write;
use tempfile::TempDir;

fn texts(entries: &[Entry]) -> Vec<&str> {
    entries.iter().map(|e| e.text.as_str()).collect()
}

#[test]
fn test_list_is_last_min_n_total() {
    let temp = TempDir::new().unwrap();
    let store = Store::open(temp.path()).unwrap();
    let log = MemoryLog::new(&store);

    for i in 0..7 {
        log.append(EntryKind::What, &format!("entry {i}")).unwrap();
    }

    for n in [1, 3, 7, 20] {
        let listed = log.list(n).unwrap();
        let expected = n.min(7);
        assert_eq!(listed.len(), expected);
        assert_eq!(listed.last().unwrap().text, "entry 6");
        assert!(listed.windows(2).all(|w| w[0].position < w[1].position));
    }
}

#[test]
fn test_mark_then_open_covers_window_plus_new_entries() {
    let temp = TempDir::new().unwrap();
    let store = Store::open(temp.path()).unwrap();
    let log = MemoryLog::new(&store);
    let tracker = HandoffTracker::new(&store);

    for text in ["a", "b", "c", "d", "e"] {
        log.append(EntryKind::What, text).unwrap();
    }
    tracker.mark(2).unwrap();
    log.append(EntryKind::Why, "f").unwrap();
    log.append(EntryKind::Why, "g").unwrap();

    assert_eq!(
        texts(&tracker.open().unwrap().entries),
        vec!["d", "e", "f", "g"]
    );
}

#[test]
fn test_two_stores_in_one_process() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let store_a = Store::open(first.path()).unwrap();
    let store_b = Store::open(second.path()).unwrap();

    MemoryLog::new(&store_a).append(EntryKind::What, "only in a").unwrap();
    HandoffTracker::new(&store_b).mark(3).unwrap();

    assert_eq!(MemoryLog::new(&store_a).len().unwrap(), 1);
    assert!(MemoryLog::new(&store_b).is_empty().unwrap());
    assert!(HandoffTracker::new(&store_a).checkpoint().unwrap().is_none());
}

#[test]
fn test_garbage_row_between_appends() {
    let temp = TempDir::new().unwrap();
    let store = Store::open(temp.path()).unwrap();
    let log = MemoryLog::new(&store);
    let tracker = HandoffTracker::new(&store);

    log.append(EntryKind::What, "before").unwrap();
    {
        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(store.memories_path())
            .unwrap();
        file.write_all(b"this is not a memory row\n").unwrap();
    }
    log.append(EntryKind::What, "after").unwrap();
    tracker.mark(1).unwrap();
    log.append(EntryKind::What, "latest").unwrap();

    assert_eq!(texts(&log.list(10).unwrap()), vec!["before", "after", "latest"]);
    assert_eq!(texts(&tracker.open().unwrap().entries), vec!["after", "latest"]);
}

#[test]
fn test_interrupted_write_does_not_hide_later_rows() {
    let temp = TempDir::new().unwrap();
    let store = Store::open(temp.path()).unwrap();
    let log = MemoryLog::new(&store);

    log.append(EntryKind::What, "complete").unwrap();
    {
        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(store.memories_path())
            .unwrap();
        file.write_all(b"cr-half,what,cut sh").unwrap();
    }
    let next = log.append(EntryKind::Why, "next").unwrap();

    let entries = log.entries().unwrap();
    assert_eq!(texts(&entries), vec!["complete", "next"]);
    assert_eq!(entries[1].position, 1);
    assert_eq!(next.position, 1);
}

#[test]
fn test_interrupted_write_inside_quotes_does_not_swallow_later_rows() {
    let temp = TempDir::new().unwrap();
    let store = Store::open(temp.path()).unwrap();
    let log = MemoryLog::new(&store);
    let tracker = HandoffTracker::new(&store);

    log.append(EntryKind::What, "complete").unwrap();
    {
        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(store.memories_path())
            .unwrap();
        file.write_all(b"cr-half,what,\"use a, b").unwrap();
    }
    let next = log.append(EntryKind::Why, "next").unwrap();
    let later = log.append(EntryKind::Why, "later").unwrap();
    assert_ne!(next.position, later.position);

    let entries = log.entries().unwrap();
    assert_eq!(texts(&entries), vec!["complete", "next", "later"]);

    tracker.mark(1).unwrap();
    log.append(EntryKind::What, "after mark").unwrap();
    assert_eq!(
        texts(&tracker.open().unwrap().entries),
        vec!["later", "after mark"]
    );
}

#[test]
fn test_open_existing_does_not_create() {
    let temp = TempDir::new().unwrap();
    assert!(matches!(
        Store::open_existing(temp.path()),
        Err(CrumbsError::StoreNotFound(_))
    ));
    assert!(fs::read_dir(temp.path()).unwrap().next().is_none());
}
