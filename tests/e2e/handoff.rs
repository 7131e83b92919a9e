//! `cr handoff mark/open` through the binary.

use super::helpers::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_mark_then_open_scenario() {
    let temp = TempDir::new().unwrap();
    record(temp.path(), "what", "A");
    record(temp.path(), "what", "B");
    let c = record(temp.path(), "why", "C");

    let out = cr(temp.path(), &["handoff", "mark", "--window", "1"]);
    assert!(out.status.success(), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.starts_with("handoff: hf-"));
    assert!(text.contains(&format!("to:      {c}")));
    assert!(text.contains("window:  1"));

    record(temp.path(), "what", "D");

    let out = cr(temp.path(), &["handoff", "open"]);
    assert!(out.status.success());
    // newest first on screen
    assert_eq!(texts(&out), vec!["D", "C"]);
    assert!(stdout(&out).contains("slice:   2/2 memories (newest first)"));
}

#[test]
fn test_bare_handoff_opens() {
    let temp = TempDir::new().unwrap();
    record(temp.path(), "what", "A");
    record(temp.path(), "what", "B");
    cr(temp.path(), &["handoff", "mark", "--window", "1"]);

    let bare = cr(temp.path(), &["handoff"]);
    let open = cr(temp.path(), &["handoff", "open"]);
    assert!(bare.status.success());
    assert_eq!(stdout(&bare), stdout(&open));
}

#[test]
fn test_open_limit_adds_more_hint() {
    let temp = TempDir::new().unwrap();
    for text in ["A", "B", "C", "D"] {
        record(temp.path(), "what", text);
    }
    cr(temp.path(), &["handoff", "mark", "--window", "3"]);

    let out = cr(temp.path(), &["handoff", "open", "--limit", "2"]);
    assert_eq!(texts(&out), vec!["D", "C"]);
    let text = stdout(&out);
    assert!(text.contains("slice:   2/3 memories"));
    assert!(text.contains("more:    cr handoff open --limit 3"));
}

#[test]
fn test_open_without_checkpoint_falls_back_to_window() {
    let temp = TempDir::new().unwrap();
    for i in 0..12 {
        record(temp.path(), "what", &format!("m{i}"));
    }

    let out = cr(temp.path(), &["handoff", "open"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("handoff: <none>"));
    let shown = texts(&out);
    assert_eq!(shown.len(), 10);
    assert_eq!(shown[0], "m11");
    assert_eq!(shown[9], "m2");
}

#[test]
fn test_mark_on_empty_store() {
    let temp = TempDir::new().unwrap();

    let out = cr(temp.path(), &["handoff", "mark", "--window", "5"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).contains("from:    <start>"));

    let out = cr(temp.path(), &["handoff", "open"]);
    assert!(out.status.success());
    assert!(rows(&out).is_empty());
    assert!(stdout(&out).contains("slice:   0/0"));
}

#[test]
fn test_zero_window_exits_2() {
    let temp = TempDir::new().unwrap();
    let out = cr(temp.path(), &["handoff", "mark", "--window", "0"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(!temp.path().join(".crumbs/handoff.toml").exists());
}

#[test]
fn test_corrupt_checkpoint_exits_4() {
    let temp = TempDir::new().unwrap();
    record(temp.path(), "what", "A");
    fs::write(temp.path().join(".crumbs/handoff.toml"), "position = [").unwrap();

    let out = cr(temp.path(), &["handoff", "open"]);
    assert_eq!(out.status.code(), Some(4));
    assert!(stderr(&out).contains("corrupt"));
}

#[test]
fn test_bad_config_is_reported() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join(".crumbs")).unwrap();
    fs::write(temp.path().join(".crumbs/config.toml"), "list_limt = 5\n").unwrap();

    let out = cr(temp.path(), &["ls"]);
    assert_eq!(out.status.code(), Some(4));
    assert!(stderr(&out).contains("config.toml"));
}

#[test]
fn test_config_changes_defaults() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join(".crumbs")).unwrap();
    fs::write(
        temp.path().join(".crumbs/config.toml"),
        "list_limit = 2\nhandoff_window = 1\n",
    )
    .unwrap();
    for text in ["A", "B", "C"] {
        record(temp.path(), "what", text);
    }

    assert_eq!(texts(&cr(temp.path(), &["ls"])), vec!["B", "C"]);
    assert_eq!(texts(&cr(temp.path(), &["handoff", "open"])), vec!["C"]);
}
