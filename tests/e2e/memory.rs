//! `cr what/why/ls/show/find` through the binary.

use super::helpers::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_what_creates_store_and_prints_id() {
    let temp = TempDir::new().unwrap();
    let id = record(temp.path(), "what", "auth uses JWT");

    assert!(id.starts_with("cr-"));
    let csv = fs::read_to_string(temp.path().join(".crumbs/memories.csv")).unwrap();
    assert!(csv.starts_with("id,kind,text,ts_utc,cwd,git_branch,git_head\n"));
    assert!(csv.contains(&id));
}

#[test]
fn test_ls_shows_last_n_oldest_first() {
    let temp = TempDir::new().unwrap();
    record(temp.path(), "what", "A");
    record(temp.path(), "what", "B");
    record(temp.path(), "why", "C");

    let out = cr(temp.path(), &["ls", "2"]);
    assert!(out.status.success());
    assert_eq!(texts(&out), vec!["B", "C"]);

    let row = &rows(&out)[1];
    assert_eq!(row.len(), 5);
    assert_eq!(row[1], "why");
    assert!(row[2].ends_with('Z'));
    assert_eq!(row[3], ".");
}

#[test]
fn test_text_from_stdin() {
    let temp = TempDir::new().unwrap();
    let out = cr_with_stdin(temp.path(), &["why"], Some("piped rationale\n"));
    assert!(out.status.success(), "{}", stderr(&out));

    let out = cr(temp.path(), &["ls"]);
    assert_eq!(texts(&out), vec!["piped rationale"]);
}

#[test]
fn test_invalid_text_exits_2() {
    let temp = TempDir::new().unwrap();

    let out = cr(temp.path(), &["what", "   "]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("text is empty"));

    let long = "x".repeat(101);
    let out = cr(temp.path(), &["what", &long]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("too long (101 > 100)"));

    let out = cr(temp.path(), &["ls"]);
    assert!(rows(&out).is_empty());
}

#[test]
fn test_zero_count_exits_2() {
    let temp = TempDir::new().unwrap();
    assert_eq!(cr(temp.path(), &["ls", "0"]).status.code(), Some(2));
    assert_eq!(
        cr(temp.path(), &["find", "x", "--limit", "0"]).status.code(),
        Some(2)
    );
}

#[test]
fn test_show_by_prefix_and_missing_id() {
    let temp = TempDir::new().unwrap();
    let id = record(temp.path(), "what", "findable");
    let suffix = id.trim_start_matches("cr-");

    let out = cr(temp.path(), &["show", suffix]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains(&format!("id:   {id}")));
    assert!(text.contains("kind: what"));
    assert!(text.contains("text: findable"));

    let out = cr(temp.path(), &["show", "zzzzzzzzz"]);
    assert_eq!(out.status.code(), Some(5));
}

#[test]
fn test_find_is_case_insensitive() {
    let temp = TempDir::new().unwrap();
    record(temp.path(), "what", "Redis for sessions");
    record(temp.path(), "what", "postgres for data");
    record(temp.path(), "why", "REDIS is already deployed");

    let out = cr(temp.path(), &["find", "redis"]);
    assert!(out.status.success());
    assert_eq!(
        texts(&out),
        vec!["Redis for sessions", "REDIS is already deployed"]
    );

    let out = cr(temp.path(), &["find", "redis", "--limit", "1"]);
    assert_eq!(texts(&out), vec!["REDIS is already deployed"]);
}

#[test]
fn test_commas_and_quotes_round_trip() {
    let temp = TempDir::new().unwrap();
    let text = r#"say "no", then "yes""#;
    record(temp.path(), "what", text);

    let out = cr(temp.path(), &["ls", "1"]);
    assert_eq!(texts(&out), vec![text.to_string()]);
}

#[test]
fn test_store_found_from_subdirectory() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join(".git")).unwrap();
    let nested = temp.path().join("crates").join("core");
    fs::create_dir_all(&nested).unwrap();

    let out = cr_discover(&nested, &["what", "from deep inside"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(temp.path().join(".crumbs/memories.csv").exists());
    assert!(!nested.join(".crumbs").exists());

    let out = cr_discover(temp.path(), &["ls"]);
    let row = &rows(&out)[0];
    assert_eq!(row[3], format!("crates{}core", std::path::MAIN_SEPARATOR));
}

#[test]
fn test_no_command_prints_onboarding() {
    let temp = TempDir::new().unwrap();

    let out = cr(temp.path(), &[]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("cr what"));
    assert!(!temp.path().join(".crumbs").exists());

    record(temp.path(), "what", "now there is a store");
    let out = cr(temp.path(), &[]);
    assert!(stdout(&out).contains("Detected .crumbs at:"));
}

#[test]
fn test_long_help_shows_onboarding() {
    let temp = TempDir::new().unwrap();

    let out = cr(temp.path(), &["--help"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("Onboarding:"));
    assert!(stdout(&out).contains("cr handoff mark --window"));
    assert!(!temp.path().join(".crumbs").exists());

    record(temp.path(), "what", "now there is a store");
    let out = cr(temp.path(), &["--help"]);
    assert!(stdout(&out).contains("Run: cr handoff open"));

    let out = cr(temp.path(), &["-h"]);
    assert!(!stdout(&out).contains("Onboarding:"));
}

#[test]
fn test_completions() {
    let temp = TempDir::new().unwrap();

    let out = cr(temp.path(), &["completions", "bash"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("handoff"));

    let out = cr(temp.path(), &["completions", "powershell"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Unsupported shell"));
}
