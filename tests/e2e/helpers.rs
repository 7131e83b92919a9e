//! Helpers for driving the compiled `cr` binary.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Run `cr` in `dir` with the store pinned to `dir/.crumbs`.
pub fn cr(dir: &Path, args: &[&str]) -> Output {
    cr_with_stdin(dir, args, None)
}

pub fn cr_with_stdin(dir: &Path, args: &[&str], stdin: Option<&str>) -> Output {
    let mut cmd = base_command(dir);
    cmd.env("CRUMBS_DIR", dir.join(".crumbs"));
    run(cmd, args, stdin)
}

/// Run `cr` in `dir` letting it discover the store on its own.
pub fn cr_discover(dir: &Path, args: &[&str]) -> Output {
    run(base_command(dir), args, None)
}

fn base_command(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cr"));
    cmd.current_dir(dir)
        .env_remove("CRUMBS_DIR")
        .env_remove("CRUMBS_LOG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn run(mut cmd: Command, args: &[&str], stdin: Option<&str>) -> Output {
    cmd.args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().expect("Failed to spawn cr");
    {
        let mut pipe = child.stdin.take().expect("stdin is piped");
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes()).expect("Failed to write stdin");
        }
    }
    child.wait_with_output().expect("Failed to wait for cr")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Data rows (`cr-…\t…`) from command output.
pub fn rows(output: &Output) -> Vec<Vec<String>> {
    stdout(output)
        .lines()
        .filter(|l| l.starts_with("cr-"))
        .map(|l| l.split('\t').map(str::to_string).collect())
        .collect()
}

/// The text column of every data row.
pub fn texts(output: &Output) -> Vec<String> {
    rows(output).into_iter().map(|r| r[4].clone()).collect()
}

/// Record a memory and return its id.
pub fn record(dir: &Path, kind: &str, text: &str) -> String {
    let out = cr(dir, &[kind, text]);
    assert!(out.status.success(), "cr {kind} failed: {}", stderr(&out));
    stdout(&out).trim().to_string()
}
