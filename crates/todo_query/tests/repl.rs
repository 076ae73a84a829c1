//! Driving the todo_query prompt through stdin.
use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src/lib")).unwrap();
    fs::write(
        dir.path().join("src/main.js"),
        "\
// TODO {Alice}; 2024-06-01; make it faster!
function main() {
    return 1; // TODO bob; 2023-12-31; rename main
}
",
    )
    .unwrap();
    fs::write(
        dir.path().join("src/lib/util.js"),
        "// TODO alice; 2018-03-04; cleanup!!!\n// TODO drift\n",
    )
    .unwrap();
    fs::write(dir.path().join("notes.md"), "// TODO not a js file\n").unwrap();
    dir
}

fn todo_query(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("todo_query").unwrap();
    cmd.arg("--root").arg(dir.path());
    cmd
}

#[test]
fn greets_and_exits_cleanly() {
    let dir = project();
    todo_query(&dir)
        .write_stdin("exit\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Please, write your command!"));
}

#[test]
fn end_of_input_exits_cleanly() {
    let dir = project();
    todo_query(&dir).write_stdin("").assert().success();
}

#[test]
fn show_prints_a_table() {
    let dir = project();
    todo_query(&dir)
        .write_stdin("show\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("List of TODO comments:"))
        .stdout(predicate::str::contains("!   |  Alice        |  2024-06-01"))
        .stdout(predicate::str::contains("rename main"))
        .stdout(predicate::str::contains("not a js file").not());
}

#[test]
fn user_filter_ignores_case() {
    let dir = project();
    todo_query(&dir)
        .write_stdin("user ALICE\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "List of TODO comments by user \"alice\":",
        ))
        .stdout(predicate::str::contains("make it faster!"))
        .stdout(predicate::str::contains("cleanup!!!"))
        .stdout(predicate::str::contains("rename main").not());
}

#[test]
fn bad_commands_keep_the_loop_alive() {
    let dir = project();
    todo_query(&dir)
        .write_stdin("dance\nuser\nsort sideways\ndate\ndate later\nimportant\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("wrong command"))
        .stdout(predicate::str::contains("Usage: user {username}"))
        .stdout(predicate::str::contains(
            "Usage: sort {importance | user | date}",
        ))
        .stdout(predicate::str::contains("Usage: date {yyyy[-mm[-dd]]}"))
        .stdout(predicate::str::contains(
            "Invalid date format. Use yyyy, yyyy-mm, or yyyy-mm-dd.",
        ))
        .stdout(predicate::str::contains("List of important TODO comments:"));
}

#[test]
fn undecodable_input_keeps_the_loop_alive() {
    let dir = project();
    todo_query(&dir)
        .write_stdin(&b"\xff\xfe\nshow\nexit\n"[..])
        .assert()
        .success()
        .stdout(predicate::str::contains("wrong command"))
        .stdout(predicate::str::contains("List of TODO comments:"));
}

#[test]
fn date_filter() {
    let dir = project();
    todo_query(&dir)
        .write_stdin("date 2024\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("TODO comments created after 2024:"))
        .stdout(predicate::str::contains("make it faster!"))
        .stdout(predicate::str::contains("rename main").not());
}

#[test]
fn plain_format_prints_paths() {
    let dir = project();
    todo_query(&dir)
        .args(["--format", "plain"])
        .write_stdin("sort user\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("TODO comments sorted by user:"))
        .stdout(predicate::str::contains(
            "util.js: // TODO alice; 2018-03-04; cleanup!!!",
        ));
}

#[test]
fn get_todos_prints_json() {
    let dir = project();
    todo_query(&dir)
        .write_stdin("get-todos\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"comment\": \"// TODO drift\""));
}

#[test]
fn empty_project_reports_not_found() {
    let dir = TempDir::new().unwrap();
    todo_query(&dir)
        .write_stdin("show\nsort date\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "List of TODO comments:\nNo TODO comments found.",
        ));
}

#[test]
fn excluded_directories_are_skipped() {
    let dir = project();
    todo_query(&dir)
        .args(["--exclude", "lib"])
        .write_stdin("show\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("cleanup").not());
}

#[test]
fn missing_root_fails() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("todo_query")
        .unwrap()
        .arg("--root")
        .arg(dir.path().join("missing"))
        .write_stdin("exit\n")
        .assert()
        .failure();
}
