use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use indoc::indoc;
use predicates::prelude::*;

fn main_binary() -> Command {
    Command::cargo_bin("countset").unwrap()
}

fn path_with(temp: &TempDir, name: &str, contents: &str) -> String {
    let f = temp.child(name);
    f.write_str(contents).unwrap();
    f.path().to_str().unwrap().to_string()
}

const A: &str = indoc! {"
    3\tcat
    2\tdog
"};
const B: &str = indoc! {"
    1\tcat
    5\tbird
"};

#[test]
fn requires_subcommand() {
    main_binary().assert().failure();
}

#[test]
fn union_and_intersect_allow_empty_arg_lists() {
    main_binary().arg("union").assert().success().stdout("");
    main_binary().arg("intersect").assert().success().stdout("");
}

#[test]
fn diff_requires_exclusions() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.tsv", A);
    main_binary().args(["diff", a.as_str()]).assert().failure();
}

#[test]
fn union_sums_counts_and_sorts_by_count() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.tsv", A);
    let b = path_with(&temp, "b.tsv", B);
    main_binary()
        .args(["union", a.as_str(), b.as_str()])
        .assert()
        .success()
        .stdout("5\tbird\n4\tcat\n2\tdog\n");
}

#[test]
fn intersect_keeps_shared_values() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.tsv", A);
    let b = path_with(&temp, "b.tsv", B);
    main_binary().args(["intersect", a.as_str(), b.as_str()]).assert().success().stdout("4\tcat\n");
}

#[test]
fn diff_removes_excluded_values() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.tsv", A);
    let b = path_with(&temp, "b.tsv", B);
    main_binary()
        .args(["diff", a.as_str(), "--exclude", b.as_str()])
        .assert()
        .success()
        .stdout("2\tdog\n");
    main_binary()
        .args(["diff", b.as_str(), "-x", a.as_str()])
        .assert()
        .success()
        .stdout("5\tbird\n");
}

#[test]
fn missing_report_is_empty_not_fatal() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.tsv", A);
    let missing = temp.child("missing.tsv");
    let missing = missing.path().to_str().unwrap();

    main_binary()
        .env_remove("RUST_LOG")
        .args(["union", a.as_str(), missing])
        .assert()
        .success()
        .stdout("3\tcat\n2\tdog\n")
        .stderr(predicate::str::contains("report unavailable"));

    main_binary().args(["intersect", a.as_str(), missing]).assert().success().stdout("");
}

#[test]
fn headers_and_annotations_are_dropped() {
    let temp = TempDir::new().unwrap();
    let report = indoc! {"
        count and value
        2\tcat\tfelis catus
        oops\tcat
        1\tdog\tcanis familiaris

        1\tcat
    "};
    let a = path_with(&temp, "a.tsv", report);
    main_binary().args(["union", a.as_str()]).assert().success().stdout("3\tcat\n1\tdog\n");
}

#[test]
fn output_follows_the_first_reports_line_terminator() {
    let temp = TempDir::new().unwrap();
    let crlf = path_with(&temp, "crlf.tsv", "1\tcat\r\n2\tdog\r\n");
    let lf = path_with(&temp, "lf.tsv", B);
    main_binary()
        .args(["union", crlf.as_str(), lf.as_str()])
        .assert()
        .success()
        .stdout("5\tbird\r\n2\tcat\r\n2\tdog\r\n");
    main_binary()
        .args(["union", lf.as_str(), crlf.as_str()])
        .assert()
        .success()
        .stdout("5\tbird\n2\tcat\n2\tdog\n");
}

#[test]
fn verbose_logs_to_stderr_only() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.tsv", A);
    main_binary()
        .env_remove("RUST_LOG")
        .args(["--verbose", "union", a.as_str()])
        .assert()
        .success()
        .stdout("3\tcat\n2\tdog\n")
        .stderr(predicate::str::contains("loaded report"));
}

#[test]
fn quiet_by_default() {
    let temp = TempDir::new().unwrap();
    let a = path_with(&temp, "a.tsv", A);
    main_binary().env_remove("RUST_LOG").args(["union", a.as_str()]).assert().success().stderr("");
}
