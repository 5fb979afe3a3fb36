//! Integration tests for the `quadstore` command line tool, exercised as an
//! external process the way a user would invoke it.

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

fn nquads_file(contents: &str) -> assert_fs::NamedTempFile {
    let file = assert_fs::NamedTempFile::new("data.nq").unwrap();
    file.write_str(contents).unwrap();
    file
}

#[test]
fn load_reports_the_quad_count() {
    let file = nquads_file(concat!(
        "<urn:s1> <urn:p> <urn:o1> .\n",
        "<urn:s2> <urn:p> <urn:o2> <urn:g1> .\n",
    ));

    Command::cargo_bin("quadstore")
        .unwrap()
        .arg("load")
        .arg("--file")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 quads loaded"));
}

#[test]
fn load_skips_duplicate_lines() {
    let file = nquads_file(concat!(
        "<urn:s> <urn:p> <urn:o> .\n",
        "<urn:s> <urn:p> <urn:o> .\n",
    ));

    Command::cargo_bin("quadstore")
        .unwrap()
        .arg("load")
        .arg("--file")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 quads loaded (1 duplicate"));
}

#[test]
fn load_without_format_or_extension_fails_with_a_helpful_message() {
    Command::cargo_bin("quadstore")
        .unwrap()
        .arg("load")
        .write_stdin("<urn:s> <urn:p> <urn:o> .\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--format"));
}

#[test]
fn load_rejects_a_malformed_line_by_default() {
    let file = nquads_file("<urn:s> <urn:p> \"unterminated .\n");

    Command::cargo_bin("quadstore")
        .unwrap()
        .arg("load")
        .arg("--file")
        .arg(file.path())
        .assert()
        .failure();
}

#[test]
fn load_lenient_skips_malformed_lines_instead_of_failing() {
    let file = nquads_file(concat!(
        "<urn:s> <urn:p> \"unterminated .\n",
        "<urn:s> <urn:p> <urn:o> .\n",
    ));

    Command::cargo_bin("quadstore")
        .unwrap()
        .arg("load")
        .arg("--file")
        .arg(file.path())
        .arg("--lenient")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 quads loaded"));
}

#[test]
fn query_filters_by_bound_subject() {
    let file = nquads_file(concat!(
        "<urn:s1> <urn:p> <urn:o1> .\n",
        "<urn:s2> <urn:p> <urn:o2> .\n",
    ));

    Command::cargo_bin("quadstore")
        .unwrap()
        .arg("query")
        .arg("--file")
        .arg(file.path())
        .arg("--subject")
        .arg("<urn:s1>")
        .assert()
        .success()
        .stdout(predicate::str::contains("urn:s1").and(predicate::str::contains("urn:s2").not()));
}

#[test]
fn query_can_write_n_triples_dropping_the_graph_position() {
    let file = nquads_file("<urn:s> <urn:p> <urn:o> <urn:g> .\n");

    Command::cargo_bin("quadstore")
        .unwrap()
        .arg("query")
        .arg("--file")
        .arg(file.path())
        .arg("--out-format")
        .arg("nt")
        .assert()
        .success()
        .stdout(predicate::str::contains("urn:g").not());
}

#[test]
fn help_and_version_succeed() {
    Command::cargo_bin("quadstore").unwrap().arg("--help").assert().success();
    Command::cargo_bin("quadstore").unwrap().arg("--version").assert().success();
}
