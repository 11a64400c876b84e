use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::time::Duration;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("brainfucked").unwrap();
    cmd.timeout(Duration::from_secs(5))
        .env_remove("BRAINFUCKED_LOG")
        .env("BRAINFUCKED_COLOR", "never");
    cmd
}

fn write_tempfile(content: &[u8]) -> tempfile::NamedTempFile {
    let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
    tf.write_all(content).unwrap();
    tf
}

// 72 = 'H', 105 = 'i'
const HI: &str = "++++++++[>+++++++++<-]>.\n+++++++++++++++++++++++++++++++++.";

#[test]
fn no_arguments_does_nothing() {
    cargo_bin()
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn empty_instructions_do_nothing() {
    cargo_bin()
        .args(["--instructions", ""])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn runs_literal_instructions() {
    cargo_bin()
        .args(["--instructions", HI])
        .assert()
        .success()
        .stdout("Hi")
        .stderr(predicate::str::is_empty());
}

#[test]
fn runs_program_file() {
    let tf = write_tempfile(b"# greet\n++++++++[>+++++++++<-]>.\n+++++++++++++++++++++++++++++++++.\n");
    cargo_bin()
        .arg("--file")
        .arg(tf.path())
        .assert()
        .success()
        .stdout("Hi");
}

#[test]
fn file_takes_precedence_over_instructions() {
    let tf = write_tempfile(HI.as_bytes());
    cargo_bin()
        .arg("-f")
        .arg(tf.path())
        .args(["-i", "+++."])
        .assert()
        .success()
        .stdout("Hi");
}

#[test]
fn echoes_stdin() {
    cargo_bin()
        .args(["-i", ",.,."])
        .write_stdin("Zé")
        .assert()
        .success()
        .stdout("Zé");
}

#[test]
fn exhausted_stdin_is_an_error() {
    cargo_bin()
        .args(["-i", ",."])
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read input"));
}

#[test]
fn unmatched_bracket_is_reported_with_context() {
    cargo_bin()
        .args(["-i", "+-[+"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(
            predicate::str::contains("unmatched bracket '['")
                .and(predicate::str::contains("at instruction 2"))
                .and(predicate::str::contains("  +-[+\n    ^")),
        );
}

#[test]
fn empty_file_is_an_empty_program() {
    let tf = write_tempfile(b"");
    cargo_bin()
        .arg("--file")
        .arg(tf.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Empty program"));
}

#[test]
fn missing_file_is_an_error() {
    cargo_bin()
        .args(["--file", "/definitely/not/here.bf"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn debug_flag_prints_table_to_stderr() {
    cargo_bin()
        .args(["--debug", "-i", ">+."])
        .assert()
        .success()
        .stdout("\u{1}")
        .stderr(
            predicate::str::contains("STEP | IP")
                .and(predicate::str::contains("Moved pointer head to index 1"))
                .and(predicate::str::contains("Output char '\\u{1}'")),
        );
}

#[test]
fn invalid_color_is_a_usage_error() {
    cargo_bin()
        .args(["--color", "sometimes", "-i", "+"])
        .assert()
        .code(2);
}

#[test]
fn instructions_may_start_with_a_hyphen() {
    cargo_bin()
        .args(["-i", "-+."])
        .assert()
        .success()
        .stdout("\u{0}");
}

#[test]
fn empty_file_path_does_nothing() {
    cargo_bin()
        .args(["--file", ""])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn empty_file_path_falls_back_to_instructions() {
    cargo_bin()
        .args(["--file", "", "--instructions", HI])
        .assert()
        .success()
        .stdout("Hi");
}
