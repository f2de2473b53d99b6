//! Command-line behavior, exercised against the real binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn pymin() -> Command {
    Command::cargo_bin("pymin").expect("binary builds")
}

#[test]
fn minimizes_to_stdout() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("a.py");
    fs::write(&file, "def f():\n    return  1 + 2\n").expect("write");
    pymin()
        .arg(&file)
        .assert()
        .success()
        .stdout("def f():\n\treturn 1+2\n");
}

#[test]
fn writes_out_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("a.py");
    let out = dir.path().join("a.min.py");
    fs::write(&file, "x  =  1\n").expect("write");
    pymin()
        .arg(&file)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout("");
    assert_eq!(fs::read_to_string(&out).expect("read"), "x=1\n");
}

#[test]
fn keep_flags_are_honored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("a.py");
    fs::write(&file, "x = 1\n\n\n# note\ny = 2\n").expect("write");
    pymin()
        .arg(&file)
        .args(["-b", "-c", "-s"])
        .assert()
        .success()
        .stdout("x = 1\n\n# note\ny = 2\n");
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    pymin()
        .arg(dir.path().join("absent.py"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn malformed_source_fails_with_diagnostic() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("bad.py");
    fs::write(&file, "x = (1\n").expect("write");
    pymin()
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("ERROR"));
}

#[test]
fn invalid_separator_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("a.py");
    fs::write(&file, "x = 1\n").expect("write");
    pymin()
        .arg(&file)
        .args(["-w", "ab"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ERROR"));
}

#[test]
fn verbose_reports_removals() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("a.py");
    fs::write(&file, "'''doc'''\n\nx = 1  # inline\n").expect("write");
    pymin()
        .arg(&file)
        .arg("-v")
        .assert()
        .success()
        .stdout("x=1\n")
        .stderr(predicate::str::contains("removed 1 blank lines"))
        .stderr(predicate::str::contains("1 inline comments"))
        .stderr(predicate::str::contains("removed 1 docstrings"));
}

#[test]
fn recursive_mirrors_the_tree() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src = dir.path().join("src");
    let out = dir.path().join("out");
    fs::create_dir_all(src.join("pkg")).expect("mkdir");
    fs::write(src.join("pkg/a.py"), "x  =  1\n").expect("write");
    fs::write(src.join("notes.txt"), "keep me\n").expect("write");
    pymin()
        .arg(&src)
        .arg("-r")
        .arg("-o")
        .arg(&out)
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(out.join("pkg/a.py")).expect("read"),
        "x=1\n"
    );
    assert_eq!(
        fs::read_to_string(out.join("notes.txt")).expect("read"),
        "keep me\n"
    );
}

#[test]
fn recursive_continues_past_a_bad_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src = dir.path().join("src");
    fs::create_dir_all(&src).expect("mkdir");
    fs::write(src.join("bad.py"), "x = $\n").expect("write");
    fs::write(src.join("good.py"), "y  =  2\n").expect("write");
    pymin()
        .arg(&src)
        .arg("-r")
        .assert()
        .success()
        .stdout(predicate::str::contains("y=2"))
        .stderr(predicate::str::contains("ERROR"));
}

#[test]
fn recursive_rejects_a_file_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("a.py");
    fs::write(&file, "x = 1\n").expect("write");
    pymin()
        .arg(&file)
        .arg("-r")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn dump_tokens_emits_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("a.py");
    fs::write(&file, "x = 1\n").expect("write");
    pymin()
        .arg(&file)
        .arg("--dump-tokens")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Name\""))
        .stdout(predicate::str::contains("\"EndMarker\""));
}
