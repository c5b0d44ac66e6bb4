use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("termghost")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("print"))
        .stdout(predicate::str::contains("themes"))
        .stdout(predicate::str::contains("types"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("--autostart"));
}

#[test]
fn test_print_help_shows_options() {
    cargo_bin_cmd!("termghost")
        .args(["print", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--cycles"))
        .stdout(predicate::str::contains("--seed"))
        .stdout(predicate::str::contains("--json"))
        .stdout(predicate::str::contains("--types"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("termghost")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.2.1"));
}

#[test]
fn test_themes_lists_builtin_themes() {
    cargo_bin_cmd!("termghost")
        .arg("themes")
        .assert()
        .success()
        .stdout(predicate::str::contains("matrix"))
        .stdout(predicate::str::contains("retro-amber"))
        .stdout(predicate::str::contains("Solarized Light"));
}

#[test]
fn test_types_lists_log_types() {
    cargo_bin_cmd!("termghost")
        .arg("types")
        .assert()
        .success()
        .stdout(predicate::str::contains("npm"))
        .stdout(predicate::str::contains("ai"))
        .stdout(predicate::str::contains("AI / ML"));
}

#[test]
fn test_screensaver_requires_terminal() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("termghost")
        .env("TERMGHOST_HOME", dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}
