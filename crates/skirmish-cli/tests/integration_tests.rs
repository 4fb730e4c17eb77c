use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("skirmish").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Skirmish - episodic client for a remote FPS engine",
        ));
}

#[test]
fn test_cli_list() {
    let mut cmd = Command::cargo_bin("skirmish").unwrap();
    cmd.arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("supply-battle"))
        .stdout(predicate::str::contains("walk_dir"))
        .stdout(predicate::str::contains("reload"));
}

#[test]
fn test_cli_rejects_invalid_config_before_connecting() {
    let mut cmd = Command::cargo_bin("skirmish").unwrap();
    cmd.arg("run")
        .arg("--num-agents")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("num_agents"));
}

#[test]
fn test_cli_surfaces_connection_error_for_unreachable_engine() {
    // Nothing listens on port 1; the run must fail before any episode
    // output.
    let mut cmd = Command::cargo_bin("skirmish").unwrap();
    cmd.arg("run")
        .arg("--port")
        .arg("1")
        .arg("--connect-timeout")
        .arg("1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to connect"));
}
