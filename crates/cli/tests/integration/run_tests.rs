//! Integration tests for `buildsys run`.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn run_writes_captured_output() {
  if cfg!(windows) {
    return;
  }

  let env = TestEnv::from_fixture("build.json");

  env
    .run_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("build"))
    .stdout(predicate::str::contains("Completed: 1"));

  assert_eq!(env.read_output("build/out.txt"), "hi\n");
  assert_eq!(env.read_output("build/foo.txt"), "1\n");
}

#[test]
fn captured_output_stays_out_of_stdout() {
  if cfg!(windows) {
    return;
  }

  let env = TestEnv::from_fixture("build.json");
  env.write_file(
    "buildsys.json",
    r#"{"name": "quiet", "actions": [{"type": "run", "src": "printf 'cap%s\\n' tured", "dst": "c.txt"}]}"#,
  );

  env
    .run_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("captured").not());

  assert_eq!(env.read_output("quiet/c.txt"), "captured\n");
}

#[test]
fn uncaptured_output_reaches_stdout() {
  if cfg!(windows) {
    return;
  }

  let env = TestEnv::from_fixture("build.json");
  env.write_file(
    "buildsys.json",
    r#"{"name": "loud", "actions": [{"type": "run", "src": "printf 'inher%s\\n' ited"}]}"#,
  );

  env.run_cmd().assert().success().stdout(predicate::str::contains("inherited"));
}

#[test]
fn run_reports_progress() {
  if cfg!(windows) {
    return;
  }

  let env = TestEnv::from_fixture("build.json");

  env
    .run_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("build: writing to dir"))
    .stdout(predicate::str::contains("[greet] run echo hi > out.txt"))
    .stdout(predicate::str::contains("[#0] env FOO=1"));
}

#[test]
fn run_does_not_see_ambient_environment() {
  if cfg!(windows) {
    return;
  }

  let env = TestEnv::from_fixture("build.json");
  env.write_file(
    "buildsys.json",
    r#"{"name": "iso", "actions": [{"type": "run", "src": "echo \"[$AMBIENT_MARKER]\"", "dst": "m.txt"}]}"#,
  );

  env.run_cmd().env("AMBIENT_MARKER", "leaked").assert().success();

  assert_eq!(env.read_output("iso/m.txt"), "[]\n");
}

#[test]
fn run_reads_config_from_stdin() {
  if cfg!(windows) {
    return;
  }

  let env = TestEnv::from_fixture("build.json");

  env
    .buildsys_cmd()
    .arg("run")
    .arg("--parent-dir")
    .arg(env.output_path())
    .write_stdin(r#"{"name": "piped", "actions": [{"type": "run", "src": "echo piped", "dst": "p.txt"}]}"#)
    .assert()
    .success();

  assert_eq!(env.read_output("piped/p.txt"), "piped\n");
}

#[test]
fn copy_places_file_in_target_dir() {
  if cfg!(windows) {
    return;
  }

  let env = TestEnv::from_fixture("copy.json");
  env.write_file("README.md", "# readme\n");

  env.run_cmd().assert().success();

  assert_eq!(env.read_output("bundle/README.md"), "# readme\n");
  assert_eq!(env.read_output("bundle/echo.txt"), "# readme\n");
}

#[test]
fn copy_with_absolute_path_fails() {
  let env = TestEnv::from_fixture("absolute_copy.json");

  env
    .run_cmd()
    .assert()
    .failure()
    .stderr(predicate::str::contains("copy source is not relative"));

  assert!(!env.output_path().join("escape").join("hostname").exists());
}

#[test]
fn failing_action_stops_target_and_run() {
  if cfg!(windows) {
    return;
  }

  let env = TestEnv::from_fixture("multi.json");

  env
    .run_cmd()
    .assert()
    .failure()
    .stderr(predicate::str::contains("target broken"))
    .stderr(predicate::str::contains("target docs not run"));

  assert!(!env.output_path().join("broken").join("after.txt").exists());
  assert!(!env.output_path().join("documentation").exists());
}

#[test]
fn keep_going_runs_later_targets() {
  if cfg!(windows) {
    return;
  }

  let env = TestEnv::from_fixture("multi.json");

  env
    .run_cmd()
    .arg("--keep-going")
    .assert()
    .failure()
    .stderr(predicate::str::contains("1 target(s) failed"));

  assert_eq!(env.read_output("documentation/index.txt"), "docs\n");
}

#[test]
fn selected_target_runs_alone() {
  if cfg!(windows) {
    return;
  }

  let env = TestEnv::from_fixture("multi.json");

  env
    .run_cmd()
    .arg("docs")
    .assert()
    .success()
    .stdout(predicate::str::contains("Skipped: broken"));

  assert!(!env.output_path().join("broken").exists());
  assert_eq!(env.read_output("documentation/index.txt"), "docs\n");
}

#[test]
fn unknown_target_fails_before_running() {
  let env = TestEnv::from_fixture("multi.json");

  env
    .run_cmd()
    .arg("nope")
    .assert()
    .failure()
    .stderr(predicate::str::contains("no target named nope"));

  assert!(!env.output_path().exists());
}

#[test]
fn dry_run_creates_nothing() {
  let env = TestEnv::from_fixture("build.json");

  env
    .run_cmd()
    .arg("--dry-run")
    .assert()
    .success()
    .stdout(predicate::str::contains("[greet] run echo hi > out.txt"))
    .stdout(predicate::str::contains("env FOO=1"));

  assert!(!env.output_path().exists());
}

#[test]
fn invalid_config_fails() {
  let env = TestEnv::from_fixture("build.json");
  env.write_file("buildsys.json", r#"{"name": "bad", "actions": [{"type": 7, "src": "x"}]}"#);

  env
    .run_cmd()
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load config"));
}
