//! End-to-end tests through the public API: parse a config, run it, inspect outputs.

use buildsys_lib::config::{ConfigShape, parse_config};
use buildsys_lib::execute::{ExecuteConfig, FailurePolicy, Selection, execute};
use buildsys_lib::target::TargetError;
use tempfile::TempDir;

fn config_in(temp: &TempDir, policy: FailurePolicy) -> ExecuteConfig {
  ExecuteConfig {
    parent_dir: temp.path().join("output"),
    policy,
    ..Default::default()
  }
}

#[cfg(unix)]
#[tokio::test]
async fn parsed_config_runs_to_completion() {
  let temp = TempDir::new().unwrap();
  let config = parse_config(
    r#"[
      {
        "name": "build",
        "actions": [
          {"type": "env", "src": "release", "dst": "PROFILE"},
          {"type": "run", "name": "profile", "src": "echo \"$PROFILE\"", "dst": "profile.txt"},
          {"type": "run", "src": "basename \"$BUILDSYS_PARENT_DIR\"", "dst": "parent.txt"}
        ]
      },
      {"name": "docs", "output": "site", "actions": [{"type": 1, "src": "echo docs", "dst": "index.txt"}]}
    ]"#,
  )
  .unwrap();
  assert_eq!(config.shape, ConfigShape::Many);

  let summary = execute(&config.targets, &Selection::all(), &config_in(&temp, FailurePolicy::Abort))
    .await
    .unwrap();

  assert!(summary.is_success());
  assert_eq!(summary.completed.len(), 2);

  let build = &summary.completed[0].dir;
  assert_eq!(std::fs::read_to_string(build.join("profile.txt")).unwrap(), "release\n");
  assert_eq!(std::fs::read_to_string(build.join("parent.txt")).unwrap(), "output\n");

  let docs = &summary.completed[1].dir;
  assert_eq!(docs, &summary.parent_dir.join("site"));
  assert_eq!(std::fs::read_to_string(docs.join("index.txt")).unwrap(), "docs\n");
}

#[cfg(unix)]
#[tokio::test]
async fn failed_target_keeps_partial_outputs() {
  let temp = TempDir::new().unwrap();
  let config = parse_config(
    r#"{
      "name": "partial",
      "actions": [
        {"type": "run", "src": "echo kept", "dst": "kept.txt"},
        {"type": "run", "name": "boom", "src": "exit 4"},
        {"type": "run", "src": "echo lost", "dst": "lost.txt"}
      ]
    }"#,
  )
  .unwrap();
  let policy = FailurePolicy::for_shape(config.shape, true);
  assert_eq!(policy, FailurePolicy::Abort);

  let summary = execute(&config.targets, &Selection::all(), &config_in(&temp, policy))
    .await
    .unwrap();

  assert_eq!(summary.failed.len(), 1);
  let failure = &summary.failed[0];
  assert!(matches!(failure.error, TargetError::Action { .. }));
  assert_eq!(
    failure.error.to_string(),
    "error executing action boom: command failed with exit code Some(4): exit 4"
  );

  let dir = summary.parent_dir.join("partial");
  assert!(dir.join("kept.txt").exists());
  assert!(!dir.join("lost.txt").exists());
}

#[tokio::test]
async fn repeated_runs_allocate_fresh_directories() {
  let temp = TempDir::new().unwrap();
  let config = parse_config(r#"{"name": "x", "actions": []}"#).unwrap();
  let exec = config_in(&temp, FailurePolicy::Abort);

  let mut dirs = Vec::new();
  for _ in 0..3 {
    let summary = execute(&config.targets, &Selection::all(), &exec).await.unwrap();
    dirs.push(summary.completed[0].dir.clone());
  }

  let names: Vec<_> = dirs
    .iter()
    .map(|d| d.file_name().unwrap().to_string_lossy().into_owned())
    .collect();
  assert_eq!(names, vec!["x", "x-2", "x-3"]);
}
