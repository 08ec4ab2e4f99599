//! Run execution.
//!
//! This module provides the main entry points for executing a list of targets:
//! - Resolving the parent directory
//! - Filtering targets by selection before any side effect
//! - Running targets one after another
//! - Applying the failure policy

pub mod types;

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::target::{Target, TargetEvent, run_target_with_events};

pub use types::{ExecuteConfig, ExecuteError, FailurePolicy, PlannedTarget, RunSummary, Selection, TargetFailure};

/// Execute the selected targets.
///
/// Targets run strictly in order, one at a time. A failed target never
/// affects another target's environment; whether the run continues after it
/// depends on `config.policy`.
///
/// # Arguments
///
/// * `targets` - Validated targets, in configuration order
/// * `selection` - Which targets to run
/// * `config` - Execution configuration
///
/// # Returns
///
/// A `RunSummary` with completed, failed, skipped and unreached targets.
/// Target failures are reported there, not as `Err`.
pub async fn execute(targets: &[Target], selection: &Selection, config: &ExecuteConfig) -> Result<RunSummary, ExecuteError> {
  execute_with_events(targets, selection, config, &mut |_| {}).await
}

/// Like [`execute`], forwarding every target's progress to `on_event`.
pub async fn execute_with_events(
  targets: &[Target],
  selection: &Selection,
  config: &ExecuteConfig,
  on_event: &mut (dyn FnMut(TargetEvent<'_>) + Send),
) -> Result<RunSummary, ExecuteError> {
  let parent_dir = prepare_parent_dir(&config.parent_dir).await?;
  info!(parent_dir = %parent_dir.display(), targets = targets.len(), "starting run");

  let mut summary = RunSummary {
    parent_dir: parent_dir.clone(),
    ..Default::default()
  };

  let mut remaining = targets.iter();
  for target in remaining.by_ref() {
    if !selection.is_selected(&target.name) {
      info!(target_name = %target.name, "target not selected, skipping");
      summary.skipped.push(target.name.clone());
      continue;
    }

    match run_target_with_events(target, &parent_dir, config.numbering, config.shell.as_deref(), on_event).await {
      Ok(result) => summary.completed.push(result),
      Err(error) => {
        summary.failed.push(TargetFailure {
          name: target.name.clone(),
          error,
        });
        if config.policy == FailurePolicy::Abort {
          warn!(target_name = %target.name, "aborting run after failed target");
          break;
        }
      }
    }
  }

  for target in remaining {
    if selection.is_selected(&target.name) {
      summary.not_run.push(target.name.clone());
    } else {
      summary.skipped.push(target.name.clone());
    }
  }

  info!(
    attempted = summary.attempted(),
    completed = summary.completed.len(),
    failed = summary.failed.len(),
    skipped = summary.skipped.len(),
    "run complete"
  );

  Ok(summary)
}

/// Describe what `execute` would do, without touching the filesystem.
pub fn plan(targets: &[Target], selection: &Selection, config: &ExecuteConfig) -> Vec<PlannedTarget> {
  let parent_dir = absolute_parent_dir(&config.parent_dir);

  targets
    .iter()
    .filter(|target| selection.is_selected(&target.name))
    .map(|target| PlannedTarget {
      name: target.name.clone(),
      desired_dir: target.desired_dir(&parent_dir),
      actions: target
        .actions
        .iter()
        .enumerate()
        .map(|(index, step)| format!("[{}] {}", step.label(index), step.action))
        .collect(),
    })
    .collect()
}

/// Create the parent directory if needed and return its absolute form.
async fn prepare_parent_dir(path: &Path) -> Result<PathBuf, ExecuteError> {
  let err = |source| ExecuteError::ParentDir {
    path: path.to_path_buf(),
    source,
  };

  tokio::fs::create_dir_all(path).await.map_err(err)?;
  dunce::canonicalize(path).map_err(err)
}

/// Best-effort absolute path for display, without requiring it to exist.
fn absolute_parent_dir(path: &Path) -> PathBuf {
  dunce::canonicalize(path)
    .or_else(|_| std::path::absolute(path))
    .unwrap_or_else(|_| path.to_path_buf())
}
