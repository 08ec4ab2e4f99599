//! Targets and the per-target runner.
//!
//! A target is one named unit of output: a directory plus an ordered list of
//! actions. [`run_target`] allocates the directory, builds the target's
//! [`ExecEnv`] and runs the actions in order, stopping at the first failure.
//! Nothing is retried and nothing already done is rolled back.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, error, info};

use crate::action::{Action, ActionError, ActionLabel, NamedAction, execute_action};
use crate::env::ExecEnv;
use crate::outdir::{AllocError, allocate_dir};

/// A validated target descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
  pub name: String,
  /// Explicit output directory. Relative paths are placed under the parent directory.
  pub output: Option<PathBuf>,
  pub actions: Vec<NamedAction>,
}

impl Target {
  pub fn new(name: impl Into<String>, actions: Vec<NamedAction>) -> Self {
    Self {
      name: name.into(),
      output: None,
      actions,
    }
  }

  /// The directory this target asks for, before any numbering.
  pub fn desired_dir(&self, parent_dir: &Path) -> PathBuf {
    match &self.output {
      Some(output) => parent_dir.join(output),
      None => parent_dir.join(&self.name),
    }
  }
}

/// Where a target is in its lifecycle.
///
/// `Pending → DirectoryAllocated → Executing(i) → Completed | Failed(i)`.
/// `Executing(i)` only moves to `Executing(i + 1)` after action `i` succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
  Pending,
  DirectoryAllocated,
  Executing(usize),
  Completed,
  /// Failed while allocating (`None`) or at the given action index.
  Failed(Option<usize>),
}

impl TargetState {
  fn is_terminal(self) -> bool {
    matches!(self, TargetState::Completed | TargetState::Failed(_))
  }

  /// Whether `self → next` is a legal transition.
  fn can_advance_to(self, next: TargetState) -> bool {
    use TargetState::{Completed, DirectoryAllocated, Executing, Failed, Pending};
    match (self, next) {
      (Pending, DirectoryAllocated) | (Pending, Failed(None)) => true,
      (DirectoryAllocated, Executing(0)) | (DirectoryAllocated, Completed) => true,
      (Executing(i), Executing(j)) => j == i + 1,
      (Executing(_), Completed) => true,
      (Executing(i), Failed(Some(j))) => i == j,
      _ => false,
    }
  }
}

impl fmt::Display for TargetState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TargetState::Pending => write!(f, "pending"),
      TargetState::DirectoryAllocated => write!(f, "directory allocated"),
      TargetState::Executing(i) => write!(f, "executing #{}", i),
      TargetState::Completed => write!(f, "completed"),
      TargetState::Failed(None) => write!(f, "failed during allocation"),
      TargetState::Failed(Some(i)) => write!(f, "failed at #{}", i),
    }
  }
}

/// Tracks one target through its lifecycle.
#[derive(Debug)]
struct TargetRun<'a> {
  name: &'a str,
  state: TargetState,
}

impl<'a> TargetRun<'a> {
  fn new(name: &'a str) -> Self {
    Self {
      name,
      state: TargetState::Pending,
    }
  }

  fn advance(&mut self, next: TargetState) {
    debug_assert!(
      self.state.can_advance_to(next),
      "illegal target transition {} -> {}",
      self.state,
      next
    );
    debug!(target_name = %self.name, from = %self.state, to = %next, "target state");
    self.state = next;
  }
}

/// Errors that end a target.
#[derive(Debug, Error)]
pub enum TargetError {
  #[error(transparent)]
  Allocate(#[from] AllocError),

  #[error("error executing action {action}: {source}")]
  Action { action: ActionLabel, source: ActionError },
}

/// Progress reported while a target runs.
#[derive(Debug, Clone)]
pub enum TargetEvent<'a> {
  /// The output directory was allocated.
  DirAllocated { target: &'a str, dir: &'a Path },
  /// An action is about to start.
  ActionStarted {
    target: &'a str,
    label: ActionLabel,
    action: &'a Action,
  },
}

/// Result of a completed target.
#[derive(Debug, Clone)]
pub struct TargetResult {
  pub name: String,
  /// The directory actually allocated.
  pub dir: PathBuf,
  pub actions_run: usize,
  pub state: TargetState,
}

/// Allocate a directory for `target` and run its actions in order.
///
/// # Arguments
///
/// * `target` - The target to run
/// * `parent_dir` - The run-wide parent directory (absolute)
/// * `numbering` - Whether an existing directory may be numbered around
/// * `shell` - Optional shell override for Run and Copy actions
///
/// # Errors
///
/// Returns the first error encountered; actions after it are never started.
pub async fn run_target(
  target: &Target,
  parent_dir: &Path,
  numbering: bool,
  shell: Option<&str>,
) -> Result<TargetResult, TargetError> {
  run_target_with_events(target, parent_dir, numbering, shell, &mut |_| {}).await
}

/// Like [`run_target`], calling `on_event` as the directory is allocated and
/// before each action starts.
pub async fn run_target_with_events(
  target: &Target,
  parent_dir: &Path,
  numbering: bool,
  shell: Option<&str>,
  on_event: &mut (dyn FnMut(TargetEvent<'_>) + Send),
) -> Result<TargetResult, TargetError> {
  let mut run = TargetRun::new(&target.name);
  info!(target_name = %target.name, actions = target.actions.len(), "starting target");

  let desired = target.desired_dir(parent_dir);
  let dir = match allocate_dir(&desired, numbering).await {
    Ok(dir) => dir,
    Err(e) => {
      run.advance(TargetState::Failed(None));
      error!(target_name = %target.name, error = %e, "output directory allocation failed");
      return Err(e.into());
    }
  };
  run.advance(TargetState::DirectoryAllocated);
  on_event(TargetEvent::DirAllocated {
    target: &target.name,
    dir: &dir,
  });

  let mut env = ExecEnv::new(&dir, parent_dir);

  for (index, step) in target.actions.iter().enumerate() {
    run.advance(TargetState::Executing(index));
    info!(target_name = %target.name, action = %step.label(index), "{}", step.action);
    on_event(TargetEvent::ActionStarted {
      target: &target.name,
      label: step.label(index),
      action: &step.action,
    });

    env = match execute_action(&step.action, env, shell).await {
      Ok(next) => next,
      Err(source) => {
        run.advance(TargetState::Failed(Some(index)));
        error!(target_name = %target.name, action = %step.label(index), error = %source, "action failed");
        return Err(TargetError::Action {
          action: step.label(index),
          source,
        });
      }
    };
  }

  run.advance(TargetState::Completed);
  debug_assert!(run.state.is_terminal());
  info!(target_name = %target.name, dir = %dir.display(), "target complete");

  Ok(TargetResult {
    name: target.name.clone(),
    dir,
    actions_run: target.actions.len(),
    state: run.state,
  })
}
