//! Types for run execution.
//!
//! This module defines the configuration, target selection, error and result
//! types for executing a list of targets.

use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::{ConfigError, ConfigShape};
use crate::consts::DEFAULT_PARENT_DIR;
use crate::target::{Target, TargetError, TargetResult};

/// What to do with the remaining targets once one has failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
  /// Stop the run at the first failed target.
  #[default]
  Abort,
  /// Record the failure and carry on with the next target.
  Continue,
}

impl FailurePolicy {
  /// The policy for a configuration shape. A lone target has nothing to continue with.
  pub fn for_shape(shape: ConfigShape, keep_going: bool) -> Self {
    match shape {
      ConfigShape::Many if keep_going => FailurePolicy::Continue,
      _ => FailurePolicy::Abort,
    }
  }
}

/// Configuration for a run.
#[derive(Debug, Clone)]
pub struct ExecuteConfig {
  /// Directory under which target outputs are allocated. Created if missing.
  pub parent_dir: PathBuf,

  /// Whether an existing output directory may be numbered around (`name-N`).
  pub numbering: bool,

  /// Shell to use for Run and Copy actions.
  /// If None, uses bash (Unix) or powershell.exe (Windows).
  pub shell: Option<String>,

  pub policy: FailurePolicy,
}

impl Default for ExecuteConfig {
  fn default() -> Self {
    Self {
      parent_dir: PathBuf::from(DEFAULT_PARENT_DIR),
      numbering: true,
      shell: None,
      policy: FailurePolicy::default(),
    }
  }
}

/// Which targets to run. Empty means all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
  names: BTreeSet<String>,
}

impl Selection {
  pub fn all() -> Self {
    Self::default()
  }

  pub fn only<I, S>(names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      names: names.into_iter().map(Into::into).collect(),
    }
  }

  pub fn is_all(&self) -> bool {
    self.names.is_empty()
  }

  pub fn is_selected(&self, name: &str) -> bool {
    self.is_all() || self.names.contains(name)
  }

  /// Check that every selected name matches some target.
  pub fn validate(&self, targets: &[Target]) -> Result<(), ConfigError> {
    for name in &self.names {
      if !targets.iter().any(|t| &t.name == name) {
        return Err(ConfigError::UnknownTarget { name: name.clone() });
      }
    }
    Ok(())
  }
}

/// Errors that prevent a run from starting.
#[derive(Debug, Error)]
pub enum ExecuteError {
  #[error("couldn't prepare parent dir {}: {source}", path.display())]
  ParentDir { path: PathBuf, source: io::Error },
}

/// A target that failed, with the reason.
#[derive(Debug)]
pub struct TargetFailure {
  pub name: String,
  pub error: TargetError,
}

/// Result of running a list of targets.
#[derive(Debug, Default)]
pub struct RunSummary {
  /// The absolute parent directory used for the run.
  pub parent_dir: PathBuf,

  /// Targets that ran all their actions.
  pub completed: Vec<TargetResult>,

  /// Targets that failed. With [`FailurePolicy::Abort`] there is at most one.
  pub failed: Vec<TargetFailure>,

  /// Targets left out by the selection.
  pub skipped: Vec<String>,

  /// Targets never reached because an earlier one failed under [`FailurePolicy::Abort`].
  pub not_run: Vec<String>,
}

impl RunSummary {
  /// Returns true if no target failed.
  pub fn is_success(&self) -> bool {
    self.failed.is_empty()
  }

  /// Returns the number of targets that were attempted.
  pub fn attempted(&self) -> usize {
    self.completed.len() + self.failed.len()
  }
}

/// What a dry run reports for one selected target.
#[derive(Debug, Clone)]
pub struct PlannedTarget {
  pub name: String,
  /// The directory the target would ask for; numbering may change it.
  pub desired_dir: PathBuf,
  pub actions: Vec<String>,
}
