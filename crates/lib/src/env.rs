//! Execution environment threaded through a target's actions.
//!
//! An [`ExecEnv`] is created once per target, right after its output directory
//! has been allocated. It is passed by value from action to action: `SetEnv`
//! produces an updated environment for the steps that follow, so variables never
//! leak into the orchestrator's own process or into other targets.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::action::ActionError;
use crate::consts::{DIR_ENV, PARENT_DIR_ENV};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecEnv {
  dir: PathBuf,
  parent_dir: PathBuf,
  vars: BTreeMap<String, String>,
}

impl ExecEnv {
  pub fn new(dir: impl Into<PathBuf>, parent_dir: impl Into<PathBuf>) -> Self {
    Self {
      dir: dir.into(),
      parent_dir: parent_dir.into(),
      vars: BTreeMap::new(),
    }
  }

  /// The target's allocated output directory.
  pub fn dir(&self) -> &Path {
    &self.dir
  }

  /// The run-wide parent directory.
  pub fn parent_dir(&self) -> &Path {
    &self.parent_dir
  }

  /// Variables set by earlier `SetEnv` actions of this target.
  pub fn vars(&self) -> &BTreeMap<String, String> {
    &self.vars
  }

  /// Return a new environment with `name` set to `value`.
  ///
  /// The two directory variables are reserved and cannot be overridden.
  pub fn with_var(mut self, name: &str, value: &str) -> Result<Self, ActionError> {
    if name.is_empty() || name.contains('=') || name.contains('\0') {
      return Err(ActionError::InvalidEnvName { name: name.to_string() });
    }
    if name == DIR_ENV || name == PARENT_DIR_ENV {
      return Err(ActionError::ReservedEnvName { name: name.to_string() });
    }
    self.vars.insert(name.to_string(), value.to_string());
    Ok(self)
  }

  /// Every variable a spawned process receives, and nothing else.
  pub fn exported(&self) -> Vec<(String, String)> {
    let mut exported: Vec<(String, String)> = self.vars.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    exported.push((DIR_ENV.to_string(), self.dir.to_string_lossy().into_owned()));
    exported.push((PARENT_DIR_ENV.to_string(), self.parent_dir.to_string_lossy().into_owned()));
    exported
  }
}
