//! Test utilities for buildsys-lib.

use crate::action::{Action, NamedAction};

/// A shell command that prints an environment variable (empty line when unset).
#[cfg(unix)]
pub fn echo_env(var: &str) -> String {
  format!("echo \"${}\"", var)
}

#[cfg(windows)]
pub fn echo_env(var: &str) -> String {
  format!("Write-Output $env:{}", var)
}

pub fn run(cmd: &str) -> NamedAction {
  NamedAction::new(Action::Run {
    cmd: cmd.to_string(),
    stdout: None,
  })
}

pub fn run_to(cmd: &str, stdout: &str) -> NamedAction {
  NamedAction::new(Action::Run {
    cmd: cmd.to_string(),
    stdout: Some(stdout.to_string()),
  })
}

pub fn set_env(name: &str, value: &str) -> NamedAction {
  NamedAction::new(Action::SetEnv {
    name: name.to_string(),
    value: value.to_string(),
  })
}

pub fn copy(src: &str, dst: &str) -> NamedAction {
  NamedAction::new(Action::Copy {
    src: src.to_string(),
    dst: dst.to_string(),
  })
}
