use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A primitive step within a target.
///
/// The set of kinds is closed: configuration with any other kind is rejected
/// while loading (see [`crate::config::ConfigError::UnknownActionKind`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
  /// Copy `src` into the output directory at `dst`.
  ///
  /// Both paths must be relative. `src` is resolved against the working
  /// directory of the orchestrator, `dst` against the output directory.
  Copy { src: String, dst: String },
  /// Run `cmd` through a shell.
  ///
  /// When `stdout` is set, the command's standard output is written to that
  /// file inside the output directory instead of the orchestrator's stdout.
  Run { cmd: String, stdout: Option<String> },
  /// Set `name` to `value` for every later action of the same target.
  SetEnv { name: String, value: String },
}

impl fmt::Display for Action {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Action::Copy { src, dst } => write!(f, "copy {} -> {}", src, dst),
      Action::Run { cmd, stdout: None } => write!(f, "run {}", cmd),
      Action::Run {
        cmd,
        stdout: Some(stdout),
      } => write!(f, "run {} > {}", cmd, stdout),
      Action::SetEnv { name, value } => write!(f, "env {}={}", name, value),
    }
  }
}

/// An action together with its optional diagnostic name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedAction {
  pub name: Option<String>,
  pub action: Action,
}

impl NamedAction {
  pub fn new(action: Action) -> Self {
    Self { name: None, action }
  }

  pub fn named(name: impl Into<String>, action: Action) -> Self {
    Self {
      name: Some(name.into()),
      action,
    }
  }

  /// How this action is identified in errors: its name if it has one,
  /// its position otherwise.
  pub fn label(&self, index: usize) -> ActionLabel {
    match &self.name {
      Some(name) if !name.is_empty() => ActionLabel::Named(name.clone()),
      _ => ActionLabel::Index(index),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionLabel {
  Named(String),
  Index(usize),
}

impl fmt::Display for ActionLabel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ActionLabel::Named(name) => write!(f, "{}", name),
      ActionLabel::Index(index) => write!(f, "#{}", index),
    }
  }
}

/// Which argument of an action a path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRole {
  Source,
  Destination,
  Capture,
}

impl fmt::Display for PathRole {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PathRole::Source => write!(f, "copy source"),
      PathRole::Destination => write!(f, "copy destination"),
      PathRole::Capture => write!(f, "output capture path"),
    }
  }
}

/// Errors that can occur while executing a single action.
#[derive(Debug, Error)]
pub enum ActionError {
  /// A path that must stay inside the output directory was absolute.
  #[error("{role} is not relative: {path}")]
  PathNotRelative { role: PathRole, path: String },

  /// The output capture file could not be opened.
  #[error("failed to open {}: {source}", path.display())]
  FileOpen { path: PathBuf, source: io::Error },

  /// The shell could not be spawned.
  #[error("failed to start command `{cmd}`: {source}")]
  ProcessStart { cmd: String, source: io::Error },

  /// The command exited unsuccessfully. `code` is `None` when killed by a signal.
  #[error("command failed with exit code {code:?}: {cmd}")]
  ProcessExit { cmd: String, code: Option<i32> },

  #[error("invalid environment variable name: {name:?}")]
  InvalidEnvName { name: String },

  #[error("environment variable {name} is reserved")]
  ReservedEnvName { name: String },
}
