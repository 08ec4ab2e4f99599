//! Target configuration loading.
//!
//! Configuration is JSON, either a single target object or an array of them:
//!
//! ```json
//! [
//!   {
//!     "name": "build",
//!     "actions": [
//!       { "type": "env", "src": "1", "dst": "FOO" },
//!       { "type": "run", "name": "greet", "src": "echo hi", "dst": "out.txt" },
//!       { "type": "copy", "src": "README.md", "dst": "README.md" }
//!     ]
//!   }
//! ]
//! ```
//!
//! `src` is the primary argument (copy source, command, variable value) and
//! `dst` the secondary one (copy destination, stdout capture path, variable
//! name). `type` also accepts the numeric codes 0 (copy), 1 (run) and 2 (env).

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::action::{Action, NamedAction};
use crate::target::Target;

/// Errors found while reading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {}: {source}", path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("could not parse config: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("invalid name {name:?}")]
  InvalidTargetName { name: String },

  #[error("target {target}: action #{index} has unknown type {kind}")]
  UnknownActionKind { target: String, index: usize, kind: String },

  #[error("target {target}: action #{index} ({kind}) requires a non-empty {field}")]
  MissingArgument {
    target: String,
    index: usize,
    kind: &'static str,
    field: &'static str,
  },

  #[error("no target named {name}")]
  UnknownTarget { name: String },
}

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
  Stdin,
  File(PathBuf),
}

impl ConfigSource {
  /// `-` means stdin, anything else is a path.
  pub fn parse(arg: &str) -> Self {
    if arg == "-" {
      ConfigSource::Stdin
    } else {
      ConfigSource::File(PathBuf::from(arg))
    }
  }
}

/// Which top-level shape the configuration used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigShape {
  Single,
  Many,
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct Config {
  pub shape: ConfigShape,
  pub targets: Vec<Target>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawConfig {
  Many(Vec<RawTarget>),
  Single(RawTarget),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTarget {
  name: String,
  #[serde(default)]
  output: Option<PathBuf>,
  #[serde(default)]
  actions: Vec<RawAction>,
}

#[derive(Debug, Deserialize)]
struct RawAction {
  #[serde(rename = "type")]
  kind: RawKind,
  #[serde(default)]
  name: String,
  #[serde(default)]
  src: String,
  #[serde(default)]
  dst: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawKind {
  Code(i64),
  Tag(String),
}

/// Load and validate configuration from `source`.
pub fn load_config(source: &ConfigSource) -> Result<Config, ConfigError> {
  match source {
    ConfigSource::Stdin => {
      let mut content = String::new();
      io::stdin()
        .read_to_string(&mut content)
        .map_err(|source| ConfigError::Read {
          path: PathBuf::from("-"),
          source,
        })?;
      parse_config(&content)
    }
    ConfigSource::File(path) => load_config_file(path),
  }
}

pub fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
  let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  debug!(path = %path.display(), "loaded config");
  parse_config(&content)
}

/// Parse and validate configuration text.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
  let (shape, raw) = match serde_json::from_str::<RawConfig>(content)? {
    RawConfig::Many(targets) => (ConfigShape::Many, targets),
    RawConfig::Single(target) => (ConfigShape::Single, vec![target]),
  };

  let targets = raw.into_iter().map(convert_target).collect::<Result<Vec<_>, _>>()?;
  debug!(targets = targets.len(), shape = ?shape, "parsed config");

  Ok(Config { shape, targets })
}

/// Whether `name` is made only of ASCII letters, digits and `-`.
pub fn is_valid_name(name: &str) -> bool {
  !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn convert_target(raw: RawTarget) -> Result<Target, ConfigError> {
  if !is_valid_name(&raw.name) {
    return Err(ConfigError::InvalidTargetName { name: raw.name });
  }

  let actions = raw
    .actions
    .into_iter()
    .enumerate()
    .map(|(index, action)| convert_action(&raw.name, index, action))
    .collect::<Result<Vec<_>, _>>()?;

  Ok(Target {
    name: raw.name,
    output: raw.output,
    actions,
  })
}

fn convert_action(target: &str, index: usize, raw: RawAction) -> Result<NamedAction, ConfigError> {
  let kind = match &raw.kind {
    RawKind::Code(0) => "copy",
    RawKind::Code(1) => "run",
    RawKind::Code(2) => "env",
    RawKind::Tag(tag) => match tag.to_ascii_lowercase().as_str() {
      "copy" => "copy",
      "run" => "run",
      "env" | "set_env" | "setenv" => "env",
      _ => return Err(unknown_kind(target, index, tag.clone())),
    },
    RawKind::Code(code) => return Err(unknown_kind(target, index, code.to_string())),
  };

  let require = |value: &str, field: &'static str| {
    if value.is_empty() {
      Err(ConfigError::MissingArgument {
        target: target.to_string(),
        index,
        kind,
        field,
      })
    } else {
      Ok(())
    }
  };

  let action = match kind {
    "copy" => {
      require(&raw.src, "src")?;
      require(&raw.dst, "dst")?;
      Action::Copy {
        src: raw.src,
        dst: raw.dst,
      }
    }
    "run" => {
      require(&raw.src, "src")?;
      Action::Run {
        cmd: raw.src,
        stdout: Some(raw.dst).filter(|dst| !dst.is_empty()),
      }
    }
    _ => {
      require(&raw.dst, "dst")?;
      Action::SetEnv {
        name: raw.dst,
        value: raw.src,
      }
    }
  };

  Ok(NamedAction {
    name: Some(raw.name).filter(|name| !name.is_empty()),
    action,
  })
}

fn unknown_kind(target: &str, index: usize, kind: String) -> ConfigError {
  ConfigError::UnknownActionKind {
    target: target.to_string(),
    index,
    kind,
  }
}
