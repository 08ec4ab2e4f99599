//! Individual action implementations.
//!
//! This module contains the concrete implementations for the side-effecting
//! action kinds:
//!
//! - [`run`] - Shell command execution with an isolated environment and optional stdout capture
//! - [`copy`] - File copy, expressed as a synthesized `run` of `cp`
//!
//! `SetEnv` has no side effects of its own; it is handled by [`crate::env::ExecEnv::with_var`].

pub mod copy;
pub mod run;

use std::path::Path;

use crate::action::{ActionError, PathRole};

/// Reject absolute paths; every action path must stay relative.
pub(crate) fn ensure_relative(path: &str, role: PathRole) -> Result<(), ActionError> {
  if Path::new(path).is_absolute() {
    return Err(ActionError::PathNotRelative {
      role,
      path: path.to_string(),
    });
  }
  Ok(())
}
