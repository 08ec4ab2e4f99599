//! Target actions and their execution.
//!
//! Actions are the primitive steps of a target, executed strictly in order
//! against the target's output directory.
//!
//! # Action Types
//!
//! - [`Action::Copy`] - Copy a file into the output directory (runs `cp`)
//! - [`Action::Run`] - Run a shell command, optionally capturing stdout to a file
//! - [`Action::SetEnv`] - Set a variable for the target's later actions
//!
//! # Environment
//!
//! Each action receives the target's [`ExecEnv`] by value and hands back the
//! environment for the next action. Spawned processes see exactly the
//! variables of that environment.

pub mod actions;
mod types;

pub use types::*;

use tracing::debug;

use crate::env::ExecEnv;
use actions::copy::copy_command;
use actions::run::execute_run;

/// Execute a single action.
///
/// # Arguments
///
/// * `action` - The action to execute
/// * `env` - The environment produced by the previous action
/// * `shell` - Optional shell override for Run and Copy
///
/// # Returns
///
/// The environment for the next action. Only `SetEnv` changes it.
pub async fn execute_action(action: &Action, env: ExecEnv, shell: Option<&str>) -> Result<ExecEnv, ActionError> {
  match action {
    Action::Copy { src, dst } => {
      let cmd = copy_command(src, dst, env.dir())?;
      execute_run(&cmd, None, &env, shell).await?;
      Ok(env)
    }

    Action::Run { cmd, stdout } => {
      execute_run(cmd, stdout.as_deref(), &env, shell).await?;
      Ok(env)
    }

    Action::SetEnv { name, value } => {
      debug!(name = %name, "setting environment variable");
      env.with_var(name, value)
    }
  }
}
