//! Run action implementation.
//!
//! This module handles executing shell commands with isolated environments:
//! the child sees only the variables exported by the target's [`ExecEnv`],
//! never the orchestrator's own environment.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::fs::OpenOptions;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::action::{ActionError, PathRole};
use crate::env::ExecEnv;
use crate::util::shell::get_shell;

use super::ensure_relative;

/// Execute a Run action.
///
/// Runs `cmd` through the shell with:
/// - All inherited environment variables cleared
/// - Exactly the variables of `env` exported
/// - Stdin closed, stderr inherited
/// - Stdout inherited, or written to `stdout` inside the output directory
///
/// Blocks until the command exits.
///
/// # Arguments
///
/// * `cmd` - The command line, passed verbatim to the shell
/// * `stdout` - Optional capture path, relative to the output directory
/// * `env` - The target's execution environment
/// * `shell` - Optional shell override (defaults to bash on Unix)
pub async fn execute_run(cmd: &str, stdout: Option<&str>, env: &ExecEnv, shell: Option<&str>) -> Result<(), ActionError> {
  info!(cmd = %cmd, "executing command");

  let stdout = match stdout {
    Some(path) => {
      let file = open_capture(env.dir(), path).await?;
      Stdio::from(file)
    }
    None => Stdio::inherit(),
  };

  let (shell_cmd, shell_args) = get_shell(shell);

  let mut command = Command::new(&shell_cmd);
  command
    .args(&shell_args)
    .arg(cmd)
    .env_clear()
    .envs(env.exported())
    .stdin(Stdio::null())
    .stdout(stdout)
    .stderr(Stdio::inherit());

  debug!(shell = %shell_cmd, vars = ?env.vars().keys().collect::<Vec<_>>(), "spawning process");

  let status = command.status().await.map_err(|source| ActionError::ProcessStart {
    cmd: cmd.to_string(),
    source,
  })?;

  if !status.success() {
    warn!(cmd = %cmd, code = ?status.code(), "command failed");
    return Err(ActionError::ProcessExit {
      cmd: cmd.to_string(),
      code: status.code(),
    });
  }

  Ok(())
}

/// Open (creating or truncating) the stdout capture file inside `out_dir`.
async fn open_capture(out_dir: &Path, path: &str) -> Result<std::fs::File, ActionError> {
  ensure_relative(path, PathRole::Capture)?;

  let full: PathBuf = out_dir.join(path);
  let mut options = OpenOptions::new();
  options.write(true).create(true).truncate(true);
  #[cfg(unix)]
  options.mode(0o644);

  debug!(path = ?full, "capturing stdout");
  let file = options
    .open(&full)
    .await
    .map_err(|source| ActionError::FileOpen { path: full, source })?;
  Ok(file.into_std().await)
}
