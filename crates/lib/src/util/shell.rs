//! Shell selection and argument quoting.

/// Get the shell command and arguments used to run action commands.
///
/// # Arguments
///
/// * `override_shell` - Optional shell override from config
///
/// # Returns
///
/// A tuple of (shell_command, shell_arguments); the command line is appended
/// after the arguments.
///
/// Without an override this is `bash -c` on Unix, never `$SHELL`.
pub fn get_shell(override_shell: Option<&str>) -> (String, Vec<String>) {
  if let Some(shell) = override_shell {
    let args = if shell.contains("powershell") || shell.contains("pwsh") {
      vec!["-NoProfile".to_string(), "-Command".to_string()]
    } else if shell.contains("cmd") {
      vec!["/C".to_string()]
    } else {
      vec!["-c".to_string()]
    };
    return (shell.to_string(), args);
  }

  #[cfg(unix)]
  {
    ("bash".to_string(), vec!["-c".to_string()])
  }

  #[cfg(windows)]
  {
    (
      "powershell.exe".to_string(),
      vec!["-NoProfile".to_string(), "-Command".to_string()],
    )
  }
}

/// Quote `input` for a POSIX shell, leaving plain words untouched.
pub fn quote(input: &str) -> String {
  if input.is_empty() {
    return "''".to_string();
  }
  if input
    .chars()
    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':' | '+' | '='))
  {
    return input.to_string();
  }
  format!("'{}'", input.replace('\'', "'\\''"))
}
