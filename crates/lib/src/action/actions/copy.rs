//! Copy action implementation.
//!
//! A copy is not performed in-process: it is rewritten into a `cp` command and
//! run like any other shell action, with its stdout inherited.

use std::path::Path;

use crate::action::{ActionError, PathRole};
use crate::util::shell::quote;

use super::ensure_relative;

/// Build the shell command that copies `src` to `dst` inside `out_dir`.
///
/// Fails before anything touches the filesystem if either path is absolute.
pub fn copy_command(src: &str, dst: &str, out_dir: &Path) -> Result<String, ActionError> {
  ensure_relative(src, PathRole::Source)?;
  ensure_relative(dst, PathRole::Destination)?;

  let dest = out_dir.join(dst);
  Ok(format!("cp -- {} {}", quote(src), quote(&dest.to_string_lossy())))
}
