//! Output directory allocation.
//!
//! Every target gets a freshly created directory. When the desired directory
//! already exists and numbering is enabled, the allocator picks
//! `<name>-<N>` where `N` is one more than the largest numeric suffix among
//! the existing siblings (at least 2). The filesystem is the only source of
//! truth: no counter is persisted between runs.
//!
//! Allocation is not safe against concurrent orchestrators sharing a parent
//! directory; only the atomicity of a single `mkdir` protects it.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};

/// Errors that can occur while allocating an output directory.
#[derive(Debug, Error)]
pub enum AllocError {
  #[error("could not make output dir {}: {source}", path.display())]
  Create { path: PathBuf, source: io::Error },

  #[error("output dir {} already exists and numbering is disabled", path.display())]
  Exists { path: PathBuf },

  #[error("could not list {} to number directory: {source}", path.display())]
  ListParent { path: PathBuf, source: io::Error },

  #[error("could not make numbered directory {}: {source}", path.display())]
  CreateNumbered { path: PathBuf, source: io::Error },

  #[error("output dir {} has no name to number", path.display())]
  NoBaseName { path: PathBuf },

  #[error("no number left to allocate for {}", path.display())]
  NumberOverflow { path: PathBuf },
}

/// Create `desired`, or a numbered sibling of it when it already exists.
///
/// # Arguments
///
/// * `desired` - The directory the target asks for
/// * `numbering` - Whether to fall back to `<name>-<N>` on collision
///
/// # Returns
///
/// The directory actually created. It did not exist before this call.
pub async fn allocate_dir(desired: &Path, numbering: bool) -> Result<PathBuf, AllocError> {
  match create(desired).await {
    Ok(()) => {
      info!(dir = %desired.display(), "created output directory");
      return Ok(desired.to_path_buf());
    }
    Err(e) if e.kind() == io::ErrorKind::AlreadyExists && numbering => {
      debug!(dir = %desired.display(), "output directory exists, numbering");
    }
    Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
      return Err(AllocError::Exists {
        path: desired.to_path_buf(),
      });
    }
    Err(source) => {
      return Err(AllocError::Create {
        path: desired.to_path_buf(),
        source,
      });
    }
  }

  let prefix = desired
    .file_name()
    .map(|name| name.to_string_lossy().into_owned())
    .ok_or_else(|| AllocError::NoBaseName {
      path: desired.to_path_buf(),
    })?;
  let parent = match desired.parent() {
    Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
    _ => PathBuf::from("."),
  };

  let max = max_suffix(&parent, &prefix).await?;
  let next = max.checked_add(1).ok_or_else(|| AllocError::NumberOverflow {
    path: desired.to_path_buf(),
  })?;
  let numbered = parent.join(format!("{}-{}", prefix, next));

  create(&numbered).await.map_err(|source| AllocError::CreateNumbered {
    path: numbered.clone(),
    source,
  })?;

  info!(dir = %numbered.display(), "created numbered output directory");
  Ok(numbered)
}

/// Largest `N` among entries of `parent` named `<prefix>-<N>`, with a floor of 1.
///
/// Entries whose suffix is not a number are ignored.
async fn max_suffix(parent: &Path, prefix: &str) -> Result<u64, AllocError> {
  let list_err = |source| AllocError::ListParent {
    path: parent.to_path_buf(),
    source,
  };

  let pattern = format!("{}-", prefix);
  let mut max = 1;
  let mut entries = fs::read_dir(parent).await.map_err(list_err)?;
  while let Some(entry) = entries.next_entry().await.map_err(list_err)? {
    let name = entry.file_name();
    let name = name.to_string_lossy();
    let Some(suffix) = name.strip_prefix(&pattern) else {
      continue;
    };
    match suffix.parse::<u64>() {
      Ok(n) if n > max => max = n,
      Ok(_) => {}
      Err(_) => debug!(entry = %name, "ignoring non-numeric suffix"),
    }
  }

  Ok(max)
}

async fn create(path: &Path) -> io::Result<()> {
  let mut builder = fs::DirBuilder::new();
  #[cfg(unix)]
  builder.mode(0o755);
  builder.create(path).await
}
