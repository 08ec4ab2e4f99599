//! Names shared across the crate.

pub const APP_NAME: &str = "buildsys";

/// Environment variable holding the target's allocated output directory.
///
/// Exported to every spawned action process. Helper scripts depend on this
/// name, so it must never change.
pub const DIR_ENV: &str = "BUILDSYS_DIR";

/// Environment variable holding the run-wide parent directory.
pub const PARENT_DIR_ENV: &str = "BUILDSYS_PARENT_DIR";

/// Default parent directory for target outputs, relative to the working directory.
pub const DEFAULT_PARENT_DIR: &str = "output";
