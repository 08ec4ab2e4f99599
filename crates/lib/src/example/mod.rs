//! Embedded example files.
//!
//! An example configuration and an example helper script, printed by
//! `buildsys example` as a starting point.

mod templates;

pub use templates::{EXAMPLE_CONFIG, EXAMPLE_SCRIPT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleKind {
  Config,
  Script,
}

impl ExampleKind {
  pub fn content(self) -> &'static str {
    match self {
      ExampleKind::Config => EXAMPLE_CONFIG,
      ExampleKind::Script => EXAMPLE_SCRIPT,
    }
  }
}
