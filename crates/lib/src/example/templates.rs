//! Template content for `buildsys example`.

/// Example target configuration.
pub const EXAMPLE_CONFIG: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates/example.json"));

/// Example helper script for Run actions.
pub const EXAMPLE_SCRIPT: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates/example.sh"));
