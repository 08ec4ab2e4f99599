//! Implementation of the `buildsys example` command.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::ValueEnum;

use buildsys_lib::example::ExampleKind;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExampleArg {
  /// An example JSON target configuration
  Config,
  /// An example helper script for run actions
  Script,
}

impl From<ExampleArg> for ExampleKind {
  fn from(arg: ExampleArg) -> Self {
    match arg {
      ExampleArg::Config => ExampleKind::Config,
      ExampleArg::Script => ExampleKind::Script,
    }
  }
}

pub fn cmd_example(kind: ExampleArg) -> Result<()> {
  let content = ExampleKind::from(kind).content();
  io::stdout()
    .write_all(content.as_bytes())
    .context("couldn't write to stdout")
}
