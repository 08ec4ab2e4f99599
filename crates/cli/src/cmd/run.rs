//! Implementation of the `buildsys run` command.
//!
//! Loads the target configuration, filters it by the targets named on the
//! command line, and runs each selected target into its own output directory.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::info;

use buildsys_lib::config::{ConfigSource, load_config};
use buildsys_lib::execute::{ExecuteConfig, FailurePolicy, RunSummary, Selection, execute_with_events, plan};
use buildsys_lib::target::TargetEvent;

use crate::output::{
  format_duration, print_error, print_info, print_stat, print_step, print_success, print_warning, symbols,
};

/// Arguments of the run command, after flag parsing.
pub struct RunArgs {
  pub targets: Vec<String>,
  pub config: String,
  pub parent_dir: PathBuf,
  pub numbering: bool,
  pub dry_run: bool,
  pub keep_going: bool,
  pub shell: Option<String>,
}

/// Execute the run command.
///
/// With `--dry-run`, prints each selected target's directory and actions and
/// touches nothing. Otherwise runs the targets and prints a summary.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, a selected target does
/// not exist, the parent directory cannot be prepared, or any target fails.
pub fn cmd_run(args: RunArgs) -> Result<()> {
  let source = ConfigSource::parse(&args.config);
  let config = load_config(&source).with_context(|| format!("Failed to load config: {}", args.config))?;

  let selection = if args.targets.is_empty() {
    Selection::all()
  } else {
    Selection::only(args.targets)
  };
  selection.validate(&config.targets)?;

  let exec_config = ExecuteConfig {
    parent_dir: args.parent_dir,
    numbering: args.numbering,
    shell: args.shell,
    policy: FailurePolicy::for_shape(config.shape, args.keep_going),
  };

  if args.dry_run {
    for target in plan(&config.targets, &selection, &exec_config) {
      print_info(&format!(
        "{} {} {}",
        target.name,
        symbols::ARROW,
        target.desired_dir.display()
      ));
      for action in &target.actions {
        print_step(action);
      }
    }
    return Ok(());
  }

  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;

  let started = Instant::now();
  let summary = rt
    .block_on(execute_with_events(
      &config.targets,
      &selection,
      &exec_config,
      &mut print_progress,
    ))
    .context("Run failed")?;

  print_summary(&summary);
  print_stat("Elapsed", &format_duration(started.elapsed()));
  info!(parent_dir = %summary.parent_dir.display(), "outputs written");

  if !summary.is_success() {
    bail!("{} target(s) failed", summary.failed.len());
  }

  Ok(())
}

fn print_progress(event: TargetEvent<'_>) {
  match event {
    TargetEvent::DirAllocated { target, dir } => {
      print_info(&format!("{}: writing to dir {}", target, dir.display()));
    }
    TargetEvent::ActionStarted { label, action, .. } => print_step(&format!("[{}] {}", label, action)),
  }
}

fn print_summary(summary: &RunSummary) {
  println!();
  for result in &summary.completed {
    print_success(&format!(
      "{} {} {}",
      result.name,
      symbols::ARROW,
      result.dir.display()
    ));
  }
  for failure in &summary.failed {
    print_error(&format!("target {}: {}", failure.name, failure.error));
  }
  for name in &summary.not_run {
    print_warning(&format!("target {} not run", name));
  }

  print_stat("Completed", &summary.completed.len().to_string());
  print_stat("Failed", &summary.failed.len().to_string());
  if !summary.skipped.is_empty() {
    print_stat("Skipped", &summary.skipped.join(", "));
  }
}
