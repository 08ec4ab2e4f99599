mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use buildsys_lib::consts::{APP_NAME, DEFAULT_PARENT_DIR};

use crate::cmd::{ExampleArg, RunArgs};

/// buildsys - declarative build output orchestrator
#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Run targets from a configuration file
  Run {
    /// Targets to run (default: all)
    targets: Vec<String>,

    /// Configuration file, or `-` for stdin
    #[arg(short, long, default_value = "-")]
    config: String,

    /// Parent directory of the target outputs
    #[arg(short, long, default_value = DEFAULT_PARENT_DIR)]
    parent_dir: PathBuf,

    /// Fail instead of appending `-N` when an output directory already exists
    #[arg(long)]
    no_number: bool,

    /// Print targets and actions without running anything
    #[arg(long)]
    dry_run: bool,

    /// Keep running the remaining targets after one fails
    #[arg(long)]
    keep_going: bool,

    /// Shell used to run commands (default: bash)
    #[arg(long, env = "BUILDSYS_SHELL")]
    shell: Option<String>,
  },

  /// List the targets in a configuration file
  List {
    /// Configuration file, or `-` for stdin
    #[arg(short, long, default_value = "-")]
    config: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
  },

  /// Print an example file
  Example {
    #[arg(value_enum)]
    kind: ExampleArg,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  init_tracing(cli.verbose);

  match cli.command {
    Commands::Run {
      targets,
      config,
      parent_dir,
      no_number,
      dry_run,
      keep_going,
      shell,
    } => cmd::cmd_run(RunArgs {
      targets,
      config,
      parent_dir,
      numbering: !no_number,
      dry_run,
      keep_going,
      shell,
    }),
    Commands::List { config, json } => cmd::cmd_list(&config, json),
    Commands::Example { kind } => cmd::cmd_example(kind),
  }
}

/// Log to stderr. `BUILDSYS_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
  let default = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_env("BUILDSYS_LOG").unwrap_or_else(|_| EnvFilter::new(default));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}
