//! Implementation of the `buildsys list` command.

use anyhow::{Context, Result};

use buildsys_lib::config::{ConfigSource, load_config};

use crate::output::{print_info, print_json, symbols};

pub fn cmd_list(config: &str, json: bool) -> Result<()> {
  let source = ConfigSource::parse(config);
  let loaded = load_config(&source).with_context(|| format!("Failed to load config: {}", config))?;

  if json {
    let targets: Vec<_> = loaded
      .targets
      .iter()
      .map(|t| {
        serde_json::json!({
          "name": t.name,
          "output": t.output.as_ref().map(|o| o.display().to_string()),
          "actions": t.actions.len(),
        })
      })
      .collect();
    return print_json(&targets);
  }

  for target in &loaded.targets {
    let output = match &target.output {
      Some(output) => format!(" {} {}", symbols::ARROW, output.display()),
      None => String::new(),
    };
    print_info(&format!("{} ({} actions){}", target.name, target.actions.len(), output));
  }

  Ok(())
}
