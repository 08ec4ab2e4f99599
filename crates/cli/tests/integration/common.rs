//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Isolated test environment.
///
/// Each test gets its own temporary working directory; outputs land in its
/// `output` subdirectory.
pub struct TestEnv {
  pub temp: TempDir,
  pub config_path: PathBuf,
}

impl TestEnv {
  /// Create from a fixture file, copied to `buildsys.json` in the temp directory.
  pub fn from_fixture(name: &str) -> Self {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("buildsys.json");
    std::fs::write(&config_path, fixture_content(name)).unwrap();
    Self { temp, config_path }
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Parent directory for target outputs. Not created.
  pub fn output_path(&self) -> PathBuf {
    let p = dunce::canonicalize(self.temp.path()).unwrap_or_else(|_| self.temp.path().to_path_buf());
    p.join("output")
  }

  /// Read a file under the output directory.
  pub fn read_output(&self, relative_path: &str) -> String {
    std::fs::read_to_string(self.output_path().join(relative_path))
      .unwrap_or_else(|e| panic!("Failed to read output {}: {}", relative_path, e))
  }

  /// Get a pre-configured Command for the buildsys binary.
  ///
  /// Runs in the temp directory with logging and shell overrides cleared.
  pub fn buildsys_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("buildsys");
    cmd.current_dir(self.temp.path());
    cmd.env_remove("BUILDSYS_LOG");
    cmd.env_remove("BUILDSYS_SHELL");
    cmd
  }

  /// `buildsys run -c <config> -p <output>` with extra arguments.
  pub fn run_cmd(&self) -> Command {
    let mut cmd = self.buildsys_cmd();
    cmd
      .arg("run")
      .arg("--config")
      .arg(&self.config_path)
      .arg("--parent-dir")
      .arg(self.output_path());
    cmd
  }
}
