pub mod memory_store;
pub mod mock_ocr;

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Isolated environment for running the `allerlens` binary
pub struct TestContext {
    pub temp_dir: TempDir,
    pub db_path: PathBuf,
    pub config_path: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("data/ingredients.db");
        // Never created, so the binary runs on defaults
        let config_path = temp_dir.path().join("config/config.json");

        TestContext {
            temp_dir,
            db_path,
            config_path,
        }
    }

    /// Run the binary with `args`, pointing it at this context's files
    pub fn run(&self, args: &[&str]) -> Output {
        let bin_path = env!("CARGO_BIN_EXE_allerlens");
        Command::new(bin_path)
            .arg("--db")
            .arg(&self.db_path)
            .arg("--config")
            .arg(&self.config_path)
            .args(args)
            .env("XDG_CONFIG_HOME", self.temp_dir.path().join("config"))
            .env("XDG_DATA_HOME", self.temp_dir.path().join("data"))
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run allerlens")
    }

    /// Run and parse stdout as JSON, asserting success
    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let mut full = vec!["--json"];
        full.extend_from_slice(args);
        let output = self.run(&full);
        assert!(
            output.status.success(),
            "allerlens {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
    }
}
