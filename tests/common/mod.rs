#![allow(dead_code)]

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Runs storefront commands in an isolated temp directory
pub struct StorefrontTest {
    pub temp_dir: TempDir,
    env: Vec<(String, String)>,
}

impl StorefrontTest {
    pub fn new() -> Self {
        StorefrontTest {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
            env: Vec::new(),
        }
    }

    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    pub fn run(&self, args: &[&str]) -> Output {
        let mut command = Command::new(env!("CARGO_BIN_EXE_storefront"));
        command
            .args(args)
            .current_dir(self.temp_dir.path())
            .env_remove("STOREFRONT_API_URL")
            .env_remove("STOREFRONT_APP_URL")
            .env_remove("STOREFRONT_TOKEN")
            .env_remove("STOREFRONT_LOG");
        for (key, value) in &self.env {
            command.env(key, value);
        }
        command.output().expect("Failed to execute storefront command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn read_config(&self) -> String {
        let path = self.temp_dir.path().join(".storefront").join("config.yaml");
        fs::read_to_string(path).expect("Failed to read config file")
    }
}
