//! Shared utilities for integration tests.

use std::fs;
use std::path::PathBuf;

/// Write a config file under the system temp dir, unique per test and process.
#[allow(dead_code)]
pub fn write_config(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "subnet-match-it-{}-{}.toml",
        name,
        std::process::id()
    ));
    fs::write(&path, content).unwrap();
    path
}

/// Owned spec list from string literals.
#[allow(dead_code)]
pub fn specs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
