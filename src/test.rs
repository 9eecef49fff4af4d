//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::args::{SelectionArgs, SellArgs};
use crate::booth::Booth;
use crate::commands;
use crate::model::Transaction;
use crate::store::FileStorage;
use crate::Config;
use tempfile::TempDir;

/// Test environment that sets up a booth home directory with a Config and an empty data file.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment with an initialized booth home.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("booth");
        let config = Config::create(&root).await.unwrap();
        Self { temp_dir, config }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// A scratch directory outside of the booth home.
    pub fn scratch(&self) -> &std::path::Path {
        self.temp_dir.path()
    }

    /// Loads the booth state as it currently is on disk.
    pub async fn booth(&self) -> Booth<FileStorage> {
        self.config.open_booth().await.unwrap()
    }

    /// Records a sale through the `sell` command and returns it.
    pub async fn sell(&self, client: &str, nominee: &str, packages: &[&str]) -> Transaction {
        let selection = SelectionArgs::new(
            packages.iter().map(|p| p.to_string()).collect(),
            Vec::new(),
            false,
        );
        let args = SellArgs::new(client, nominee, "2026", selection);
        commands::sell(self.config(), args)
            .await
            .unwrap()
            .into_data()
    }
}
