//! The key-value slot the booth state is persisted to.
//!
//! `Storage` is deliberately tiny: read the whole blob, or replace it. `FileStorage` keeps the blob
//! in a JSON file in the booth home directory. `MemoryStorage` keeps it in memory, which is useful
//! for tests and for embedding the ledger without touching the filesystem.

use crate::error::Res;
use crate::utils;
use anyhow::{bail, Context};
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::trace;

#[async_trait::async_trait]
pub trait Storage: Debug + Send + Sync {
    /// Returns the stored blob, or `None` if nothing has been stored yet.
    async fn read(&self) -> anyhow::Result<Option<String>>;

    /// Replaces the stored blob.
    async fn write(&self, blob: &str) -> anyhow::Result<()>;
}

/// Stores the blob in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait::async_trait]
impl Storage for FileStorage {
    async fn read(&self) -> Res<Option<String>> {
        trace!("read {}", self.path.display());
        utils::read_optional(&self.path).await
    }

    /// Writes to a sibling temp file and renames it over the target so that a failed write never
    /// leaves a half-written data file behind.
    async fn write(&self, blob: &str) -> Res<()> {
        trace!("write {} bytes to {}", blob.len(), self.path.display());
        let temp = self.temp_path();
        utils::write(&temp, blob).await?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .with_context(|| format!("Unable to replace {}", self.path.display()))
    }
}

/// Stores the blob in memory. Writes can be made to fail with `set_fail_writes` to simulate a full
/// disk or an exceeded quota.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<String>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(blob: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(blob.into())),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn read(&self) -> Res<Option<String>> {
        Ok(self.contents())
    }

    async fn write(&self, blob: &str) -> Res<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("Storage quota exceeded");
        }
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow::anyhow!("The memory storage lock is poisoned"))?;
        *slot = Some(blob.to_string());
        Ok(())
    }
}
