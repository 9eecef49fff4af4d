use crate::error::Res;
use anyhow::Context;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::ReadDir;

/// Write a file.
pub(crate) async fn write(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Res<()> {
    let path = path.as_ref();
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("Unable to write to {}", path.display()))
}

/// Read a file to a `String`.
pub(crate) async fn read(path: &Path) -> Res<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file at {}", path.display()))
}

/// Read a file to a `String`, returning `None` if the file does not exist.
pub(crate) async fn read_optional(path: &Path) -> Res<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read file at {}", path.display())),
    }
}

/// Deserialize a JSON file into type `T`.
pub(crate) async fn deserialize<T>(path: &Path) -> Res<T>
where
    T: DeserializeOwned,
{
    let content = read(path).await?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file at {}", path.display()))
}

/// Create a directory and any missing parents.
pub(crate) async fn make_dir(path: impl AsRef<Path>) -> Res<()> {
    let path = path.as_ref();
    tokio::fs::create_dir_all(path)
        .await
        .with_context(|| format!("Unable to create directory at {}", path.display()))
}

pub(crate) async fn canonicalize(path: impl AsRef<Path>) -> Res<PathBuf> {
    let path = path.as_ref();
    tokio::fs::canonicalize(path)
        .await
        .with_context(|| format!("Unable to canonicalize the path {}", path.display()))
}

pub(crate) async fn read_dir(path: impl AsRef<Path>) -> Res<ReadDir> {
    let path = path.as_ref();
    tokio::fs::read_dir(path)
        .await
        .with_context(|| format!("Unable to read directory {}", path.display()))
}

pub(crate) async fn remove(path: impl AsRef<Path>) -> Res<()> {
    let path = path.as_ref();
    tokio::fs::remove_file(path)
        .await
        .with_context(|| format!("Unable to remove file {}", path.display()))
}

/// Formats a whole-peso amount with thousands separators, e.g. `₱12,500`.
pub(crate) fn pesos(amount: impl Into<i128>) -> String {
    let amount = amount.into();
    let sign = if amount < 0 { "-" } else { "" };
    format!(
        "{sign}₱{}",
        format_num::format_num!(",.0f", amount.unsigned_abs() as f64)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_pesos() {
        assert_eq!(pesos(0), "₱0");
        assert_eq!(pesos(540), "₱540");
        assert_eq!(pesos(12500), "₱12,500");
        assert_eq!(pesos(-1020), "-₱1,020");
    }

    #[tokio::test]
    async fn test_read_optional_missing_file() {
        let dir = TempDir::new().unwrap();
        let found = read_optional(&dir.path().join("nope.json")).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_read_optional_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        write(&path, "{}").await.unwrap();
        let found = read_optional(&path).await.unwrap();
        assert_eq!(found.as_deref(), Some("{}"));
    }
}
