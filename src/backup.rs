//! Backup management for snapshots taken before destructive operations.

use crate::error::Res;
use crate::utils;
use anyhow::Context;
use chrono::Local;
use std::path::PathBuf;

/// Prefix for snapshots of the state taken right before an import replaces it.
pub const PRE_IMPORT: &str = "pre-import";

/// Prefix for copies of stored data that could not be parsed and was reset to defaults.
pub const CORRUPT: &str = "corrupt";

const EXTENSION: &str = "json";

/// Manages backup file creation and rotation.
///
/// The `Backup` struct is immutable and owns copies of the paths and settings it needs.
/// Create a new instance via `Config::backup()` or `Backup::new()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backup {
    backups_dir: PathBuf,
    backup_copies: u32,
}

impl Backup {
    pub fn new(backups_dir: impl Into<PathBuf>, backup_copies: u32) -> Self {
        Self {
            backups_dir: backups_dir.into(),
            backup_copies,
        }
    }

    /// Saves `contents` as a backup file.
    ///
    /// The filename format is `{prefix}.YYYY-MM-DD-NNN.json` where NNN is a sequence number.
    /// Automatically rotates old backups, keeping only `backup_copies` files per prefix.
    ///
    /// Returns the path to the created backup file.
    pub async fn save(&self, prefix: &str, contents: &str) -> Res<PathBuf> {
        let date = today();
        let seq = self.next_sequence_number(prefix, &date).await?;
        let filename = format!("{prefix}.{date}-{seq:03}.{EXTENSION}");
        let path = self.backups_dir.join(&filename);

        utils::write(&path, contents)
            .await
            .with_context(|| format!("Unable to save the {prefix} backup"))?;

        self.rotate(prefix).await?;

        Ok(path)
    }

    /// Scans the backups directory for existing files with the given prefix and date,
    /// and returns the next sequence number.
    async fn next_sequence_number(&self, prefix: &str, date: &str) -> Res<u32> {
        let mut max_seq: u32 = 0;
        for name in self.file_names().await? {
            if let Some(seq) = parse_sequence_number(&name, prefix, date) {
                max_seq = max_seq.max(seq);
            }
        }
        Ok(max_seq + 1)
    }

    /// Rotates old backup files, keeping only `backup_copies` files with the given prefix.
    async fn rotate(&self, prefix: &str) -> Res<()> {
        let mut files: Vec<String> = self
            .file_names()
            .await?
            .into_iter()
            .filter(|name| is_backup_file(name, prefix))
            .collect();

        // Sort by filename (which sorts by date and sequence number due to format)
        files.sort();

        let to_delete = files.len().saturating_sub(self.backup_copies as usize);
        for name in files.into_iter().take(to_delete) {
            utils::remove(self.backups_dir.join(name)).await?;
        }

        Ok(())
    }

    async fn file_names(&self) -> Res<Vec<String>> {
        let mut names = Vec::new();
        let mut dir = utils::read_dir(&self.backups_dir).await?;
        while let Some(entry) = dir
            .next_entry()
            .await
            .context("Failed to read directory entry")?
        {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        Ok(names)
    }
}

/// Returns today's date in YYYY-MM-DD format.
fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Parses the sequence number from a backup filename.
/// Returns None if the filename doesn't match the expected pattern.
fn parse_sequence_number(filename: &str, prefix: &str, date: &str) -> Option<u32> {
    let remainder = filename.strip_prefix(&format!("{prefix}.{date}-"))?;
    let seq_str = remainder.strip_suffix(&format!(".{EXTENSION}"))?;
    seq_str.parse().ok()
}

/// Checks if a filename is a backup file with the given prefix.
fn is_backup_file(filename: &str, prefix: &str) -> bool {
    filename.starts_with(&format!("{prefix}.")) && filename.ends_with(&format!(".{EXTENSION}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_sequence_number() {
        assert_eq!(
            parse_sequence_number("pre-import.2025-12-14-001.json", "pre-import", "2025-12-14"),
            Some(1)
        );
        assert_eq!(
            parse_sequence_number("corrupt.2025-12-14-042.json", "corrupt", "2025-12-14"),
            Some(42)
        );
        // Wrong prefix
        assert_eq!(
            parse_sequence_number("corrupt.2025-12-14-001.json", "pre-import", "2025-12-14"),
            None
        );
        // Wrong date
        assert_eq!(
            parse_sequence_number("corrupt.2025-12-13-001.json", "corrupt", "2025-12-14"),
            None
        );
    }

    #[test]
    fn test_is_backup_file() {
        assert!(is_backup_file("pre-import.2025-12-14-001.json", "pre-import"));
        assert!(is_backup_file("corrupt.2025-12-14-001.json", "corrupt"));
        assert!(!is_backup_file("corrupt.2025-12-14-001.json", "pre-import"));
        assert!(!is_backup_file("corrupt.2025-12-14-001.txt", "corrupt"));
    }

    #[tokio::test]
    async fn test_save_and_rotate() {
        let dir = TempDir::new().unwrap();
        let backup = Backup::new(dir.path(), 2);

        let first = backup.save(PRE_IMPORT, "1").await.unwrap();
        let second = backup.save(PRE_IMPORT, "2").await.unwrap();
        let third = backup.save(PRE_IMPORT, "3").await.unwrap();
        backup.save(CORRUPT, "bad").await.unwrap();

        assert!(!first.exists());
        assert_eq!(utils::read(&second).await.unwrap(), "2");
        assert_eq!(utils::read(&third).await.unwrap(), "3");
        assert!(third
            .file_name()
            .unwrap()
            .to_string_lossy()
            .ends_with("-003.json"));

        let names = backup.file_names().await.unwrap();
        assert_eq!(names.len(), 3);
        assert_eq!(
            names.iter().filter(|n| is_backup_file(n, CORRUPT)).count(),
            1
        );
    }
}
