//! Export and import of the booth data.

use crate::args::{ExportArgs, ExportFormat, ImportArgs};
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{utils, Config, Result};
use anyhow::Context;
use serde::Serialize;
use std::path::PathBuf;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// The data returned by `export`.
#[derive(Debug, Clone, Serialize)]
pub struct Exported {
    pub format: ExportFormat,
    /// `None` when written to stdout.
    pub path: Option<PathBuf>,
    pub bytes: usize,
}

/// Writes the booth data to `args.output()`, or to stdout when no output is given.
///
/// The `json` format is exactly the stored document and can be imported again. The `csv` format
/// holds the sales only.
pub async fn export(config: Config, args: ExportArgs) -> Result<Out<Exported>> {
    let booth = config.open_booth().await?;
    let contents = match args.format() {
        ExportFormat::Json => booth.export_json()?,
        ExportFormat::Csv => booth.export_csv()?,
    };

    let message = match args.output() {
        Some(path) => {
            utils::write(path, &contents)
                .await
                .pub_result(ErrorType::Internal)?;
            format!("Exported the booth data to {}", path.display())
        }
        None => {
            write_to(&mut tokio::io::stdout(), &contents).await?;
            String::from("Exported the booth data to stdout")
        }
    };
    Ok(Out::new(
        message,
        Exported {
            format: args.format(),
            path: args.output().map(|p| p.to_path_buf()),
            bytes: contents.len(),
        },
    ))
}

/// Writes and flushes `contents`. Both steps must succeed for the export to count.
async fn write_to<W>(writer: &mut W, contents: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer
        .write_all(contents.as_bytes())
        .await
        .context("Unable to write the export")
        .pub_result(ErrorType::Internal)?;
    writer
        .flush()
        .await
        .context("Unable to flush the export")
        .pub_result(ErrorType::Internal)
}

/// Replaces the booth data with the file at `args.path()`.
///
/// The file is parsed completely before anything changes, and the current data is backed up to
/// `.backups/pre-import.*.json` first.
///
/// # Errors
/// - Returns an `InvalidImportFile` error if the file cannot be read or is not a valid booth
///   document. The current data is left untouched.
/// - Returns a `StorageWriteFailure` error if the imported data cannot be saved.
pub async fn import(config: Config, args: ImportArgs) -> Result<Out<usize>> {
    let contents = utils::read(args.path())
        .await
        .pub_result(ErrorType::InvalidImportFile)?;
    let mut booth = config.open_booth().await?;
    booth.import(&contents).await?;
    let count = booth.state().transactions().len();
    Ok(Out::new(
        format!(
            "Imported {count} sale{} from {}",
            if count == 1 { "" } else { "s" },
            args.path().display()
        ),
        count,
    ))
}
