use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Creates the booth home directory, its backups directory, an initial `config.json` with default
/// settings and a data file holding the default state.
///
/// # Arguments
/// - `booth_home` - The directory that will be the root of the booth home, e.g. `$HOME/booth`
///
/// # Errors
/// - Returns an error if the directory is already initialized or any file operations fail.
pub async fn init(booth_home: &Path) -> Result<Out<PathBuf>> {
    let config = Config::create(booth_home)
        .await
        .map_err(anyhow::Error::from)
        .context("Unable to create the booth home and config")
        .pub_result(ErrorType::Config)?;
    let root = config.root().to_path_buf();
    Ok(Out::new(
        format!("Successfully created the booth home at {}", root.display()),
        root,
    ))
}
