//! Configuration file handling for the booth.
//!
//! The configuration file is stored at `$BOOTH_HOME/config.json` and contains settings for the
//! booth including the price list, the fundraising goal, pagination, reminders and backups.

use crate::backup::Backup;
use crate::booth::Booth;
use crate::debt::DEFAULT_DEBT_GOAL;
use crate::error::{ErrorType, IntoResult, Res, Result};
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::pricing::PriceList;
use crate::reminder::ReminderSettings;
use crate::store::FileStorage;
use crate::utils;
use anyhow::{bail, ensure, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "booth";
const CONFIG_VERSION: u8 = 1;
const BACKUP_COPIES: u32 = 5;
const BACKUPS: &str = ".backups";
const CONFIG_JSON: &str = "config.json";
const DATA_JSON: &str = "booth_data.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$BOOTH_HOME` and from there it loads `$BOOTH_HOME/config.json`. It provides paths
/// to other items that are either configurable or are expected in a certain location within the
/// booth home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    backups: PathBuf,
    config_path: PathBuf,
    data_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the booth home directory, its backups directory, an initial `config.json` with
    /// default settings, and a data file holding the default state.
    ///
    /// # Errors
    /// - Returns a `Config` error if `dir` already holds a `config.json`.
    /// - Returns an error if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        Self::create_inner(dir.into())
            .await
            .pub_result(ErrorType::Config)
    }

    async fn create_inner(maybe_relative: PathBuf) -> Res<Self> {
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the booth home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "The booth home is already initialized, found '{}'",
                config_path.display()
            );
        }

        let backups = root.join(BACKUPS);
        utils::make_dir(&backups).await?;

        let config_file = ConfigFile::default();
        config_file.save(&config_path).await?;

        let config = Self::from_parts(root, config_path, config_file);
        if !config.data_path.exists() {
            let storage = config.storage();
            Booth::open(storage, None)
                .await
                .context("Unable to open the booth data file")?
                .save()
                .await
                .context("Unable to write the initial booth data file")?;
        }
        Ok(config)
    }

    /// This will
    /// - validate that `booth_home` exists and that the config file exists
    /// - load and validate the config file
    /// - validate that the backups directory exists
    /// - return the loaded configuration object
    ///
    /// # Errors
    /// Returns a `Config` error if any of the above fails.
    pub async fn load(booth_home: impl Into<PathBuf>) -> Result<Self> {
        Self::load_inner(booth_home.into())
            .await
            .pub_result(ErrorType::Config)
    }

    async fn load_inner(maybe_relative: PathBuf) -> Res<Self> {
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("The booth home is missing, run 'booth init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;
        let config = Self::from_parts(root, config_path, config_file);

        if !config.backups.is_dir() {
            bail!(
                "The backups directory is missing '{}'",
                config.backups.display()
            )
        }
        Ok(config)
    }

    fn from_parts(root: PathBuf, config_path: PathBuf, config_file: ConfigFile) -> Self {
        let data_path = match &config_file.data_path {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => root.join(p),
            None => root.join(DATA_JSON),
        };
        Self {
            backups: root.join(BACKUPS),
            root,
            config_path,
            data_path,
            config_file,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn backups(&self) -> &Path {
        &self.backups
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn backup_copies(&self) -> u32 {
        self.config_file.backup_copies
    }

    pub fn page_size(&self) -> usize {
        self.config_file.page_size
    }

    pub fn debt_goal(&self) -> u64 {
        self.config_file.debt_goal
    }

    pub fn price_list(&self) -> &PriceList {
        &self.config_file.price_list
    }

    pub fn reminder(&self) -> &ReminderSettings {
        &self.config_file.reminder
    }

    /// Creates a new `Backup` instance for managing backup files.
    pub fn backup(&self) -> Backup {
        Backup::new(&self.backups, self.backup_copies())
    }

    /// The storage slot for the booth data file.
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.data_path)
    }

    /// Loads the booth state from the data file, with backups enabled.
    pub async fn open_booth(&self) -> Result<Booth<FileStorage>> {
        Booth::open(self.storage(), Some(self.backup())).await
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "booth",
///   "config_version": 1,
///   "backup_copies": 5,
///   "page_size": 7,
///   "debt_goal": 10000,
///   "reminder": { "interval_minutes": 10, "message": "Time to check the supplies!" },
///   "price_list": {
///     "packages": [{ "name": "Single Hit", "price": 50 }],
///     "addons": [{ "name": "Mayo", "price": 15 }],
///     "extra": { "label": "Garlic Clove", "surcharge": 20 }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "booth"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Number of backup copies to keep per kind of backup
    #[serde(default = "default_backup_copies")]
    backup_copies: u32,

    /// Transactions shown per page by `list`
    #[serde(default = "default_page_size")]
    page_size: usize,

    /// The fundraising goal that revenue is measured against
    #[serde(default = "default_debt_goal")]
    debt_goal: u64,

    #[serde(default)]
    reminder: ReminderSettings,

    #[serde(default)]
    price_list: PriceList,

    /// Path to the data file (optional, relative to the booth home or absolute)
    /// Defaults to $BOOTH_HOME/booth_data.json if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_path: Option<PathBuf>,
}

fn default_backup_copies() -> u32 {
    BACKUP_COPIES
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_debt_goal() -> u64 {
    DEFAULT_DEBT_GOAL
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            backup_copies: BACKUP_COPIES,
            page_size: DEFAULT_PAGE_SIZE,
            debt_goal: DEFAULT_DEBT_GOAL,
            reminder: ReminderSettings::default(),
            price_list: PriceList::default(),
            data_path: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or fails validation
    async fn load(path: impl AsRef<Path>) -> Res<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)
            .await
            .with_context(|| format!("Failed to load config file at {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Res<()> {
        ensure!(
            self.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            self.app_name
        );
        ensure!(
            self.config_version == CONFIG_VERSION,
            "Unsupported config_version {}, expected {}",
            self.config_version,
            CONFIG_VERSION
        );
        ensure!(self.page_size >= 1, "page_size must be at least 1");
        ensure!(
            self.reminder.interval_minutes >= 1,
            "reminder.interval_minutes must be at least 1"
        );
        Ok(())
    }

    /// Saves the ConfigFile to the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    async fn save(&self, path: impl AsRef<Path>) -> Res<()> {
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(path.as_ref(), data)
            .await
            .context("Unable to write config file")
    }
}
