//! The `Booth` owns the in-memory `AppState` and the `Storage` it is persisted to. Every mutation
//! goes through it and is followed by a save.

use crate::backup::{Backup, CORRUPT, PRE_IMPORT};
use crate::debt::{debt_progress, DebtProgress};
use crate::error::{ErrorType, IntoResult, Res, Result};
use crate::ledger::{materials, transactions, SearchMode};
use crate::model::{
    AppState, BuyListItem, Material, MaterialField, Transaction, TransactionFields,
    TransactionUpdates,
};
use crate::pricing::Selection;
use crate::store::Storage;
use anyhow::Context;
use chrono::Local;
use serde::Serialize;
use tracing::{debug, info, warn};

/// The owner of the booth's state.
#[derive(Debug)]
pub struct Booth<S: Storage> {
    state: AppState,
    storage: S,
    backup: Option<Backup>,
}

impl<S: Storage> Booth<S> {
    /// Loads the state from `storage`.
    ///
    /// - Nothing stored: the defaults are used.
    /// - Stored data that cannot be parsed: a warning is logged, the data is copied to a `corrupt`
    ///   backup (when `backup` is `Some`), and the storage is reset to the defaults in place.
    ///
    /// # Errors
    /// - Returns an `Internal` error if the storage cannot be read.
    /// - Returns a `StorageWriteFailure` if resetting corrupt data fails.
    pub async fn open(storage: S, backup: Option<Backup>) -> Result<Self> {
        let stored = storage
            .read()
            .await
            .context("Unable to read the stored booth data")
            .pub_result(ErrorType::Internal)?;
        let mut booth = Self {
            state: AppState::default(),
            storage,
            backup,
        };
        let Some(blob) = stored else {
            debug!("No stored booth data, starting from defaults");
            return Ok(booth);
        };
        match AppState::from_json(&blob) {
            Ok(state) => booth.state = state,
            Err(e) => {
                warn!("The stored booth data is corrupt and will be reset to defaults: {e:#}");
                booth.backup_raw(CORRUPT, &blob).await;
                booth.save().await?;
            }
        }
        Ok(booth)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Serializes the full state to storage.
    ///
    /// # Errors
    /// Returns a `StorageWriteFailure` error if serialization or the write fails.
    pub async fn save(&self) -> Result<()> {
        self.try_save()
            .await
            .pub_result(ErrorType::StorageWriteFailure)
    }

    async fn try_save(&self) -> Res<()> {
        let json = self.state.to_json()?;
        self.storage
            .write(&json)
            .await
            .context("Unable to save the booth data")
    }

    /// Runs `f` against the state and saves. If `f` fails nothing is saved; if the save fails the
    /// state is rolled back so that memory matches storage.
    async fn mutate<T>(&mut self, f: impl FnOnce(&mut AppState) -> Result<T>) -> Result<T> {
        let prior = self.state.clone();
        let out = match f(&mut self.state) {
            Ok(out) => out,
            Err(e) => {
                self.state = prior;
                return Err(e);
            }
        };
        if let Err(e) = self.save().await {
            self.state = prior;
            return Err(e);
        }
        Ok(out)
    }

    pub async fn create_transaction(
        &mut self,
        fields: TransactionFields,
        selection: &Selection,
    ) -> Result<Transaction> {
        let transaction = self
            .mutate(|state| {
                Ok(transactions::create(
                    &mut state.transactions,
                    fields,
                    selection,
                    Local::now(),
                ))
            })
            .await?;
        info!(
            "Recorded transaction {} for {}",
            transaction.id(),
            transaction.nominee()
        );
        Ok(transaction)
    }

    /// # Errors
    /// - Returns a `NotFound` error if no transaction has `id`.
    /// - Returns a `StorageWriteFailure` error if the save fails.
    pub async fn update_transaction(
        &mut self,
        id: i64,
        updates: TransactionUpdates,
    ) -> Result<Transaction> {
        self.mutate(|state| transactions::update(&mut state.transactions, id, updates))
            .await
    }

    /// Deletes the transaction with `id`, returning whether one existed. A missing id is not an
    /// error.
    pub async fn delete_transaction(&mut self, id: i64) -> Result<bool> {
        let removed = self
            .mutate(|state| Ok(transactions::delete(&mut state.transactions, id)))
            .await?;
        if !removed {
            debug!("No transaction with id {id}, nothing deleted");
        }
        Ok(removed)
    }

    pub fn find_transaction(&self, id: i64) -> Option<&Transaction> {
        transactions::find(&self.state.transactions, id)
    }

    pub fn search(&self, query: &str, mode: SearchMode) -> Vec<&Transaction> {
        transactions::search(&self.state.transactions, query, mode)
    }

    pub fn total_revenue(&self) -> u64 {
        transactions::total_revenue(&self.state.transactions)
    }

    pub async fn set_material_quantity(
        &mut self,
        name: &str,
        field: MaterialField,
        raw: &str,
    ) -> Result<(String, Material)> {
        self.mutate(|state| materials::set_quantity(&mut state.materials, name, field, raw))
            .await
    }

    pub async fn set_material_cost(&mut self, name: &str, raw: &str) -> Result<(String, u64)> {
        self.mutate(|state| {
            materials::set_unit_cost(&mut state.material_costs, &state.materials, name, raw)
        })
        .await
    }

    pub fn buy_list(&self) -> Vec<BuyListItem> {
        materials::buy_list(&self.state.materials, &self.state.material_costs)
    }

    pub fn debt_progress(&self, goal: u64) -> DebtProgress {
        debt_progress(self.total_revenue(), goal)
    }

    /// The exact persisted document.
    pub fn export_json(&self) -> Result<String> {
        self.state.to_json().pub_result(ErrorType::Internal)
    }

    /// The transaction history as CSV, most recent first.
    pub fn export_csv(&self) -> Result<String> {
        write_csv(&self.state.transactions).pub_result(ErrorType::Internal)
    }

    /// Replaces the whole state with the document in `contents`.
    ///
    /// The document is parsed completely before anything changes. The current state is backed up
    /// (when a `Backup` was provided) and then replaced and saved. If the save fails, the prior
    /// state is restored.
    ///
    /// # Errors
    /// - Returns an `InvalidImportFile` error if `contents` is not a valid booth document. The
    ///   current state is left untouched.
    /// - Returns a `StorageWriteFailure` error if the new state cannot be saved.
    pub async fn import(&mut self, contents: &str) -> Result<()> {
        let imported = AppState::from_json(contents)
            .context("Invalid file")
            .pub_result(ErrorType::InvalidImportFile)?;
        if let Ok(current) = self.state.to_json() {
            self.backup_raw(PRE_IMPORT, &current).await;
        }
        self.mutate(|state| {
            *state = imported;
            Ok(())
        })
        .await?;
        info!(
            "Imported {} transactions",
            self.state.transactions.len()
        );
        Ok(())
    }

    /// Best-effort backup. A failure is logged and otherwise ignored.
    async fn backup_raw(&self, prefix: &str, contents: &str) {
        let Some(backup) = &self.backup else {
            return;
        };
        match backup.save(prefix, contents).await {
            Ok(path) => debug!("Saved backup to {}", path.display()),
            Err(e) => warn!("Unable to save a {prefix} backup: {e:#}"),
        }
    }
}

/// A flattened transaction for CSV output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct CsvRow<'a> {
    id: i64,
    date: &'a str,
    client: &'a str,
    nominee: &'a str,
    batch: &'a str,
    section: &'a str,
    packages: String,
    ingredients: String,
    status: &'a str,
    notes: &'a str,
    cost: u64,
}

fn write_csv(transactions: &[Transaction]) -> Res<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for t in transactions {
        writer
            .serialize(CsvRow {
                id: t.id(),
                date: t.date(),
                client: t.client(),
                nominee: t.nominee(),
                batch: t.batch(),
                section: t.section().unwrap_or_default(),
                packages: t.packages().join("; "),
                ingredients: t.ingredients().join("; "),
                status: t.status().as_str(),
                notes: t.notes().unwrap_or_default(),
                cost: t.cost(),
            })
            .context("Unable to write a CSV row")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Unable to finish the CSV output: {e}"))?;
    String::from_utf8(bytes).context("The CSV output is not valid UTF-8")
}
