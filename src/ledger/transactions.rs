//! Operations over the transaction list.

use crate::error::{Error, Result};
use crate::model::{Transaction, TransactionFields, TransactionUpdates};
use crate::pricing::{quote, Selection};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which field(s) a search query is matched against.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Match the client or the nominee.
    #[default]
    Name,
    Batch,
    Status,
}

serde_plain::derive_display_from_serialize!(SearchMode);
serde_plain::derive_fromstr_from_deserialize!(SearchMode);

/// Creates a transaction from the form fields and the current selection and puts it at the front
/// of `transactions`.
///
/// The id is the creation time in milliseconds. If that would collide with, or sort before, an
/// existing id (two creates within the same millisecond, or a clock that moved backwards) the next
/// integer above the largest existing id is used instead. When the largest id is already
/// `i64::MAX` the lowest free id at or above the creation time is taken.
pub fn create(
    transactions: &mut Vec<Transaction>,
    fields: TransactionFields,
    selection: &Selection,
    now: DateTime<Local>,
) -> Transaction {
    let id = next_id(transactions, now.timestamp_millis());
    let TransactionFields {
        client,
        nominee,
        batch,
        section,
        status,
        notes,
    } = fields;
    let transaction = Transaction {
        id,
        date: now.format("%-m/%-d/%Y").to_string(),
        client,
        nominee,
        batch,
        section,
        packages: selection.package_labels(),
        ingredients: selection.ingredients(),
        status,
        notes,
        cost: quote(selection).total,
    };
    transactions.insert(0, transaction.clone());
    transaction
}

/// Merges `updates` over the transaction with `id`, in place.
///
/// # Errors
/// Returns a `NotFound` error if no transaction has `id`.
pub fn update(
    transactions: &mut [Transaction],
    id: i64,
    updates: TransactionUpdates,
) -> Result<Transaction> {
    let transaction = transactions
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| Error::not_found(format!("Transaction not found: {id}")))?;
    transaction.apply(updates);
    Ok(transaction.clone())
}

/// Removes the transaction with `id`. Returns whether one was removed; a missing id is not an
/// error.
pub fn delete(transactions: &mut Vec<Transaction>, id: i64) -> bool {
    let before = transactions.len();
    transactions.retain(|t| t.id != id);
    transactions.len() != before
}

pub fn find(transactions: &[Transaction], id: i64) -> Option<&Transaction> {
    transactions.iter().find(|t| t.id == id)
}

/// Case-insensitive substring search. An empty query returns everything, in order.
pub fn search<'a>(
    transactions: &'a [Transaction],
    query: &str,
    mode: SearchMode,
) -> Vec<&'a Transaction> {
    if query.is_empty() {
        return transactions.iter().collect();
    }
    let query = query.to_lowercase();
    let contains = |field: &str| field.to_lowercase().contains(&query);
    transactions
        .iter()
        .filter(|t| match mode {
            SearchMode::Name => contains(&t.client) || contains(&t.nominee),
            SearchMode::Batch => contains(&t.batch),
            SearchMode::Status => contains(t.status.as_str()),
        })
        .collect()
}

/// The sum of `cost` over every transaction, saturating at `u64::MAX`.
pub fn total_revenue(transactions: &[Transaction]) -> u64 {
    transactions
        .iter()
        .map(|t| t.cost)
        .fold(0, u64::saturating_add)
}

fn next_id(transactions: &[Transaction], now_ms: i64) -> i64 {
    match transactions.iter().map(|t| t.id).max() {
        Some(max) if max >= now_ms => max
            .checked_add(1)
            .unwrap_or_else(|| lowest_free_id(transactions, now_ms)),
        _ => now_ms,
    }
}

/// Scans upward from `from`, wrapping to 0, for an id no transaction holds.
fn lowest_free_id(transactions: &[Transaction], from: i64) -> i64 {
    let used: HashSet<i64> = transactions.iter().map(|t| t.id).collect();
    (from..=i64::MAX)
        .chain(0..from)
        .find(|id| !used.contains(id))
        .unwrap_or(from)
}
