//! Update command handler.

use crate::args::UpdateArgs;
use crate::commands::Out;
use crate::error::Error;
use crate::form::TransactionForm;
use crate::model::{Transaction, TransactionUpdates};
use crate::utils::pesos;
use crate::{Config, Result};

/// Updates the sale with `args.id()`.
///
/// When only text fields or the status change, those fields are merged over the stored sale and
/// its cost is left alone. When the packages, add-ons or extra option change (or `--reprice` is
/// given) the sale is loaded into an edit-mode form, the changes are applied, and the form is
/// submitted so the cost is recomputed from the configured prices. `--clear-addons` empties the
/// add-ons and reprices; `--clear-section` and `--clear-notes` remove those fields.
///
/// # Errors
/// - Returns a `NotFound` error if no sale has the id.
/// - Returns an `InvalidInput` error if a package or add-on is not in the price list.
/// - Returns a `StorageWriteFailure` error if the change cannot be saved.
pub async fn update(config: Config, args: UpdateArgs) -> Result<Out<Transaction>> {
    let mut booth = config.open_booth().await?;
    let updated = if args.reprices() {
        let existing = booth
            .find_transaction(args.id())
            .ok_or_else(|| Error::not_found(format!("Transaction not found: {}", args.id())))?;
        let mut form = TransactionForm::load(existing, config.price_list());
        apply_to_form(&mut form, &args);
        form.submit(&mut booth, config.price_list()).await?
    } else {
        booth
            .update_transaction(args.id(), field_updates(&args))
            .await?
    };
    let message = format!(
        "Updated sale {}, cost is {}",
        updated.id(),
        pesos(updated.cost())
    );
    Ok(Out::new(message, updated))
}

fn field_updates(args: &UpdateArgs) -> TransactionUpdates {
    TransactionUpdates {
        client: args.client().map(str::to_string),
        nominee: args.nominee().map(str::to_string),
        batch: args.batch().map(str::to_string),
        section: cleared_or_set(args.clear_section(), args.section()),
        status: args.status().cloned(),
        notes: cleared_or_set(args.clear_notes(), args.notes()),
        ..Default::default()
    }
}

fn cleared_or_set(clear: bool, value: Option<&str>) -> Option<Option<String>> {
    if clear {
        Some(None)
    } else {
        value.map(|v| Some(v.to_string()))
    }
}

fn apply_to_form(form: &mut TransactionForm, args: &UpdateArgs) {
    if let Some(client) = args.client() {
        form.fields.client = client.to_string();
    }
    if let Some(nominee) = args.nominee() {
        form.fields.nominee = nominee.to_string();
    }
    if let Some(batch) = args.batch() {
        form.fields.batch = batch.to_string();
    }
    if let Some(section) = cleared_or_set(args.clear_section(), args.section()) {
        form.fields.section = section;
    }
    if let Some(status) = args.status() {
        form.fields.status = status.clone();
    }
    if let Some(notes) = cleared_or_set(args.clear_notes(), args.notes()) {
        form.fields.notes = notes;
    }
    if !args.packages().is_empty() {
        form.packages = args.packages().to_vec();
    }
    if args.clear_addons() {
        form.addons.clear();
    } else if !args.addons().is_empty() {
        form.addons = args.addons().to_vec();
    }
    if let Some(extra) = args.extra() {
        form.extra = extra;
    }
}
