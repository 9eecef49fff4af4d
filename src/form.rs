//! The in-progress transaction form. It is either creating a new transaction or editing an
//! existing one, and returns to an empty create form after a submit or a cancel.

use crate::booth::Booth;
use crate::error::Result;
use crate::model::{Transaction, TransactionFields, TransactionUpdates};
use crate::pricing::{quote, PriceList, Quote, Selection};
use crate::store::Storage;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    /// Bound to the id of the transaction being edited.
    Edit(i64),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    mode: FormMode,
    pub fields: TransactionFields,
    /// Selected package names.
    pub packages: Vec<String>,
    /// Selected add-on names.
    pub addons: Vec<String>,
    pub extra: bool,
}

impl TransactionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Loads `transaction` into the form for editing. Stored ingredients are mapped back to add-on
    /// selections and the extra option, and stored package labels to package selections. Labels
    /// that no longer match the price list are dropped with a warning.
    pub fn load(transaction: &Transaction, prices: &PriceList) -> Self {
        let mut packages = Vec::new();
        for label in transaction.packages() {
            match prices.match_package(label) {
                Some(package) => packages.push(package.name.clone()),
                None => warn!(
                    "Package '{label}' of transaction {} is not in the price list and was dropped",
                    transaction.id()
                ),
            }
        }

        let mut addons = Vec::new();
        let mut extra = false;
        for ingredient in transaction.ingredients() {
            if ingredient.eq_ignore_ascii_case(&prices.extra.label) {
                extra = true;
            } else if let Some(addon) = prices.match_addon(ingredient) {
                addons.push(addon.name.clone());
            } else {
                warn!(
                    "Ingredient '{ingredient}' of transaction {} is not in the price list and was \
                    dropped",
                    transaction.id()
                );
            }
        }

        Self {
            mode: FormMode::Edit(transaction.id()),
            fields: TransactionFields {
                client: transaction.client().to_string(),
                nominee: transaction.nominee().to_string(),
                batch: transaction.batch().to_string(),
                section: transaction.section().map(str::to_string),
                status: transaction.status().clone(),
                notes: transaction.notes().map(str::to_string),
            },
            packages,
            addons,
            extra,
        }
    }

    /// Resolves the selected names against `prices`.
    pub fn selection(&self, prices: &PriceList) -> Result<Selection> {
        prices.select(&self.packages, &self.addons, self.extra)
    }

    /// The live total of the current selection.
    pub fn quote(&self, prices: &PriceList) -> Result<Quote> {
        Ok(quote(&self.selection(prices)?))
    }

    /// Creates or updates a transaction from the form. In edit mode every field is written along
    /// with the recomputed cost. The form is cleared only when the submit succeeds.
    pub async fn submit<S: Storage>(
        &mut self,
        booth: &mut Booth<S>,
        prices: &PriceList,
    ) -> Result<Transaction> {
        let selection = self.selection(prices)?;
        let transaction = match self.mode {
            FormMode::Create => {
                booth
                    .create_transaction(self.fields.clone(), &selection)
                    .await?
            }
            FormMode::Edit(id) => {
                let fields = self.fields.clone();
                let updates = TransactionUpdates {
                    client: Some(fields.client),
                    nominee: Some(fields.nominee),
                    batch: Some(fields.batch),
                    section: Some(fields.section),
                    packages: Some(selection.package_labels()),
                    ingredients: Some(selection.ingredients()),
                    status: Some(fields.status),
                    notes: Some(fields.notes),
                    cost: Some(quote(&selection).total),
                };
                booth.update_transaction(id, updates).await?
            }
        };
        debug!("Submitted form for transaction {}", transaction.id());
        self.cancel();
        Ok(transaction)
    }

    /// Clears the form and returns it to create mode.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }
}
