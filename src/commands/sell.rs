//! Records a sale.

use crate::args::SellArgs;
use crate::commands::Out;
use crate::form::TransactionForm;
use crate::model::{Transaction, TransactionFields};
use crate::utils::pesos;
use crate::{Config, Result};

/// Records a sale from `args` through a create-mode form, so the cost is the live total of the
/// selection at the configured prices.
///
/// # Errors
/// - Returns an `InvalidInput` error if a package or add-on is not in the price list.
/// - Returns a `StorageWriteFailure` error if the sale cannot be saved.
pub async fn sell(config: Config, args: SellArgs) -> Result<Out<Transaction>> {
    let mut booth = config.open_booth().await?;
    let mut form = TransactionForm::new();
    form.fields = TransactionFields {
        client: args.client().to_string(),
        nominee: args.nominee().to_string(),
        batch: args.batch().to_string(),
        section: args.section().map(str::to_string),
        status: args.status().clone(),
        notes: args.notes().map(str::to_string),
    };
    form.packages = args.selection().packages().to_vec();
    form.addons = args.selection().addons().to_vec();
    form.extra = args.selection().extra();

    let transaction = form.submit(&mut booth, config.price_list()).await?;
    let message = format!(
        "Recorded sale {} from {} to {}: {} for {}",
        transaction.id(),
        transaction.client(),
        transaction.nominee(),
        transaction.package_display(),
        pesos(transaction.cost())
    );
    Ok(Out::new(message, transaction))
}
