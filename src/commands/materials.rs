//! Material command handlers.

use crate::commands::Out;
use crate::ledger::materials::buy_list_total;
use crate::model::{BuyListItem, Material, MaterialField};
use crate::utils::pesos;
use crate::{Config, Result};
use serde::Serialize;
use std::fmt::Write;

/// The data returned by `materials show`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyList {
    pub items: Vec<BuyListItem>,
    pub total: u64,
}

/// Shows the buy list: for each material, how many units are still needed and what they will
/// cost at the recorded unit cost.
pub async fn materials_show(config: Config) -> Result<Out<BuyList>> {
    let booth = config.open_booth().await?;
    let items = booth.buy_list();
    let total = buy_list_total(&items);

    let mut message = String::from("Buy list:\n");
    for item in &items {
        let _ = writeln!(
            message,
            "{:<18} bought {:>4}  finished {:>4}  buy more {:>4}  to buy {:>4} x {} = {}",
            item.name,
            item.bought,
            item.finished,
            item.buy_more,
            item.to_buy,
            pesos(item.unit_cost),
            pesos(item.estimated_cost)
        );
    }
    let _ = write!(message, "Estimated total {}", pesos(total));
    Ok(Out::new(message, BuyList { items, total }))
}

/// Sets one quantity of one material. `value` is coerced to a whole number and never rejected.
///
/// # Errors
/// - Returns a `NotFound` error if `name` is not a tracked material.
/// - Returns a `StorageWriteFailure` error if the change cannot be saved.
pub async fn materials_set(
    config: Config,
    name: &str,
    field: MaterialField,
    value: &str,
) -> Result<Out<Material>> {
    let mut booth = config.open_booth().await?;
    let (name, material) = booth.set_material_quantity(name, field, value).await?;
    let message = format!(
        "{name}: bought {}, finished {}, buy more {}, to buy {}",
        material.bought(),
        material.finished(),
        material.buy_more(),
        material.to_buy()
    );
    Ok(Out::new(message, material))
}

/// Sets the unit cost of one material, coerced the same way as `materials_set`.
pub async fn materials_cost(config: Config, name: &str, value: &str) -> Result<Out<u64>> {
    let mut booth = config.open_booth().await?;
    let (name, cost) = booth.set_material_cost(name, value).await?;
    Ok(Out::new(
        format!("{name} now costs {} per unit", pesos(cost)),
        cost,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_oil_buy_list() {
        let env = TestEnv::new().await;
        materials_set(env.config(), "Oil", MaterialField::Bought, "5")
            .await
            .unwrap();
        materials_set(env.config(), "oil", MaterialField::Finished, "20")
            .await
            .unwrap();
        materials_set(env.config(), "Oil", MaterialField::BuyMore, "2abc")
            .await
            .unwrap();
        let out = materials_cost(env.config(), "Oil", "60").await.unwrap();
        assert_eq!(out.data(), &60);

        let out = materials_show(env.config()).await.unwrap();
        let list = out.data();
        let oil = &list.items[0];
        assert_eq!(oil.name, "Oil");
        assert_eq!(oil.to_buy, 17);
        assert_eq!(oil.estimated_cost, 1020);
        assert_eq!(list.total, 1020);
        assert!(out.message().contains("Estimated total ₱1,020"));
    }

    #[tokio::test]
    async fn test_negative_value_counts_as_zero() {
        let env = TestEnv::new().await;
        let out = materials_set(env.config(), "Milk", MaterialField::Finished, "-4")
            .await
            .unwrap();
        assert_eq!(out.data().finished(), 0);
    }

    #[tokio::test]
    async fn test_unknown_material() {
        let env = TestEnv::new().await;
        let err = materials_cost(env.config(), "Glue", "5").await.unwrap_err();
        assert_eq!(err.error_type(), ErrorType::NotFound);
    }
}
