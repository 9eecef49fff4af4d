//! Types that represent the core data model, such as `Transaction`, `Material` and the persisted
//! `AppState` aggregate.
mod material;
mod transaction;

pub use material::{
    coerce_quantity, BuyListItem, Material, MaterialCosts, MaterialField, Materials, CATALOG,
};
pub use transaction::{Status, Transaction, TransactionFields, TransactionUpdates};

use crate::error::Res;
use anyhow::{ensure, Context};
use material::LenientQuantity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the booth persists.
///
/// Example document:
/// ```json
/// {
///   "transactions": [
///     {
///       "id": 1760771234567,
///       "date": "10/18/2025",
///       "client": "Ana",
///       "nominee": "Ben",
///       "batch": "2026",
///       "section": "Rizal",
///       "packages": ["Single Hit"],
///       "ingredients": ["Mayo", "Garlic Clove"],
///       "status": "Chase",
///       "notes": "",
///       "cost": 135
///     }
///   ],
///   "materials": { "Oil": { "bought": 5, "finished": 20, "buyMore": 2 } },
///   "materialCosts": { "Oil": 60 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Most recent first.
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) materials: Materials,
    pub(crate) material_costs: MaterialCosts,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            materials: material::default_materials(),
            material_costs: material::default_costs(),
        }
    }
}

impl AppState {
    /// Parses a stored document and merges it over the defaults.
    ///
    /// - `transactions` replaces the default (empty) list entirely.
    /// - `materials` and `materialCosts` are merged key by key. Stored values win, defaults fill
    ///   the gaps, so documents written before a material was added to the catalog still load.
    ///
    /// # Errors
    /// Returns an error if `json` is not a JSON object or does not match the schema.
    pub fn from_json(json: &str) -> Res<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).context("The data is not valid JSON")?;
        ensure!(
            value.is_object(),
            "Expected a JSON object with transactions, materials and materialCosts"
        );
        let stored: StoredState =
            serde_json::from_value(value).context("The data does not match the booth schema")?;
        Ok(Self::merge_with_defaults(stored))
    }

    /// Serializes the full state in the persisted format.
    pub fn to_json(&self) -> Res<String> {
        serde_json::to_string(self).context("Unable to serialize the booth state")
    }

    pub(crate) fn merge_with_defaults(stored: StoredState) -> Self {
        let mut state = Self::default();
        state.transactions = stored.transactions.unwrap_or_default();
        if let Some(materials) = stored.materials {
            state.materials.extend(materials);
        }
        if let Some(costs) = stored.material_costs {
            state
                .material_costs
                .extend(costs.into_iter().map(|(name, cost)| (name, cost.0)));
        }
        state
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn materials(&self) -> &Materials {
        &self.materials
    }

    /// The unit cost of `name`, or `0` when none is recorded.
    pub fn unit_cost(&self, name: &str) -> u64 {
        self.material_costs.get(name).copied().unwrap_or_default()
    }
}

/// The shape of a stored document. Every key is optional so that partial or older documents can
/// be merged with the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredState {
    #[serde(default)]
    transactions: Option<Vec<Transaction>>,
    #[serde(default)]
    materials: Option<BTreeMap<String, Material>>,
    #[serde(default)]
    material_costs: Option<BTreeMap<String, LenientQuantity>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> AppState {
        let mut state = AppState::default();
        state.transactions = vec![serde_json::from_str(
            r#"{"id": 2, "date": "1/2/2025", "client": "Ana", "nominee": "Ben",
                "batch": "2026", "section": "Rizal", "packages": ["Single Hit"],
                "ingredients": ["Mayo"], "status": "Chase", "notes": "fast", "cost": 65}"#,
        )
        .unwrap()];
        state.materials.insert("Oil".into(), Material::new(5, 20, 2));
        state.material_costs.insert("Oil".into(), 60);
        state
    }

    #[test]
    fn test_round_trip() {
        let state = sample_state();
        let json = state.to_json().unwrap();
        let loaded = AppState::from_json(&json).unwrap();
        assert_eq!(state, loaded);
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let loaded = AppState::from_json("{}").unwrap();
        assert_eq!(loaded, AppState::default());
    }

    #[test]
    fn test_materials_merge_key_by_key() {
        let json = r#"{
            "transactions": null,
            "materials": { "Oil": { "bought": 3, "finished": 9, "buyMore": 0 } },
            "materialCosts": { "Oil": 75 }
        }"#;
        let loaded = AppState::from_json(json).unwrap();
        assert!(loaded.transactions().is_empty());
        assert_eq!(loaded.materials()["Oil"], Material::new(3, 9, 0));
        assert_eq!(loaded.unit_cost("Oil"), 75);
        // Materials the document did not mention keep their defaults.
        assert_eq!(loaded.materials()["Mustard"], Material::default());
        assert_eq!(loaded.unit_cost("Mustard"), 50);
        assert_eq!(loaded.materials().len(), CATALOG.len());
    }

    #[test]
    fn test_older_document_without_newer_materials() {
        let json = r#"{
            "transactions": [{"id": 1, "client": "A", "nominee": "B", "batch": "C",
                              "package": "Single Hit", "status": "Bailed", "cost": 50}],
            "materials": { "Oil": { "bought": 1, "finished": 2, "buyMore": 3 } },
            "materialCosts": { "Oil": 50, "Flour": 30 }
        }"#;
        let loaded = AppState::from_json(json).unwrap();
        assert_eq!(loaded.transactions()[0].packages(), &["Single Hit".to_string()]);
        assert!(loaded.materials().contains_key("Laundry Detergent"));
        assert_eq!(loaded.unit_cost("Laundry Detergent"), 40);
    }

    #[test]
    fn test_unknown_stored_material_is_kept() {
        let json = r#"{ "materials": { "Glitter": { "bought": 1 } }, "materialCosts": { "Glitter": "15" } }"#;
        let loaded = AppState::from_json(json).unwrap();
        assert_eq!(loaded.materials()["Glitter"], Material::new(1, 0, 0));
        assert_eq!(loaded.unit_cost("Glitter"), 15);
    }

    #[test]
    fn test_rejects_non_objects() {
        assert!(AppState::from_json("[]").is_err());
        assert!(AppState::from_json("null").is_err());
        assert!(AppState::from_json("\"hello\"").is_err());
        assert!(AppState::from_json("{ not json").is_err());
        assert!(AppState::from_json(r#"{"transactions": "nope"}"#).is_err());
    }

    #[test]
    fn test_serialized_keys() {
        let json = AppState::default().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["transactions"].is_array());
        assert!(value["materials"]["Oil"]["buyMore"].is_u64());
        assert_eq!(value["materialCosts"]["Oil"], 50);
    }
}
