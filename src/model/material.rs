use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// The materials the booth tracks, in display order, with their default unit cost.
pub const CATALOG: &[(&str, u64)] = &[
    ("Oil", 50),
    ("Flour", 30),
    ("Laundry Detergent", 40),
    ("Soy Sauce", 30),
    ("Fish Sauce", 30),
    ("Cooking Oil", 50),
    ("Milk", 50),
    ("Whipped Cream", 50),
    ("Confetti", 30),
    ("Ketchup", 50),
    ("Mayo", 50),
    ("Mustard", 50),
];

/// Material quantities keyed by material name.
pub type Materials = BTreeMap<String, Material>;

/// Unit costs keyed by material name.
pub type MaterialCosts = BTreeMap<String, u64>;

/// The tracked quantities for one material. Purchase recommendations are derived from these and
/// are never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    /// Units already purchased.
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub(crate) bought: u64,
    /// Units required for finished goods.
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub(crate) finished: u64,
    /// A manual buffer on top of what is required.
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub(crate) buy_more: u64,
}

impl Material {
    pub fn new(bought: u64, finished: u64, buy_more: u64) -> Self {
        Self {
            bought,
            finished,
            buy_more,
        }
    }

    pub fn bought(&self) -> u64 {
        self.bought
    }

    pub fn finished(&self) -> u64 {
        self.finished
    }

    pub fn buy_more(&self) -> u64 {
        self.buy_more
    }

    /// `max(0, finished - bought) + buy_more`
    pub fn to_buy(&self) -> u64 {
        self.finished
            .saturating_sub(self.bought)
            .saturating_add(self.buy_more)
    }

    pub fn estimated_cost(&self, unit_cost: u64) -> u64 {
        self.to_buy().saturating_mul(unit_cost)
    }

    pub(crate) fn set(&mut self, field: MaterialField, value: u64) {
        match field {
            MaterialField::Bought => self.bought = value,
            MaterialField::Finished => self.finished = value,
            MaterialField::BuyMore => self.buy_more = value,
        }
    }
}

/// The editable quantity fields of a `Material`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum MaterialField {
    Bought,
    Finished,
    BuyMore,
}

serde_plain::derive_display_from_serialize!(MaterialField);
serde_plain::derive_fromstr_from_deserialize!(MaterialField);

/// One row of the buy list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyListItem {
    pub name: String,
    pub unit_cost: u64,
    pub bought: u64,
    pub finished: u64,
    pub buy_more: u64,
    pub to_buy: u64,
    pub estimated_cost: u64,
}

/// The default quantities: every catalog material at zero.
pub(crate) fn default_materials() -> Materials {
    CATALOG
        .iter()
        .map(|(name, _)| (name.to_string(), Material::default()))
        .collect()
}

pub(crate) fn default_costs() -> MaterialCosts {
    CATALOG
        .iter()
        .map(|(name, cost)| (name.to_string(), *cost))
        .collect()
}

/// Coerces user input into a non-negative integer the way a browser's `parseInt` would, except
/// that anything negative or unparseable becomes `0`. Never fails.
///
/// - `"12"` -> `12`
/// - `" 7 units"` -> `7`
/// - `"3.9"` -> `3`
/// - `"-5"` -> `0`
/// - `"abc"` -> `0`
pub fn coerce_quantity(input: &str) -> u64 {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if negative || digits.is_empty() {
        return 0;
    }
    // Too many digits for a u64 saturates.
    digits.parse().unwrap_or(u64::MAX)
}

/// Coerces an arbitrary JSON value into a quantity. Older saves may hold negative numbers, floats
/// or strings where a count is expected.
pub(crate) fn coerce_json_quantity(value: &serde_json::Value) -> u64 {
    match value {
        serde_json::Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u
            } else if let Some(f) = n.as_f64() {
                if f.is_finite() && f > 0.0 {
                    f.trunc() as u64
                } else {
                    0
                }
            } else {
                0
            }
        }
        serde_json::Value::String(s) => coerce_quantity(s),
        _ => 0,
    }
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_json_quantity(&value))
}

/// A quantity that deserializes leniently, used for the values of the stored cost map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct LenientQuantity(pub(crate) u64);

impl<'de> Deserialize<'de> for LenientQuantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        lenient_quantity(deserializer).map(LenientQuantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_to_buy_scenario() {
        let oil = Material::new(5, 20, 2);
        assert_eq!(oil.to_buy(), 17);
        assert_eq!(oil.estimated_cost(60), 1020);
    }

    #[test]
    fn test_to_buy_never_negative() {
        for bought in [0, 1, 5, 20, 100, u64::MAX] {
            for finished in [0, 1, 5, 20, 100, u64::MAX] {
                for buy_more in [0, 1, 3] {
                    let m = Material::new(bought, finished, buy_more);
                    let expected = finished.saturating_sub(bought).saturating_add(buy_more);
                    assert_eq!(m.to_buy(), expected);
                    assert!(m.to_buy() >= buy_more);
                }
            }
        }
    }

    #[test]
    fn test_overbought_only_counts_buffer() {
        let m = Material::new(30, 10, 4);
        assert_eq!(m.to_buy(), 4);
    }

    #[test]
    fn test_coerce_quantity() {
        assert_eq!(coerce_quantity("12"), 12);
        assert_eq!(coerce_quantity("  7 units"), 7);
        assert_eq!(coerce_quantity("3.9"), 3);
        assert_eq!(coerce_quantity("+4"), 4);
        assert_eq!(coerce_quantity("-5"), 0);
        assert_eq!(coerce_quantity("abc"), 0);
        assert_eq!(coerce_quantity(""), 0);
        assert_eq!(coerce_quantity("99999999999999999999999"), u64::MAX);
    }

    #[test]
    fn test_lenient_material_fields() {
        let m: Material =
            serde_json::from_str(r#"{"bought": -3, "finished": "12", "buyMore": 2.7}"#).unwrap();
        assert_eq!(m, Material::new(0, 12, 2));

        let m: Material = serde_json::from_str(r#"{"bought": 4}"#).unwrap();
        assert_eq!(m, Material::new(4, 0, 0));
    }

    #[test]
    fn test_material_field_names() {
        assert_eq!(MaterialField::BuyMore.to_string(), "buy-more");
        assert_eq!(
            MaterialField::from_str("finished").unwrap(),
            MaterialField::Finished
        );
    }

    #[test]
    fn test_defaults_cover_catalog() {
        let materials = default_materials();
        let costs = default_costs();
        assert_eq!(materials.len(), CATALOG.len());
        assert_eq!(costs.get("Oil"), Some(&50));
        assert_eq!(costs.get("Laundry Detergent"), Some(&40));
    }
}
