//! Live total computation for the cashier form.
//!
//! A `Selection` is the explicit input: the packages and add-ons the cashier has ticked, each with
//! its price, and whether the extra option is on. `quote` turns that into a `Quote`. The
//! `PriceList` holds the catalog of options (from `config.json`) and resolves names into a
//! `Selection`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// The label recorded in a transaction's ingredients when the extra option is taken.
pub const DEFAULT_EXTRA_LABEL: &str = "Garlic Clove";

/// The fixed amount added on top of the package prices when the extra option is taken.
pub const DEFAULT_EXTRA_SURCHARGE: u64 = 20;

/// A selectable item and its price.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PricedOption {
    pub name: String,
    pub price: u64,
}

impl PricedOption {
    pub fn new(name: impl Into<String>, price: u64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// The extra option: it repeats the selected packages for a fixed surcharge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtraOption {
    pub label: String,
    pub surcharge: u64,
}

impl Default for ExtraOption {
    fn default() -> Self {
        Self {
            label: DEFAULT_EXTRA_LABEL.to_string(),
            surcharge: DEFAULT_EXTRA_SURCHARGE,
        }
    }
}

/// What is currently selected on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub packages: Vec<PricedOption>,
    pub addons: Vec<PricedOption>,
    /// `Some` when the extra option is ticked.
    pub extra: Option<ExtraOption>,
}

impl Selection {
    /// The package labels to record on a transaction, in selection order.
    pub fn package_labels(&self) -> Vec<String> {
        self.packages.iter().map(|p| p.name.clone()).collect()
    }

    /// The ingredients to record on a transaction: the add-on names in selection order without
    /// duplicates, followed by the extra option's label when it is ticked.
    pub fn ingredients(&self) -> Vec<String> {
        let mut ingredients: Vec<String> = Vec::new();
        let names = self
            .addons
            .iter()
            .map(|a| a.name.as_str())
            .chain(self.extra.iter().map(|e| e.label.as_str()));
        for name in names {
            if !ingredients.iter().any(|i| i == name) {
                ingredients.push(name.to_string());
            }
        }
        ingredients
    }
}

/// The breakdown of a live total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub package_total: u64,
    pub addon_total: u64,
    /// `package_total + addon_total`
    pub base: u64,
    /// `package_total + surcharge` when the extra option is ticked, otherwise `0`.
    pub extra_charge: u64,
    /// `base + extra_charge`
    pub total: u64,
}

/// Computes the live total for `selection`.
///
/// The extra charge is derived from the package prices only. Add-ons are counted once in `base`
/// and are not repeated by the extra option. Every sum saturates at `u64::MAX`.
pub fn quote(selection: &Selection) -> Quote {
    let package_total = price_sum(&selection.packages);
    let addon_total = price_sum(&selection.addons);
    let base = package_total.saturating_add(addon_total);
    let extra_charge = match &selection.extra {
        Some(extra) => package_total.saturating_add(extra.surcharge),
        None => 0,
    };
    Quote {
        package_total,
        addon_total,
        base,
        extra_charge,
        total: base.saturating_add(extra_charge),
    }
}

fn price_sum(options: &[PricedOption]) -> u64 {
    options
        .iter()
        .map(|o| o.price)
        .fold(0, u64::saturating_add)
}

/// The catalog of options the cashier can pick from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceList {
    pub packages: Vec<PricedOption>,
    pub addons: Vec<PricedOption>,
    #[serde(default)]
    pub extra: ExtraOption,
}

impl Default for PriceList {
    fn default() -> Self {
        Self {
            packages: vec![
                PricedOption::new("Single Hit", 50),
                PricedOption::new("Double Hit", 100),
                PricedOption::new("Triple Hit", 150),
            ],
            addons: vec![
                PricedOption::new("Whipped Cream", 20),
                PricedOption::new("Confetti", 10),
                PricedOption::new("Flour", 10),
                PricedOption::new("Milk", 15),
                PricedOption::new("Ketchup", 15),
                PricedOption::new("Mayo", 15),
                PricedOption::new("Mustard", 15),
                PricedOption::new("Soy Sauce", 10),
                PricedOption::new("Fish Sauce", 10),
            ],
            extra: ExtraOption::default(),
        }
    }
}

impl PriceList {
    /// Resolves option names into a `Selection`. Names are matched case-insensitively.
    ///
    /// # Errors
    /// Returns an `InvalidInput` error naming the first package or add-on that is not in the list.
    pub fn select<S1, S2>(&self, packages: &[S1], addons: &[S2], extra: bool) -> Result<Selection>
    where
        S1: AsRef<str>,
        S2: AsRef<str>,
    {
        let packages = packages
            .iter()
            .map(|name| find(&self.packages, name.as_ref(), "package"))
            .collect::<Result<Vec<_>>>()?;
        let addons = addons
            .iter()
            .map(|name| find(&self.addons, name.as_ref(), "add-on"))
            .collect::<Result<Vec<_>>>()?;
        Ok(Selection {
            packages,
            addons,
            extra: extra.then(|| self.extra.clone()),
        })
    }

    /// Finds the package a stored label refers to. Older records may hold a shortened label, so a
    /// package whose name contains the stored label is accepted when there is no exact match.
    pub(crate) fn match_package(&self, stored_label: &str) -> Option<&PricedOption> {
        if stored_label.is_empty() {
            return None;
        }
        self.packages
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(stored_label))
            .or_else(|| self.packages.iter().find(|p| p.name.contains(stored_label)))
    }

    pub(crate) fn match_addon(&self, name: &str) -> Option<&PricedOption> {
        self.addons.iter().find(|a| a.name.eq_ignore_ascii_case(name))
    }
}

fn find(options: &[PricedOption], name: &str, kind: &str) -> Result<PricedOption> {
    options
        .iter()
        .find(|o| o.name.eq_ignore_ascii_case(name.trim()))
        .cloned()
        .ok_or_else(|| {
            let known: Vec<&str> = options.iter().map(|o| o.name.as_str()).collect();
            Error::invalid_input(format!(
                "Unknown {kind} '{name}', expected one of: {}",
                known.join(", ")
            ))
        })
}
