//! Operations over the material inventory and unit costs.

use crate::error::{Error, Result};
use crate::model::{
    coerce_quantity, BuyListItem, Material, MaterialCosts, MaterialField, Materials, CATALOG,
};

/// Sets one quantity of one material. `raw` is coerced with `coerce_quantity`, so bad input becomes
/// `0` rather than an error. Other materials are untouched.
///
/// # Errors
/// Returns a `NotFound` error if `name` is not a tracked material.
pub fn set_quantity(
    materials: &mut Materials,
    name: &str,
    field: MaterialField,
    raw: &str,
) -> Result<(String, Material)> {
    let key = resolve_name(materials, name)?;
    let value = coerce_quantity(raw);
    let material = materials.entry(key.clone()).or_default();
    material.set(field, value);
    Ok((key, *material))
}

/// Sets the unit cost of one material, with the same coercion as `set_quantity`.
///
/// # Errors
/// Returns a `NotFound` error if `name` is not a tracked material.
pub fn set_unit_cost(
    costs: &mut MaterialCosts,
    materials: &Materials,
    name: &str,
    raw: &str,
) -> Result<(String, u64)> {
    let key = resolve_name(materials, name)?;
    let value = coerce_quantity(raw);
    costs.insert(key.clone(), value);
    Ok((key, value))
}

/// Builds the buy list: catalog materials in catalog order, then any other stored materials by name.
pub fn buy_list(materials: &Materials, costs: &MaterialCosts) -> Vec<BuyListItem> {
    let catalog_names = CATALOG.iter().map(|(name, _)| *name);
    let extra_names = materials
        .keys()
        .map(String::as_str)
        .filter(|name| !CATALOG.iter().any(|(c, _)| c == name));
    catalog_names
        .chain(extra_names)
        .map(|name| {
            let material = materials.get(name).copied().unwrap_or_default();
            let unit_cost = costs.get(name).copied().unwrap_or_default();
            BuyListItem {
                name: name.to_string(),
                unit_cost,
                bought: material.bought(),
                finished: material.finished(),
                buy_more: material.buy_more(),
                to_buy: material.to_buy(),
                estimated_cost: material.estimated_cost(unit_cost),
            }
        })
        .collect()
}

pub fn buy_list_total(items: &[BuyListItem]) -> u64 {
    items
        .iter()
        .map(|i| i.estimated_cost)
        .fold(0, u64::saturating_add)
}

/// Finds the stored key for `name`, preferring an exact match and falling back to a
/// case-insensitive one.
fn resolve_name(materials: &Materials, name: &str) -> Result<String> {
    let name = name.trim();
    if materials.contains_key(name) {
        return Ok(name.to_string());
    }
    if let Some(key) = materials.keys().find(|k| k.eq_ignore_ascii_case(name)) {
        return Ok(key.clone());
    }
    if let Some((key, _)) = CATALOG.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
        return Ok(key.to_string());
    }
    Err(Error::not_found(format!("Material not found: {name}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use crate::model::AppState;

    #[test]
    fn test_oil_scenario() {
        let mut state = AppState::default();
        set_quantity(&mut state.materials, "Oil", MaterialField::Bought, "5").unwrap();
        set_quantity(&mut state.materials, "Oil", MaterialField::Finished, "20").unwrap();
        set_quantity(&mut state.materials, "Oil", MaterialField::BuyMore, "2").unwrap();
        set_unit_cost(&mut state.material_costs, &state.materials, "Oil", "60").unwrap();

        let list = buy_list(&state.materials, &state.material_costs);
        let oil = list.iter().find(|i| i.name == "Oil").unwrap();
        assert_eq!(oil.to_buy, 17);
        assert_eq!(oil.estimated_cost, 1020);
        assert_eq!(buy_list_total(&list), 1020);
    }

    #[test]
    fn test_bad_input_coerces_to_zero() {
        let mut state = AppState::default();
        set_quantity(&mut state.materials, "Milk", MaterialField::Finished, "8").unwrap();
        let (_, milk) =
            set_quantity(&mut state.materials, "Milk", MaterialField::Finished, "-3").unwrap();
        assert_eq!(milk.finished(), 0);
        let (_, milk) =
            set_quantity(&mut state.materials, "Milk", MaterialField::Bought, "lots").unwrap();
        assert_eq!(milk.bought(), 0);
        let (_, cost) =
            set_unit_cost(&mut state.material_costs, &state.materials, "Milk", "").unwrap();
        assert_eq!(cost, 0);
    }

    #[test]
    fn test_setters_leave_other_materials_untouched() {
        let mut state = AppState::default();
        let before = state.clone();
        set_quantity(&mut state.materials, "mayo", MaterialField::Bought, "4").unwrap();
        set_unit_cost(&mut state.material_costs, &state.materials, "MAYO", "55").unwrap();
        for (name, material) in &state.materials {
            if name != "Mayo" {
                assert_eq!(material, &before.materials[name]);
                assert_eq!(state.material_costs[name], before.material_costs[name]);
            }
        }
        assert_eq!(state.materials["Mayo"].bought(), 4);
        assert_eq!(state.material_costs["Mayo"], 55);
    }

    #[test]
    fn test_unknown_material() {
        let mut state = AppState::default();
        let err =
            set_quantity(&mut state.materials, "Glue", MaterialField::Bought, "1").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::NotFound);
        let err = set_unit_cost(&mut state.material_costs, &state.materials, "Glue", "1")
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::NotFound);
    }

    #[test]
    fn test_buy_list_order() {
        let mut state = AppState::default();
        state.materials.insert("Glitter".into(), Material::new(0, 2, 0));
        let names: Vec<String> = buy_list(&state.materials, &state.material_costs)
            .into_iter()
            .map(|i| i.name)
            .collect();
        let mut expected: Vec<String> = CATALOG.iter().map(|(n, _)| n.to_string()).collect();
        expected.push("Glitter".to_string());
        assert_eq!(names, expected);
    }

    #[test]
    fn test_buy_list_unknown_cost_is_zero() {
        let mut state = AppState::default();
        state.materials.insert("Glitter".into(), Material::new(0, 2, 0));
        let list = buy_list(&state.materials, &state.material_costs);
        let glitter = list.last().unwrap();
        assert_eq!(glitter.to_buy, 2);
        assert_eq!(glitter.estimated_cost, 0);
    }

    #[test]
    fn test_buy_list_total_saturates() {
        let state = AppState::default();
        let mut list = buy_list(&state.materials, &state.material_costs);
        list[0].estimated_cost = u64::MAX;
        list[1].estimated_cost = 1;
        assert_eq!(buy_list_total(&list), u64::MAX);
    }
}
