//! Shopping list built from the recipes in a user's cart.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::domain::types::IngredientAmount;

/// Total quantity of one ingredient across the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListItem {
    pub name: String,
    pub measurement_unit: String,
    pub total: i64,
}

/// Sum amounts grouped by `(name, measurement_unit)`, sorted by name then unit.
pub fn aggregate(lines: impl IntoIterator<Item = IngredientAmount>) -> Vec<ShoppingListItem> {
    let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();
    for line in lines {
        *totals
            .entry((line.ingredient.name, line.ingredient.measurement_unit))
            .or_default() += i64::from(line.amount);
    }
    totals
        .into_iter()
        .map(|((name, measurement_unit), total)| ShoppingListItem {
            name,
            measurement_unit,
            total,
        })
        .collect()
}

/// Plain-text rendering offered as a download.
pub fn render_text(items: &[ShoppingListItem]) -> String {
    let mut out = String::from("Shopping list\n\n");
    for item in items {
        let _ = writeln!(
            out,
            "- {} ({}) — {}",
            item.name, item.measurement_unit, item.total
        );
    }
    out
}
