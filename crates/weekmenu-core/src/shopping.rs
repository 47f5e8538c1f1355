//! Shopping list aggregation.
//!
//! Walks per-day plans, resolves every filled slot against the catalog, and
//! returns the union of ingredients in lexicographic order. Empty slots and
//! names the catalog does not know contribute nothing. The result depends
//! only on which distinct recipes are referenced.

use std::collections::BTreeSet;

use tracing::warn;
use weekmenu_store::models::DayMenu;

use crate::catalog::Catalog;

/// Deduplicated, sorted ingredients for the given day plans.
pub fn shopping_list<'a>(
    days: impl IntoIterator<Item = &'a DayMenu>,
    catalog: &Catalog,
) -> Vec<String> {
    let mut ingredients: BTreeSet<&str> = BTreeSet::new();

    for day in days {
        for name in day.selections().into_iter().filter_map(|s| s.name()) {
            match catalog.get(name) {
                Some(recipe) => ingredients.extend(recipe.ingredients.iter().map(String::as_str)),
                None => warn!(recipe = name, "skipping recipe missing from catalog"),
            }
        }
    }

    ingredients.into_iter().map(str::to_owned).collect()
}
