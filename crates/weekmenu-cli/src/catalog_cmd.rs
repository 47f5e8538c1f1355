//! Non-interactive views of the catalog: `weekmenu options` and
//! `weekmenu random`.

use std::io::Write;

use anyhow::Result;
use rand::Rng;

use weekmenu_core::{Catalog, random_menu, render_table, shopping_list, tabulate};
use weekmenu_store::models::Meal;

/// Print the recipes each slot kind accepts.
pub fn run_options(catalog: &Catalog, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{} recipes in catalog", catalog.len())?;
    for meal in Meal::ALL {
        for &role in meal.roles() {
            let heading = if meal.is_compound() {
                format!("{meal} {role}")
            } else {
                meal.to_string()
            };
            writeln!(out)?;
            writeln!(out, "{heading}:")?;
            let options = catalog.options(meal, role).unwrap_or_default();
            if options.is_empty() {
                writeln!(out, "  (no recipes)")?;
            }
            for name in options {
                writeln!(out, "  {name}")?;
            }
        }
    }
    Ok(())
}

/// Print one random menu and its shopping list without recording it.
pub fn run_random<R: Rng + ?Sized>(
    catalog: &Catalog,
    rng: &mut R,
    out: &mut impl Write,
) -> Result<()> {
    let menu = random_menu(catalog, rng)?;
    writeln!(out, "{}", render_table(&tabulate(&menu)))?;
    writeln!(out, "Shopping List")?;
    for item in shopping_list(menu.days(), catalog) {
        writeln!(out, "{item}")?;
    }
    Ok(())
}
