//! `weekmenu history` and `weekmenu shop`: read back the recording log.

use std::io::Write;

use anyhow::{Context, Result, bail};

use weekmenu_core::{Catalog, shopping_list};
use weekmenu_store::log::MenuLog;
use weekmenu_store::models::{RecordedMenuEntry, Selection};

/// List recorded menus, oldest first. `limit` keeps only the most recent N.
pub fn run_history(log: &MenuLog, limit: Option<usize>, out: &mut impl Write) -> Result<()> {
    let entries = log
        .entries()
        .with_context(|| format!("failed to read {}", log.path().display()))?;

    if entries.is_empty() {
        writeln!(out, "No recorded menus in {}.", log.path().display())?;
        return Ok(());
    }

    let skip = limit.map_or(0, |n| entries.len().saturating_sub(n));

    writeln!(out, "{:>4}  {:<19}  {:>7}  RECIPES", "#", "RECORDED", "FILLED")?;
    writeln!(out, "{}", "-".repeat(60))?;
    for (idx, entry) in entries.iter().enumerate().skip(skip) {
        let recipes = distinct_recipes(entry);
        writeln!(
            out,
            "{:>4}  {:<19}  {:>5}/35  {}",
            idx + 1,
            entry.timestamp,
            filled_slots(entry),
            recipes.join(", ")
        )?;
    }
    Ok(())
}

/// Print the shopping list for a recorded menu (1-based `entry`, default
/// latest) against the current catalog.
pub fn run_shop(
    log: &MenuLog,
    catalog: &Catalog,
    entry: Option<usize>,
    out: &mut impl Write,
) -> Result<()> {
    let entries = log
        .entries()
        .with_context(|| format!("failed to read {}", log.path().display()))?;

    if entries.is_empty() {
        bail!("no recorded menus in {}", log.path().display());
    }

    let idx = match entry {
        Some(0) => bail!("entry numbers start at 1"),
        Some(n) if n > entries.len() => {
            bail!("entry {n} does not exist ({} recorded)", entries.len())
        }
        Some(n) => n - 1,
        None => entries.len() - 1,
    };
    let chosen = &entries[idx];

    writeln!(out, "Shopping list for menu #{} ({})", idx + 1, chosen.timestamp)?;
    for item in shopping_list(chosen.menu.days(), catalog) {
        writeln!(out, "{item}")?;
    }
    Ok(())
}

fn filled_slots(entry: &RecordedMenuEntry) -> usize {
    entry
        .menu
        .days()
        .flat_map(|d| d.selections())
        .filter(|s| !s.is_empty())
        .count()
}

fn distinct_recipes(entry: &RecordedMenuEntry) -> Vec<&str> {
    let mut names: Vec<&str> = entry
        .menu
        .days()
        .flat_map(|d| d.selections())
        .filter_map(Selection::name)
        .collect();
    names.sort_unstable();
    names.dedup();
    names
}
