//! Tabular presentation of a weekly menu.

use weekmenu_store::models::{Day, WeeklyMenu};

/// Column headers, in cell order.
pub const COLUMNS: [&str; 5] = [
    "Breakfast",
    "Lunch Main",
    "Lunch Side",
    "Dinner Main",
    "Dinner Side",
];

/// One day of the menu, flattened to display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRow {
    pub day: Day,
    pub breakfast: String,
    pub lunch_main: String,
    pub lunch_side: String,
    pub dinner_main: String,
    pub dinner_side: String,
}

impl MenuRow {
    /// Cells in [`COLUMNS`] order.
    pub fn cells(&self) -> [&str; 5] {
        [
            &self.breakfast,
            &self.lunch_main,
            &self.lunch_side,
            &self.dinner_main,
            &self.dinner_side,
        ]
    }
}

/// One row per day, Monday through Sunday.
pub fn tabulate(menu: &WeeklyMenu) -> Vec<MenuRow> {
    menu.iter()
        .map(|(day, plan)| MenuRow {
            day,
            breakfast: plan.breakfast.to_string(),
            lunch_main: plan.lunch.main.to_string(),
            lunch_side: plan.lunch.side.to_string(),
            dinner_main: plan.dinner.main.to_string(),
            dinner_side: plan.dinner.side.to_string(),
        })
        .collect()
}

/// Render rows as a fixed-width text table with a `DAY` column.
pub fn render_table(rows: &[MenuRow]) -> String {
    let mut widths = [0usize; 6];
    widths[0] = "DAY".len();
    for (w, header) in widths[1..].iter_mut().zip(COLUMNS) {
        *w = header.len();
    }
    for row in rows {
        widths[0] = widths[0].max(row.day.to_string().len());
        for (w, cell) in widths[1..].iter_mut().zip(row.cells()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = std::iter::once("DAY")
        .chain(COLUMNS)
        .map(|h| h.to_uppercase())
        .collect();
    push_line(&mut out, &widths, header.iter().map(String::as_str));
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));
    out.push('\n');
    for row in rows {
        let day = row.day.to_string();
        push_line(
            &mut out,
            &widths,
            std::iter::once(day.as_str()).chain(row.cells()),
        );
    }
    out
}

fn push_line<'a>(out: &mut String, widths: &[usize], cells: impl Iterator<Item = &'a str>) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
