//! Shared fixtures for weekmenu integration tests.
//!
//! Catalogs are provided as raw JSON/TOML text so each crate can parse them
//! with its own loader, plus helpers that drop them into a scratch directory.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use weekmenu_store::models::{Course, Day, DayMenu, Selection, WeeklyMenu};

/// Four single-tag recipes, one per category.
pub const SCENARIO_CATALOG_JSON: &str = r#"{
    "Eggs": {"meal_type": ["Breakfast"], "ingredients": ["egg"]},
    "Salad": {"meal_type": ["Lunch"], "ingredients": ["lettuce"]},
    "Rice": {"meal_type": ["Side"], "ingredients": ["rice"]},
    "Soup": {"meal_type": ["Dinner"], "ingredients": ["broth"]}
}"#;

/// A larger catalog with multi-tag recipes and overlapping ingredients.
pub const WIDE_CATALOG_JSON: &str = r#"{
    "Oatmeal": {"meal_type": ["Breakfast"], "ingredients": ["oats", "milk"]},
    "Pancakes": {"meal_type": ["Breakfast"], "ingredients": ["flour", "milk", "egg"]},
    "Omelette": {"meal_type": ["Breakfast", "Lunch"], "ingredients": ["egg", "cheese"]},
    "Club Sandwich": {"meal_type": ["Lunch"], "ingredients": ["bread", "chicken", "lettuce"]},
    "Caesar Salad": {"meal_type": ["Lunch", "Side"], "ingredients": ["lettuce", "cheese", "bread"]},
    "Roast Chicken": {"meal_type": ["Dinner"], "ingredients": ["chicken", "garlic"]},
    "Pasta": {"meal_type": ["Lunch", "Dinner"], "ingredients": ["pasta", "tomato", "garlic"]},
    "Fries": {"meal_type": ["Side"], "ingredients": ["potato", "oil"]},
    "Green Beans": {"meal_type": ["Side"], "ingredients": ["green beans", "garlic", "garlic"]}
}"#;

/// The scenario catalog in TOML form.
pub const SCENARIO_CATALOG_TOML: &str = r#"
[Eggs]
meal_type = ["Breakfast"]
ingredients = ["egg"]

[Salad]
meal_type = ["Lunch"]
ingredients = ["lettuce"]

[Rice]
meal_type = ["Side"]
ingredients = ["rice"]

[Soup]
meal_type = ["Dinner"]
ingredients = ["broth"]
"#;

/// Scratch directory that is removed on drop.
pub struct Scratch {
    dir: TempDir,
}

impl Scratch {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create scratch directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `name` inside the scratch directory.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents)
            .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
        path
    }

    /// Path for a log file that does not exist yet.
    pub fn log_path(&self) -> PathBuf {
        self.dir.path().join("recorded_menus.json")
    }
}

impl Default for Scratch {
    fn default() -> Self {
        Self::new()
    }
}

/// The scenario menu: Monday fully planned, every other day empty.
pub fn scenario_menu() -> WeeklyMenu {
    WeeklyMenu::from_fn(|day| match day {
        Day::Monday => DayMenu {
            breakfast: Selection::recipe("Eggs"),
            lunch: Course::new("Salad", "Rice"),
            dinner: Course::new("Soup", Selection::Empty),
        },
        _ => DayMenu::default(),
    })
}

/// A menu that serves the same day plan on every day.
pub fn uniform_menu(day_menu: DayMenu) -> WeeklyMenu {
    WeeklyMenu::from_fn(|_| day_menu.clone())
}
