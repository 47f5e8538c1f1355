//! On-disk catalog format.
//!
//! A catalog file is a single map keyed by recipe name. JSON and TOML carry
//! the same shape:
//!
//! ```json
//! {"Oatmeal": {"meal_type": ["Breakfast"], "ingredients": ["oats", "milk"]}}
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A recipe entry as written in the catalog file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeEntry {
    /// Category labels (`Breakfast`, `Lunch`, `Dinner`, `Side`).
    pub meal_type: Vec<String>,
    /// Ingredient names. Order and duplicates carry no meaning.
    pub ingredients: Vec<String>,
}

/// Top-level structure of a catalog file.
pub type CatalogFile = BTreeMap<String, RecipeEntry>;

/// Serialization format of a catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Toml,
}

impl CatalogFormat {
    /// Pick the format from the file extension: `.toml` is TOML, anything
    /// else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}
