//! Catalog loading with validation.
//!
//! Reads a catalog file, parses it according to its [`CatalogFormat`], and
//! validates:
//! - Every recipe carries `meal_type` and `ingredients` (enforced by serde).
//! - Every meal-type label is one of the four known categories.
//! - No recipe is named after the empty-slot sentinel.

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;
use weekmenu_store::models::{MealType, Selection};

use super::Catalog;
use super::Recipe;
use super::format::{CatalogFile, CatalogFormat};

/// Errors that can occur while loading the recipe catalog.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read recipe catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("recipe catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("recipe catalog is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(
        "recipe {recipe:?} has unknown meal type {label:?} (expected Breakfast, Lunch, Dinner, or Side)"
    )]
    UnknownMealType { recipe: String, label: String },

    #[error("\"None\" is reserved for empty slots and cannot name a recipe")]
    ReservedName,
}

/// Load and validate the catalog at `path`.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogLoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&content, CatalogFormat::from_path(path))?;
    info!(
        path = %path.display(),
        recipes = catalog.len(),
        "loaded recipe catalog"
    );
    Ok(catalog)
}

/// Parse and validate catalog text in the given format.
pub fn parse_catalog(content: &str, format: CatalogFormat) -> Result<Catalog, CatalogLoadError> {
    let file: CatalogFile = match format {
        CatalogFormat::Json => serde_json::from_str(content)?,
        CatalogFormat::Toml => toml::from_str(content)?,
    };

    let mut recipes = Vec::with_capacity(file.len());
    for (name, entry) in file {
        if name == Selection::NONE {
            return Err(CatalogLoadError::ReservedName);
        }

        let meal_types = entry
            .meal_type
            .iter()
            .map(|label| {
                label
                    .parse::<MealType>()
                    .map_err(|_| CatalogLoadError::UnknownMealType {
                        recipe: name.clone(),
                        label: label.clone(),
                    })
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        recipes.push(Recipe {
            name,
            meal_types,
            ingredients: entry.ingredients,
        });
    }

    Ok(Catalog::from_recipes(recipes))
}
