//! Recipe catalog: the immutable set of known recipes for a session.

pub mod format;
pub mod loader;

use std::collections::{BTreeMap, BTreeSet};

use weekmenu_store::models::{Meal, MealType, Role, Selection};

pub use format::{CatalogFile, CatalogFormat, RecipeEntry};
pub use loader::{CatalogLoadError, load_catalog, parse_catalog};

/// A named recipe with its category labels and ingredients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub name: String,
    pub meal_types: BTreeSet<MealType>,
    pub ingredients: Vec<String>,
}

impl Recipe {
    pub fn has_type(&self, meal_type: MealType) -> bool {
        self.meal_types.contains(&meal_type)
    }
}

/// Mapping from recipe name to [`Recipe`], iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    recipes: BTreeMap<String, Recipe>,
}

impl Catalog {
    /// Build a catalog. A later recipe replaces an earlier one of the same name.
    pub fn from_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        Self {
            recipes: recipes
                .into_iter()
                .map(|r| (r.name.clone(), r))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.recipes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.recipes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.values()
    }

    /// Names of all recipes carrying `meal_type`, in name order.
    pub fn names_tagged(&self, meal_type: MealType) -> Vec<&str> {
        self.iter()
            .filter(|r| r.has_type(meal_type))
            .map(|r| r.name.as_str())
            .collect()
    }

    /// Whether a slot may hold `selection`: the empty sentinel or any
    /// catalog recipe.
    pub fn admits(&self, selection: &Selection) -> bool {
        selection.name().is_none_or(|name| self.contains(name))
    }

    /// The choices a form should offer for the slot at `(meal, role)`.
    ///
    /// Recipes tagged with the slot's category, sorted by name. Side slots
    /// lead with the `"None"` sentinel since a side is optional. Returns
    /// `None` when `role` does not apply to `meal`.
    pub fn options(&self, meal: Meal, role: Role) -> Option<Vec<String>> {
        let meal_type = MealType::for_slot(meal, role)?;
        let mut options = Vec::new();
        if role == Role::Side {
            options.push(Selection::NONE.to_owned());
        }
        options.extend(self.names_tagged(meal_type).into_iter().map(str::to_owned));
        Some(options)
    }
}
