//! Menu generation: the all-empty skeleton and uniformly random plans.
//!
//! Random plans draw every slot independently: each day, each meal, and the
//! two sides are separate uniform draws from the recipes carrying the slot's
//! category. Repeats across days and within a day are allowed.

use rand::Rng;
use thiserror::Error;
use tracing::debug;
use weekmenu_store::models::{Course, DayMenu, MealType, Selection, WeeklyMenu};

use crate::catalog::Catalog;

/// A category needed for a random menu has no recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no recipes in the catalog are tagged {meal_type}")]
pub struct NoCandidatesError {
    pub meal_type: MealType,
}

/// A weekly menu with every slot empty.
pub fn empty_menu() -> WeeklyMenu {
    WeeklyMenu::default()
}

/// A weekly menu with every slot drawn at random from `catalog`.
///
/// Fails before drawing anything if any of the four categories is empty, so
/// a caller never sees a partially filled menu.
pub fn random_menu<R: Rng + ?Sized>(
    catalog: &Catalog,
    rng: &mut R,
) -> Result<WeeklyMenu, NoCandidatesError> {
    let breakfast = Pool::new(catalog, MealType::Breakfast)?;
    let lunch = Pool::new(catalog, MealType::Lunch)?;
    let dinner = Pool::new(catalog, MealType::Dinner)?;
    let side = Pool::new(catalog, MealType::Side)?;

    Ok(WeeklyMenu::from_fn(|_| DayMenu {
        breakfast: breakfast.draw(rng),
        lunch: Course {
            main: lunch.draw(rng),
            side: side.draw(rng),
        },
        dinner: Course {
            main: dinner.draw(rng),
            side: side.draw(rng),
        },
    }))
}

/// Non-empty list of recipe names for one category.
struct Pool<'a> {
    names: Vec<&'a str>,
}

impl<'a> Pool<'a> {
    fn new(catalog: &'a Catalog, meal_type: MealType) -> Result<Self, NoCandidatesError> {
        let names = catalog.names_tagged(meal_type);
        debug!(%meal_type, candidates = names.len(), "candidate pool");
        if names.is_empty() {
            return Err(NoCandidatesError { meal_type });
        }
        Ok(Self { names })
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Selection {
        let idx = rng.random_range(0..self.names.len());
        Selection::recipe(self.names[idx])
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use weekmenu_store::models::Day;

    use super::*;
    use crate::catalog::{CatalogFormat, parse_catalog};

    fn catalog(json: &str) -> Catalog {
        parse_catalog(json, CatalogFormat::Json).unwrap()
    }

    #[test]
    fn empty_menu_has_no_selections() {
        let menu = empty_menu();
        assert!(menu.is_empty());
        assert_eq!(menu.day(Day::Wednesday).lunch.side, Selection::Empty);
    }

    #[test]
    fn single_candidate_per_category_is_always_chosen() {
        let catalog = catalog(
            r#"{
                "Eggs": {"meal_type": ["Breakfast"], "ingredients": []},
                "Salad": {"meal_type": ["Lunch"], "ingredients": []},
                "Soup": {"meal_type": ["Dinner"], "ingredients": []},
                "Rice": {"meal_type": ["Side"], "ingredients": []}
            }"#,
        );
        let mut rng = StdRng::seed_from_u64(7);
        let menu = random_menu(&catalog, &mut rng).unwrap();
        for (_, day) in menu.iter() {
            assert_eq!(day.breakfast.name(), Some("Eggs"));
            assert_eq!(day.lunch.main.name(), Some("Salad"));
            assert_eq!(day.lunch.side.name(), Some("Rice"));
            assert_eq!(day.dinner.main.name(), Some("Soup"));
            assert_eq!(day.dinner.side.name(), Some("Rice"));
        }
    }

    #[test]
    fn missing_side_category_fails() {
        let catalog = catalog(
            r#"{
                "Eggs": {"meal_type": ["Breakfast"], "ingredients": []},
                "Salad": {"meal_type": ["Lunch"], "ingredients": []},
                "Soup": {"meal_type": ["Dinner"], "ingredients": []}
            }"#,
        );
        let mut rng = StdRng::seed_from_u64(1);
        let err = random_menu(&catalog, &mut rng).unwrap_err();
        assert_eq!(err.meal_type, MealType::Side);
    }

    #[test]
    fn empty_catalog_fails_on_breakfast_first() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = random_menu(&Catalog::default(), &mut rng).unwrap_err();
        assert_eq!(err.meal_type, MealType::Breakfast);
    }

    #[test]
    fn same_seed_same_menu() {
        let catalog = catalog(weekmenu_test_json());
        let a = random_menu(&catalog, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = random_menu(&catalog, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    fn weekmenu_test_json() -> &'static str {
        r#"{
            "Oatmeal": {"meal_type": ["Breakfast"], "ingredients": ["oats"]},
            "Toast": {"meal_type": ["Breakfast"], "ingredients": ["bread"]},
            "Wrap": {"meal_type": ["Lunch", "Dinner"], "ingredients": ["tortilla"]},
            "Stew": {"meal_type": ["Dinner"], "ingredients": ["beef"]},
            "Fries": {"meal_type": ["Side"], "ingredients": ["potato"]},
            "Slaw": {"meal_type": ["Side"], "ingredients": ["cabbage"]}
        }"#
    }
}
