//! Aggregation properties over whole weekly menus.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use weekmenu_core::catalog::{Catalog, CatalogFormat, parse_catalog};
use weekmenu_core::{empty_menu, random_menu, shopping_list};
use weekmenu_store::models::DayMenu;
use weekmenu_test_utils::{SCENARIO_CATALOG_JSON, WIDE_CATALOG_JSON, scenario_menu};

fn wide() -> Catalog {
    parse_catalog(WIDE_CATALOG_JSON, CatalogFormat::Json).unwrap()
}

#[test]
fn scenario_menu_yields_expected_list() {
    let catalog = parse_catalog(SCENARIO_CATALOG_JSON, CatalogFormat::Json).unwrap();
    let list = shopping_list(scenario_menu().days(), &catalog);
    assert_eq!(list, vec!["broth", "egg", "lettuce", "rice"]);
}

#[test]
fn empty_menu_yields_nothing() {
    assert!(shopping_list(empty_menu().days(), &wide()).is_empty());
}

#[test]
fn output_is_strictly_sorted() {
    let catalog = wide();
    for seed in 0..50 {
        let menu = random_menu(&catalog, &mut StdRng::seed_from_u64(seed)).unwrap();
        let list = shopping_list(menu.days(), &catalog);
        assert!(
            list.windows(2).all(|w| w[0] < w[1]),
            "seed {seed}: not strictly sorted: {list:?}"
        );
    }
}

#[test]
fn day_order_does_not_matter() {
    let catalog = wide();
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let menu = random_menu(&catalog, &mut rng).unwrap();
        let expected = shopping_list(menu.days(), &catalog);

        let mut shuffled: Vec<&DayMenu> = menu.days().collect();
        shuffled.shuffle(&mut rng);
        assert_eq!(shopping_list(shuffled, &catalog), expected);
    }
}

#[test]
fn duplicate_ingredients_within_a_recipe_are_harmless() {
    let catalog = wide();
    let day = DayMenu {
        dinner: weekmenu_store::models::Course::new("Roast Chicken", "Green Beans"),
        ..DayMenu::default()
    };
    assert_eq!(
        shopping_list([&day], &catalog),
        vec!["chicken", "garlic", "green beans"]
    );
}
