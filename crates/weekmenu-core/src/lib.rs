//! Weekly meal planning logic: recipe catalog, menu generation, the editable
//! session, shopping-list aggregation, and tabular presentation.

pub mod catalog;
pub mod menu;
pub mod session;
pub mod shopping;
pub mod table;

pub use catalog::{Catalog, CatalogLoadError, Recipe, load_catalog};
pub use menu::generate::{NoCandidatesError, empty_menu, random_menu};
pub use session::{Finalized, InvalidSelectionError, Session, SessionError, SlotRef};
pub use shopping::shopping_list;
pub use table::{MenuRow, render_table, tabulate};
