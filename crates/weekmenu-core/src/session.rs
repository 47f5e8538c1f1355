//! The editable weekly menu and the command handlers a front end drives.
//!
//! A [`Session`] owns the catalog and the current [`WeeklyMenu`]. Front ends
//! call one handler per user action; each runs to completion and either
//! applies its whole effect or leaves the menu untouched.

use std::fmt;

use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};
use weekmenu_store::log::{MenuLog, PersistenceError};
use weekmenu_store::models::{Day, Meal, RecordedMenuEntry, Role, Selection, WeeklyMenu};

use crate::catalog::Catalog;
use crate::menu::generate::{NoCandidatesError, empty_menu, random_menu};
use crate::shopping::shopping_list;
use crate::table::{MenuRow, tabulate};

/// Address of a single slot: `(day, meal, role)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotRef {
    pub day: Day,
    pub meal: Meal,
    pub role: Role,
}

impl SlotRef {
    pub fn new(day: Day, meal: Meal, role: Role) -> Self {
        Self { day, meal, role }
    }
}

impl fmt::Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.meal.is_compound() {
            write!(f, "{} {} {}", self.day, self.meal, self.role)
        } else {
            write!(f, "{} {}", self.day, self.meal)
        }
    }
}

/// A slot edit was refused. The menu is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSelectionError {
    #[error("{name:?} is not in the recipe catalog (slot {slot})")]
    UnknownRecipe { slot: SlotRef, name: String },

    #[error("{meal} has no {role} slot")]
    RoleMismatch { meal: Meal, role: Role },
}

/// Any failure raised by a session command handler.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    NoCandidates(#[from] NoCandidatesError),

    #[error(transparent)]
    InvalidSelection(#[from] InvalidSelectionError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Everything a front end shows after a successful finalize.
#[derive(Debug, Clone)]
pub struct Finalized {
    /// The entry appended to the log.
    pub entry: RecordedMenuEntry,
    /// Deduplicated ingredients, sorted.
    pub shopping_list: Vec<String>,
    /// The finalized menu, one row per day.
    pub rows: Vec<MenuRow>,
}

/// One interactive planning session.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    menu: WeeklyMenu,
}

impl Session {
    /// Start with an all-empty menu.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            menu: empty_menu(),
        }
    }

    /// Start with a randomized menu.
    pub fn randomized<R: Rng + ?Sized>(
        catalog: Catalog,
        rng: &mut R,
    ) -> Result<Self, NoCandidatesError> {
        let menu = random_menu(&catalog, rng)?;
        Ok(Self { catalog, menu })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn menu(&self) -> &WeeklyMenu {
        &self.menu
    }

    /// Current value of one slot.
    pub fn slot(&self, slot: SlotRef) -> Result<&Selection, InvalidSelectionError> {
        self.menu
            .day(slot.day)
            .slot(slot.meal, slot.role)
            .ok_or(InvalidSelectionError::RoleMismatch {
                meal: slot.meal,
                role: slot.role,
            })
    }

    /// Replace the whole menu with a fresh random one.
    ///
    /// On error the current menu is kept.
    pub fn on_regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), NoCandidatesError> {
        self.menu = random_menu(&self.catalog, rng)?;
        info!("regenerated weekly menu");
        Ok(())
    }

    /// Reset every slot to empty.
    pub fn on_clear(&mut self) {
        self.menu = empty_menu();
        info!("cleared weekly menu");
    }

    /// Set one slot.
    ///
    /// `value` must be the empty sentinel or a catalog recipe. Category tags
    /// are not checked here; offering only suitable recipes is the front
    /// end's job (see [`Catalog::options`]).
    pub fn on_edit_slot(
        &mut self,
        slot: SlotRef,
        value: impl Into<Selection>,
    ) -> Result<(), InvalidSelectionError> {
        let value = value.into();
        let target = self
            .menu
            .day_mut(slot.day)
            .slot_mut(slot.meal, slot.role)
            .ok_or(InvalidSelectionError::RoleMismatch {
                meal: slot.meal,
                role: slot.role,
            })?;
        if !self.catalog.admits(&value) {
            return Err(InvalidSelectionError::UnknownRecipe {
                slot,
                name: value.to_string(),
            });
        }
        debug!(%slot, from = %target, to = %value, "edit slot");
        *target = value;
        Ok(())
    }

    /// Shopping list for the current menu.
    pub fn shopping_list(&self) -> Vec<String> {
        shopping_list(self.menu.days(), &self.catalog)
    }

    /// Current menu as table rows.
    pub fn rows(&self) -> Vec<MenuRow> {
        tabulate(&self.menu)
    }

    /// Record the current menu to `log` and derive its shopping list.
    ///
    /// The recorder and the aggregator both read one snapshot. If recording
    /// fails the error is returned and the session keeps its menu, so the
    /// caller may retry.
    pub fn on_finalize(&self, log: &MenuLog) -> Result<Finalized, PersistenceError> {
        let snapshot = self.menu.clone();
        let entry = log.record(&snapshot)?;
        let shopping_list = shopping_list(snapshot.days(), &self.catalog);
        info!(
            timestamp = %entry.timestamp,
            ingredients = shopping_list.len(),
            "finalized weekly menu"
        );
        Ok(Finalized {
            entry,
            shopping_list,
            rows: tabulate(&snapshot),
        })
    }
}
