use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Day of the week. Ordering follows the planning week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// The fixed 7-day sequence.
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        };
        f.write_str(s)
    }
}

impl FromStr for Day {
    type Err = DayParseError;

    /// Case-insensitive; accepts full names only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| DayParseError(s.to_owned()))
    }
}

/// Error returned when parsing an invalid [`Day`] string.
#[derive(Debug, Clone)]
pub struct DayParseError(pub String);

impl fmt::Display for DayParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid day: {:?}", self.0)
    }
}

impl std::error::Error for DayParseError {}

// ---------------------------------------------------------------------------

/// A meal position within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
}

impl Meal {
    pub const ALL: [Meal; 3] = [Meal::Breakfast, Meal::Lunch, Meal::Dinner];

    /// Whether the meal is a compound (main + side) slot.
    pub fn is_compound(self) -> bool {
        !matches!(self, Self::Breakfast)
    }

    /// The roles that address this meal's slot(s).
    pub fn roles(self) -> &'static [Role] {
        if self.is_compound() {
            &[Role::Main, Role::Side]
        } else {
            &[Role::Value]
        }
    }

    /// Whether `role` addresses a slot of this meal.
    pub fn accepts(self, role: Role) -> bool {
        self.roles().contains(&role)
    }

    /// The default role used when a caller does not name one.
    pub fn default_role(self) -> Role {
        self.roles()[0]
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
        };
        f.write_str(s)
    }
}

impl FromStr for Meal {
    type Err = MealParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|meal| meal.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| MealParseError(s.to_owned()))
    }
}

/// Error returned when parsing an invalid [`Meal`] string.
#[derive(Debug, Clone)]
pub struct MealParseError(pub String);

impl fmt::Display for MealParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid meal: {:?} (expected Breakfast, Lunch, or Dinner)", self.0)
    }
}

impl std::error::Error for MealParseError {}

// ---------------------------------------------------------------------------

/// Which half of a slot is addressed: the whole simple slot, or the main /
/// side of a compound slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Value,
    Main,
    Side,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Value => "value",
            Self::Main => "main",
            Self::Side => "side",
        };
        f.write_str(s)
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "value" => Ok(Self::Value),
            "main" => Ok(Self::Main),
            "side" => Ok(Self::Side),
            _ => Err(RoleParseError(s.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Role`] string.
#[derive(Debug, Clone)]
pub struct RoleParseError(pub String);

impl fmt::Display for RoleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid role: {:?} (expected value, main, or side)", self.0)
    }
}

impl std::error::Error for RoleParseError {}

// ---------------------------------------------------------------------------

/// Category label carried by a catalog recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Side,
}

impl MealType {
    /// The category a recipe must carry to fill the slot at `(meal, role)`.
    ///
    /// Returns `None` when the role does not apply to the meal.
    pub fn for_slot(meal: Meal, role: Role) -> Option<Self> {
        match (meal, role) {
            (Meal::Breakfast, Role::Value) => Some(Self::Breakfast),
            (Meal::Lunch, Role::Main) => Some(Self::Lunch),
            (Meal::Dinner, Role::Main) => Some(Self::Dinner),
            (Meal::Lunch | Meal::Dinner, Role::Side) => Some(Self::Side),
            _ => None,
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Side => "Side",
        };
        f.write_str(s)
    }
}

impl FromStr for MealType {
    type Err = MealTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Breakfast" => Ok(Self::Breakfast),
            "Lunch" => Ok(Self::Lunch),
            "Dinner" => Ok(Self::Dinner),
            "Side" => Ok(Self::Side),
            other => Err(MealTypeParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`MealType`] string.
#[derive(Debug, Clone)]
pub struct MealTypeParseError(pub String);

impl fmt::Display for MealTypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid meal type: {:?} (expected Breakfast, Lunch, Dinner, or Side)",
            self.0
        )
    }
}

impl std::error::Error for MealTypeParseError {}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// The value held by a single slot: a recipe name or the `"None"` sentinel.
///
/// On the wire both cases are plain strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    #[default]
    Empty,
    Recipe(String),
}

impl Selection {
    /// Wire form of [`Selection::Empty`].
    pub const NONE: &str = "None";

    pub fn recipe(name: impl Into<String>) -> Self {
        Self::from(name.into())
    }

    /// The recipe name, or `None` for an empty slot.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Recipe(name) => Some(name),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn as_str(&self) -> &str {
        self.name().unwrap_or(Self::NONE)
    }
}

impl From<String> for Selection {
    fn from(s: String) -> Self {
        if s == Self::NONE {
            Self::Empty
        } else {
            Self::Recipe(s)
        }
    }
}

impl From<&str> for Selection {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl From<Selection> for String {
    fn from(sel: Selection) -> Self {
        match sel {
            Selection::Empty => Selection::NONE.to_owned(),
            Selection::Recipe(name) => name,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compound slot: main dish plus optional side.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Course {
    pub main: Selection,
    pub side: Selection,
}

impl Course {
    pub fn new(main: impl Into<Selection>, side: impl Into<Selection>) -> Self {
        Self {
            main: main.into(),
            side: side.into(),
        }
    }
}

/// One day's plan.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DayMenu {
    #[serde(rename = "Breakfast")]
    pub breakfast: Selection,
    #[serde(rename = "Lunch")]
    pub lunch: Course,
    #[serde(rename = "Dinner")]
    pub dinner: Course,
}

impl DayMenu {
    /// Borrow the slot addressed by `(meal, role)`, or `None` if the role does
    /// not apply to the meal.
    pub fn slot(&self, meal: Meal, role: Role) -> Option<&Selection> {
        match (meal, role) {
            (Meal::Breakfast, Role::Value) => Some(&self.breakfast),
            (Meal::Lunch, Role::Main) => Some(&self.lunch.main),
            (Meal::Lunch, Role::Side) => Some(&self.lunch.side),
            (Meal::Dinner, Role::Main) => Some(&self.dinner.main),
            (Meal::Dinner, Role::Side) => Some(&self.dinner.side),
            _ => None,
        }
    }

    pub fn slot_mut(&mut self, meal: Meal, role: Role) -> Option<&mut Selection> {
        match (meal, role) {
            (Meal::Breakfast, Role::Value) => Some(&mut self.breakfast),
            (Meal::Lunch, Role::Main) => Some(&mut self.lunch.main),
            (Meal::Lunch, Role::Side) => Some(&mut self.lunch.side),
            (Meal::Dinner, Role::Main) => Some(&mut self.dinner.main),
            (Meal::Dinner, Role::Side) => Some(&mut self.dinner.side),
            _ => None,
        }
    }

    /// Every slot in the day, in Breakfast, Lunch main/side, Dinner main/side
    /// order.
    pub fn selections(&self) -> [&Selection; 5] {
        [
            &self.breakfast,
            &self.lunch.main,
            &self.lunch.side,
            &self.dinner.main,
            &self.dinner.side,
        ]
    }
}

// ---------------------------------------------------------------------------
// Weekly menu
// ---------------------------------------------------------------------------

/// A full 7-day plan. Every day of the week is always present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<Day, DayMenu>",
    into = "BTreeMap<Day, DayMenu>"
)]
pub struct WeeklyMenu {
    days: [DayMenu; 7],
}

impl WeeklyMenu {
    /// Build a menu by computing each day's plan in week order.
    pub fn from_fn(mut f: impl FnMut(Day) -> DayMenu) -> Self {
        Self {
            days: std::array::from_fn(|i| f(Day::ALL[i])),
        }
    }

    /// Fallible variant of [`WeeklyMenu::from_fn`]; stops at the first error.
    pub fn try_from_fn<E>(mut f: impl FnMut(Day) -> Result<DayMenu, E>) -> Result<Self, E> {
        let mut days: [DayMenu; 7] = Default::default();
        for (slot, day) in days.iter_mut().zip(Day::ALL) {
            *slot = f(day)?;
        }
        Ok(Self { days })
    }

    pub fn day(&self, day: Day) -> &DayMenu {
        &self.days[day.index()]
    }

    pub fn day_mut(&mut self, day: Day) -> &mut DayMenu {
        &mut self.days[day.index()]
    }

    /// Iterate `(day, plan)` pairs in week order.
    pub fn iter(&self) -> impl Iterator<Item = (Day, &DayMenu)> {
        Day::ALL.into_iter().zip(self.days.iter())
    }

    /// The per-day records without their day keys, in week order.
    pub fn days(&self) -> impl Iterator<Item = &DayMenu> {
        self.days.iter()
    }

    /// Whether every slot of every day is empty.
    pub fn is_empty(&self) -> bool {
        self.days
            .iter()
            .all(|d| d.selections().iter().all(|s| s.is_empty()))
    }
}

impl TryFrom<BTreeMap<Day, DayMenu>> for WeeklyMenu {
    type Error = MissingDayError;

    fn try_from(mut map: BTreeMap<Day, DayMenu>) -> Result<Self, Self::Error> {
        Self::try_from_fn(|day| map.remove(&day).ok_or(MissingDayError(day)))
    }
}

impl From<WeeklyMenu> for BTreeMap<Day, DayMenu> {
    fn from(menu: WeeklyMenu) -> Self {
        Day::ALL.into_iter().zip(menu.days).collect()
    }
}

/// Error returned when a serialized weekly menu omits a day.
#[derive(Debug, Clone)]
pub struct MissingDayError(pub Day);

impl fmt::Display for MissingDayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "weekly menu is missing {}", self.0)
    }
}

impl std::error::Error for MissingDayError {}

// ---------------------------------------------------------------------------
// Recorded entries
// ---------------------------------------------------------------------------

/// Format of [`RecordedMenuEntry::timestamp`].
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One finalized menu in the recording log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedMenuEntry {
    /// Local wall-clock time of recording, formatted with [`TIMESTAMP_FORMAT`].
    pub timestamp: String,
    pub menu: WeeklyMenu,
}
