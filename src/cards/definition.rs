//! Card definitions - static card data.
//!
//! A `Card` is immutable reference data loaded from the catalog: a prompt,
//! its category, and the drink cost of declining it. Animation state never
//! lives here; see `deck::ExitView`.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card within a catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card category.
///
/// Catalog files use the German names; English names are accepted too.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Wahrheit", alias = "Truth")]
    Truth,
    #[serde(rename = "Aufgabe", alias = "Task")]
    Task,
    #[serde(rename = "Gruppe", alias = "Group")]
    Group,
    #[serde(rename = "Duell", alias = "Duel")]
    Duel,
    #[serde(rename = "Wildcard")]
    Wildcard,
}

/// Presentation tokens for a category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryStyle {
    /// Theme colour token.
    pub color: &'static str,
    /// Icon name in the shell's icon set.
    pub icon: &'static str,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 5] = [
        Category::Truth,
        Category::Task,
        Category::Group,
        Category::Duel,
        Category::Wildcard,
    ];

    /// Display label as printed on the cards.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Category::Truth => "Wahrheit",
            Category::Task => "Aufgabe",
            Category::Group => "Gruppe",
            Category::Duel => "Duell",
            Category::Wildcard => "Wildcard",
        }
    }

    #[must_use]
    pub const fn style(self) -> CategoryStyle {
        match self {
            Category::Truth => CategoryStyle { color: "category-truth", icon: "message-circle-question" },
            Category::Task => CategoryStyle { color: "category-task", icon: "target" },
            Category::Group => CategoryStyle { color: "category-group", icon: "users" },
            Category::Duel => CategoryStyle { color: "category-duel", icon: "swords" },
            Category::Wildcard => CategoryStyle { color: "category-wildcard", icon: "sparkles" },
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A prompt card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub category: Category,
    pub text: String,
    /// Drink cost of declining the card.
    pub drinks: u32,
}

impl Card {
    #[must_use]
    pub fn new(id: u32, category: Category, text: impl Into<String>, drinks: u32) -> Self {
        Self {
            id: CardId::new(id),
            category,
            text: text.into(),
            drinks,
        }
    }

    /// Free cards have nothing to decline: any positive gesture completes them.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.drinks == 0 || self.category == Category::Wildcard
    }
}
