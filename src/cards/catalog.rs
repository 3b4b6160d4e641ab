//! Card catalog and category selection.
//!
//! The `CardCatalog` holds every card the game ships with, in file order.
//! `CategorySelection` is the player's choice of which categories to deal.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::{Card, CardId, Category};
use crate::core::error::{EngineError, Result};

/// Static card list.
///
/// ## Example
///
/// ```
/// use schluck_engine::cards::{CardCatalog, Category};
///
/// let catalog = CardCatalog::from_json(r#"[
///     {"id": 1, "category": "Wahrheit", "text": "Tell a secret", "drinks": 2},
///     {"id": 2, "category": "Wildcard", "text": "New rule", "drinks": 0}
/// ]"#).unwrap();
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.count(Category::Wildcard), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<Card>,
}

impl CardCatalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(cards: Vec<Card>) -> Result<Self> {
        let mut seen = FxHashSet::default();
        for card in &cards {
            if !seen.insert(card.id) {
                return Err(EngineError::DuplicateCard(card.id));
            }
        }
        Ok(Self { cards })
    }

    /// Parse a JSON array of `{id, category, text, drinks}` records.
    pub fn from_json(json: &str) -> Result<Self> {
        let cards: Vec<Card> = serde_json::from_str(json)?;
        Self::new(cards)
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in the given category.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(move |c| c.category == category)
    }

    /// Number of cards in a category.
    #[must_use]
    pub fn count(&self, category: Category) -> usize {
        self.in_category(category).count()
    }

    /// Card counts for every category present in the catalog.
    #[must_use]
    pub fn counts(&self) -> FxHashMap<Category, usize> {
        let mut counts = FxHashMap::default();
        for card in &self.cards {
            *counts.entry(card.category).or_insert(0) += 1;
        }
        counts
    }
}

/// Non-empty set of selected categories.
///
/// Starts with every category selected. Toggling refuses to deselect the
/// last remaining category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySelection {
    selected: SmallVec<[Category; 5]>,
}

impl Default for CategorySelection {
    fn default() -> Self {
        Self::all()
    }
}

impl CategorySelection {
    #[must_use]
    pub fn all() -> Self {
        Self {
            selected: Category::ALL.iter().copied().collect(),
        }
    }

    /// Build a selection from an explicit list.
    pub fn from_categories(categories: &[Category]) -> Result<Self> {
        let mut selected: SmallVec<[Category; 5]> = SmallVec::new();
        for &c in categories {
            if !selected.contains(&c) {
                selected.push(c);
            }
        }
        if selected.is_empty() {
            return Err(EngineError::EmptyCategorySelection);
        }
        selected.sort();
        Ok(Self { selected })
    }

    /// Flip one category. Returns whether it is selected afterwards.
    ///
    /// Deselecting the only selected category is a no-op.
    pub fn toggle(&mut self, category: Category) -> bool {
        if let Some(pos) = self.selected.iter().position(|&c| c == category) {
            if self.selected.len() == 1 {
                return true;
            }
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(category);
            self.selected.sort();
            true
        }
    }

    #[must_use]
    pub fn contains(&self, category: Category) -> bool {
        self.selected.contains(&category)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        self.selected.iter().copied()
    }
}
