use serde::{Deserialize, Serialize};

use crate::domain::{Category, Difficulty};

/// Sentinel accepted by the selectors to disable a predicate
pub const ALL: &str = "All";

/// One selector of the filter bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection<T> {
    /// Predicate disabled
    All,
    /// Only values equal to this one pass
    Only(T),
    /// A value the catalog does not know about; nothing passes
    Unrecognized(String),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(selected) => selected == value,
            Selection::Unrecognized(_) => false,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl Selection<Category> {
    /// Parse selector input ("All", a category name or its label)
    pub fn parse(s: &str) -> Self {
        if s == ALL {
            return Selection::All;
        }
        Category::parse(s)
            .map(Selection::Only)
            .unwrap_or_else(|| Selection::Unrecognized(s.to_string()))
    }
}

impl Selection<Difficulty> {
    pub fn parse(s: &str) -> Self {
        if s == ALL {
            return Selection::All;
        }
        Difficulty::parse(s)
            .map(Selection::Only)
            .unwrap_or_else(|| Selection::Unrecognized(s.to_string()))
    }
}

/// Active category/difficulty/text selection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub category: Selection<Category>,
    pub difficulty: Selection<Difficulty>,
    pub query: String,
}

impl FilterCriteria {
    /// Build criteria from raw selector strings
    pub fn from_input(category: &str, difficulty: &str, query: impl Into<String>) -> Self {
        Self {
            category: Selection::<Category>::parse(category),
            difficulty: Selection::<Difficulty>::parse(difficulty),
            query: query.into(),
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Selection::Only(category);
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Selection::Only(difficulty);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// True when no predicate is active
    pub fn is_unfiltered(&self) -> bool {
        self.category.is_all() && self.difficulty.is_all() && self.query.is_empty()
    }
}
