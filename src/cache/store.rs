//! In-memory record of the last query per category

use serde::{Deserialize, Serialize};

use crate::data::Country;

/// The three query categories that keep a cached result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Capital,
    Country,
    Region,
}

impl Category {
    /// Returns all categories in display order
    pub fn all() -> &'static [Category] {
        &[Category::Capital, Category::Country, Category::Region]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Category::Capital => "capital",
            Category::Country => "country",
            Category::Region => "region",
        }
    }
}

/// The most recent query of one category and what it returned
///
/// For the region category `term` holds the region's lowercase name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheSlot {
    pub term: String,
    pub countries: Vec<Country>,
}

impl CacheSlot {
    pub fn new(term: impl Into<String>, countries: Vec<Country>) -> Self {
        Self {
            term: term.into(),
            countries,
        }
    }

    /// True for the default slot that no query has written yet
    pub fn is_empty(&self) -> bool {
        self.term.is_empty() && self.countries.is_empty()
    }
}

/// One cached slot per category
///
/// Holds no history: writing a slot replaces whatever was there. The default
/// value is the empty snapshot a fresh install starts from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStore {
    by_capital: CacheSlot,
    by_country: CacheSlot,
    by_region: CacheSlot,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> &CacheSlot {
        match category {
            Category::Capital => &self.by_capital,
            Category::Country => &self.by_country,
            Category::Region => &self.by_region,
        }
    }

    /// Replaces the slot for `category` wholesale
    pub fn set(&mut self, category: Category, slot: CacheSlot) {
        match category {
            Category::Capital => self.by_capital = slot,
            Category::Country => self.by_country = slot,
            Category::Region => self.by_region = slot,
        }
    }

    /// True when every slot is still at its default
    pub fn is_empty(&self) -> bool {
        Category::all().iter().all(|c| self.get(*c).is_empty())
    }
}
