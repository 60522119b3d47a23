//! Service configuration
//!
//! Plain structs with sensible defaults. The binary fills them from CLI flags;
//! library users construct them directly.

use std::time::Duration;

use crate::cache::{Category, DEFAULT_STORAGE_KEY};
use crate::data::request::DEFAULT_BASE_URL;

/// Pacing delay applied to capital searches by default
pub const DEFAULT_CAPITAL_DELAY: Duration = Duration::from_millis(1100);

/// Artificial delay per cached category
///
/// The delay holds a result back before it reaches the caller. It is a pacing
/// device for the UI, not a timeout or a retry interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDelays {
    pub capital: Option<Duration>,
    pub country: Option<Duration>,
    pub region: Option<Duration>,
}

impl CategoryDelays {
    /// No delay for any category
    pub fn none() -> Self {
        Self {
            capital: None,
            country: None,
            region: None,
        }
    }

    pub fn for_category(&self, category: Category) -> Option<Duration> {
        match category {
            Category::Capital => self.capital,
            Category::Country => self.country,
            Category::Region => self.region,
        }
    }
}

impl Default for CategoryDelays {
    fn default() -> Self {
        Self {
            capital: Some(DEFAULT_CAPITAL_DELAY),
            country: None,
            region: None,
        }
    }
}

/// Settings for a [`QueryService`](crate::service::QueryService)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base URL of the country directory API
    pub base_url: String,
    /// Storage key the cache snapshot is saved and loaded under
    pub storage_key: String,
    /// Per-category pacing delays
    pub delays: CategoryDelays,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            delays: CategoryDelays::default(),
        }
    }
}
