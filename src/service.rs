//! Country queries with a per-category last-result cache
//!
//! `QueryService` is what presentation code talks to. Each search goes out to
//! the API once; a successful answer replaces that category's cache slot and
//! the whole cache is written to storage before the caller gets the result.
//! Failures reach the caller as an empty list and never touch the cache.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::cache::{CacheSlot, CacheStore, Category, KeyValueStore, PersistenceAdapter};
use crate::config::{CategoryDelays, ServiceConfig};
use crate::data::request::normalize;
use crate::data::{Country, Region, RequestPipeline};

/// Entry point for country lookups
///
/// Operations take `&self` and may run concurrently. Within one category the
/// query that finishes last owns the slot; there is no guard against an older
/// response landing after a newer one.
#[derive(Debug)]
pub struct QueryService {
    pipeline: RequestPipeline,
    cache: Mutex<CacheStore>,
    persistence: PersistenceAdapter,
    delays: CategoryDelays,
}

impl QueryService {
    /// Builds a service from configuration, restoring the cache from `storage`
    pub fn new(config: &ServiceConfig, storage: impl KeyValueStore + 'static) -> Self {
        let persistence = PersistenceAdapter::new(storage, config.storage_key.clone());
        let cache = persistence.load();
        Self::from_parts(
            RequestPipeline::new(config.base_url.clone()),
            cache,
            persistence,
            config.delays,
        )
    }

    /// Builds a service from already constructed parts
    ///
    /// `cache` is used as-is; nothing is loaded from `persistence` here.
    pub fn from_parts(
        pipeline: RequestPipeline,
        cache: CacheStore,
        persistence: PersistenceAdapter,
        delays: CategoryDelays,
    ) -> Self {
        Self {
            pipeline,
            cache: Mutex::new(cache),
            persistence,
            delays,
        }
    }

    /// Returns a copy of the whole cache
    pub fn cache(&self) -> CacheStore {
        self.lock_cache().clone()
    }

    /// Returns a copy of one category's slot
    pub fn slot(&self, category: Category) -> CacheSlot {
        self.lock_cache().get(category).clone()
    }

    /// Looks up a single country by ISO 3166-1 alpha-2 or alpha-3 code
    ///
    /// Uncached and never delayed. Returns `None` both when no country has the
    /// code and when the request fails.
    pub async fn lookup_by_alpha_code(&self, code: &str) -> Option<Country> {
        let url = self.pipeline.endpoint("alpha", code);
        let outcome = self.pipeline.try_fetch(&url, None).await;
        normalize(&url, outcome).into_iter().next()
    }

    /// Searches by capital city name
    pub async fn search_by_capital(&self, term: &str) -> Vec<Country> {
        self.search(Category::Capital, "capital", term).await
    }

    /// Searches by country name
    pub async fn search_by_country_name(&self, term: &str) -> Vec<Country> {
        self.search(Category::Country, "name", term).await
    }

    /// Lists the countries of a region
    pub async fn search_by_region(&self, region: Region) -> Vec<Country> {
        self.search(Category::Region, "region", region.as_str()).await
    }

    async fn search(&self, category: Category, resource: &str, term: &str) -> Vec<Country> {
        let url = self.pipeline.endpoint(resource, term);
        let delay = self.delays.for_category(category);

        match self.pipeline.try_fetch(&url, delay).await {
            Ok(countries) => {
                self.commit(category, CacheSlot::new(term, countries.clone()));
                countries
            }
            Err(err) => normalize(&url, Err(err)),
        }
    }

    /// Replaces one slot and persists the full store
    fn commit(&self, category: Category, slot: CacheSlot) {
        debug!(
            category = category.name(),
            term = %slot.term,
            count = slot.countries.len(),
            "updating cache slot"
        );
        let mut cache = self.lock_cache();
        cache.set(category, slot);
        self.persistence.save(&cache);
    }

    fn lock_cache(&self) -> MutexGuard<'_, CacheStore> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
