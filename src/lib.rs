//! Country lookups with a persisted last-result cache
//!
//! [`QueryService`] answers searches by capital, country name, region, and
//! ISO code against the REST Countries API. The latest successful result of
//! each search category is kept in a [`CacheStore`] and mirrored to disk so it
//! is available again after a restart.

pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod service;

pub use cache::{
    CacheSlot, CacheStore, Category, FileStore, KeyValueStore, MemoryStore, PersistenceAdapter,
};
pub use config::{CategoryDelays, ServiceConfig};
pub use data::{Country, FetchError, Region, RequestPipeline};
pub use service::QueryService;
