//! Core data models for country lookups
//!
//! Countries are passed through from the REST Countries API untouched. The
//! cache and query layers never look inside a record; the accessors here exist
//! for presentation code that wants to print one.

pub mod request;

pub use request::{FetchError, RequestPipeline};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single country record as returned by the remote directory
///
/// Wraps the raw JSON object so that every field the API sends survives a
/// round trip through the persisted cache, including ones this crate has
/// never heard of.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Country(Value);

impl Country {
    /// Wraps a raw JSON record
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Borrows the underlying JSON record
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the wrapper and returns the JSON record
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Common English name (`name.common`)
    pub fn common_name(&self) -> Option<&str> {
        self.0.pointer("/name/common").and_then(Value::as_str)
    }

    /// Official English name (`name.official`)
    pub fn official_name(&self) -> Option<&str> {
        self.0.pointer("/name/official").and_then(Value::as_str)
    }

    /// First listed capital, if the country has one
    pub fn capital(&self) -> Option<&str> {
        self.0.pointer("/capital/0").and_then(Value::as_str)
    }

    pub fn region(&self) -> Option<&str> {
        self.0.get("region").and_then(Value::as_str)
    }

    /// ISO 3166-1 alpha-2 code
    pub fn cca2(&self) -> Option<&str> {
        self.0.get("cca2").and_then(Value::as_str)
    }

    /// ISO 3166-1 alpha-3 code
    pub fn cca3(&self) -> Option<&str> {
        self.0.get("cca3").and_then(Value::as_str)
    }

    pub fn population(&self) -> Option<u64> {
        self.0.get("population").and_then(Value::as_u64)
    }

    /// Flag emoji
    pub fn flag(&self) -> Option<&str> {
        self.0.get("flag").and_then(Value::as_str)
    }
}

/// Geographic regions accepted by the region endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Africa,
    Americas,
    Asia,
    Europe,
    Oceania,
}

impl Region {
    /// Returns all regions in display order
    pub fn all() -> &'static [Region] {
        &[
            Region::Africa,
            Region::Americas,
            Region::Asia,
            Region::Europe,
            Region::Oceania,
        ]
    }

    /// Lowercase name used in request paths and cache terms
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Africa => "africa",
            Region::Americas => "americas",
            Region::Asia => "asia",
            Region::Europe => "europe",
            Region::Oceania => "oceania",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Region::Africa => "Africa",
            Region::Americas => "Americas",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::Oceania => "Oceania",
        }
    }

    /// Parses a region name, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Region> {
        let needle = s.trim().to_lowercase();
        Region::all()
            .iter()
            .copied()
            .find(|region| region.as_str() == needle)
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
