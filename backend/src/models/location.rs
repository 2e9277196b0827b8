//! Dining location records as delivered by the upstream source.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::time::{OpenInterval, WeekTime};

/// A single dining location.
///
/// Only `name` and `times` are interpreted; every other upstream attribute
/// (description, url, coordinates, menus, ...) is carried through untouched in
/// `extra` so the API returns the full record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Opening windows in upstream order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub times: Option<Vec<OpenInterval>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LocationRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            times: Some(Vec::new()),
            extra: Map::new(),
        }
    }

    pub fn with_interval(mut self, interval: OpenInterval) -> Self {
        self.times.get_or_insert_with(Vec::new).push(interval);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn intervals(&self) -> &[OpenInterval] {
        self.times.as_deref().unwrap_or_default()
    }

    /// Case-insensitive substring match on the name.
    ///
    /// `needle_lower` must already be lowercased. A record without a name
    /// never matches.
    pub fn name_contains(&self, needle_lower: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(needle_lower))
    }

    /// Whether any opening window contains `t`.
    pub fn is_open_at(&self, t: WeekTime) -> bool {
        self.intervals().iter().any(|interval| interval.contains(t))
    }
}
