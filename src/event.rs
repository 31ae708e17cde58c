//! The normalized event record every pipeline stage consumes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized sensor or report event.
///
/// The timestamp is typed: inputs with a missing or non-ISO-8601 timestamp
/// are rejected at deserialization, so every event reaching the detectors
/// has a defined ordering. `source` is carried opaquely for provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub entity_id: Option<String>,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub metrics: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub source: serde_json::Value,
}

impl Event {
    /// The value of a named metric, if present.
    pub fn metric(&self, key: &str) -> Option<f64> {
        self.metrics.as_ref().and_then(|m| m.get(key).copied())
    }
}
