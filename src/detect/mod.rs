//! Anomaly detection: statistical and lexical scoring of normalized events.

pub mod engine;
pub mod keyword;
pub mod numeric;
pub mod stats;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which detector produced an anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectorKind {
    #[serde(rename = "numeric-zscore")]
    NumericZscore,
    #[serde(rename = "text-keyword-surge")]
    TextKeywordSurge,
}

impl fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NumericZscore => "numeric-zscore",
            Self::TextKeywordSurge => "text-keyword-surge",
        };
        f.write_str(s)
    }
}

/// A flagged deviation with score, normalized severity and rationale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    pub anomaly_id: String,
    pub source_event_id: String,
    pub detector: DetectorKind,
    pub metric: String,
    pub score: f64,
    /// Always within [0, 1].
    pub severity: f64,
    pub timestamp: DateTime<Utc>,
    pub rationale: String,
    pub metadata: serde_json::Value,
}

/// Normalize a raw score against a threshold into the [0, 1] severity range.
pub(crate) fn normalize_severity(score: f64, threshold: f64) -> f64 {
    let divisor = if threshold == 0.0 { 1.0 } else { threshold };
    (score / divisor).clamp(0.0, 1.0)
}

/// Injectable anomaly-ID generation.
///
/// Production uses random UUIDs; tests swap in a deterministic sequence so
/// exact output can be asserted.
#[derive(Clone)]
pub struct IdSource(Arc<dyn Fn() -> String + Send + Sync>);

impl IdSource {
    /// Random UUIDv4 identifiers.
    pub fn random() -> Self {
        Self(Arc::new(|| uuid::Uuid::new_v4().to_string()))
    }

    /// Identifiers drawn from an arbitrary generator function.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn next_id(&self) -> String {
        (self.0)()
    }
}

impl Default for IdSource {
    fn default() -> Self {
        Self::random()
    }
}

impl fmt::Debug for IdSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IdSource(..)")
    }
}
