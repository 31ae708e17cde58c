//! Fusion: time-windowing, rule-based correlation and Bayesian confidence.

pub mod bayesian;
pub mod orchestrator;
pub mod rules;
pub mod schema;
pub mod windowing;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FusionError {
    /// A produced bundle failed the output-schema check. Internal invariant
    /// violation; the whole orchestration call aborts with no partial output.
    #[error("fusion bundle for window starting {start} does not match the output schema")]
    SchemaViolation { start: DateTime<Utc> },
}

/// A single `(source, weight)` contribution to the Bayesian odds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
    pub source: String,
    pub weight: f64,
}

/// A fused hypothesis about one entity's anomalies within a window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correlation {
    pub correlation_id: String,
    pub rule_id: String,
    pub involved_event_ids: Vec<String>,
    pub involved_anomaly_ids: Vec<String>,
    pub hypothesis: String,
    pub prior: f64,
    pub likelihood: f64,
    pub posterior: f64,
    pub rationale: String,
    pub bayesian_evidence: Vec<Evidence>,
}

/// Window descriptor carried on each bundle. `end` is exclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSummary {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub event_count: usize,
    pub anomaly_count: usize,
}

/// One time window's worth of correlations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusionBundle {
    pub window: WindowSummary,
    pub correlations: Vec<Correlation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionOptions {
    pub window_minutes: i64,
    pub prior: f64,
}

impl Default for FusionOptions {
    fn default() -> Self {
        Self {
            window_minutes: 5,
            prior: 0.2,
        }
    }
}
