//! Runs every detector over a batch of events and merges the results.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::detect::keyword::{KeywordDetector, KeywordOptions};
use crate::detect::numeric::{NumericDetector, NumericOptions};
use crate::detect::{Anomaly, IdSource};
use crate::event::Event;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionOptions {
    pub numeric: NumericOptions,
    pub keyword: KeywordOptions,
}

/// Aggregates the numeric and keyword detectors into a single pass.
pub struct DetectionEngine {
    numeric: NumericDetector,
    keyword: KeywordDetector,
}

impl DetectionEngine {
    pub fn new(opts: DetectionOptions) -> Self {
        Self::with_ids(opts, IdSource::default())
    }

    pub fn with_ids(opts: DetectionOptions, ids: IdSource) -> Self {
        Self {
            numeric: NumericDetector::with_ids(opts.numeric, ids.clone()),
            keyword: KeywordDetector::with_ids(opts.keyword, ids),
        }
    }

    /// Run both detectors and return the combined anomalies in ascending
    /// timestamp order. Never fails; malformed or empty input degrades to an
    /// empty result.
    pub fn detect(&self, events: &[Event]) -> Vec<Anomaly> {
        let mut anomalies = self.numeric.detect(events);
        anomalies.extend(self.keyword.detect(events));
        // Stable sort: ties keep numeric results ahead of keyword results.
        anomalies.sort_by_key(|a| a.timestamp);
        debug!(
            events = events.len(),
            anomalies = anomalies.len(),
            "detection pass complete"
        );
        anomalies
    }
}

/// One-shot detection with fresh random anomaly IDs.
pub fn detect_anomalies(events: &[Event], opts: &DetectionOptions) -> Vec<Anomaly> {
    DetectionEngine::new(opts.clone()).detect(events)
}
