//! Keyword-frequency surge detection over free-text payloads.
//!
//! Counts case-insensitive keyword occurrences per event and flags events
//! whose count exceeds the global mean baseline by a surge factor. The
//! baseline is deliberately global rather than per-entity: a surge is a spike
//! relative to the whole batch of reports.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::detect::stats::Series;
use crate::detect::{normalize_severity, Anomaly, DetectorKind, IdSource};
use crate::event::Event;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordOptions {
    pub keywords: Vec<String>,
    pub surge_factor: f64,
}

impl Default for KeywordOptions {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            surge_factor: 2.0,
        }
    }
}

pub struct KeywordDetector {
    opts: KeywordOptions,
    ids: IdSource,
}

impl KeywordDetector {
    pub fn new(opts: KeywordOptions) -> Self {
        Self::with_ids(opts, IdSource::default())
    }

    pub fn with_ids(opts: KeywordOptions, ids: IdSource) -> Self {
        Self { opts, ids }
    }

    /// Flag events whose keyword count surges above the batch baseline.
    /// No keywords or no events yields an empty result.
    pub fn detect(&self, events: &[Event]) -> Vec<Anomaly> {
        // Empty keywords would match at every character position.
        let keywords: Vec<String> = self
            .opts
            .keywords
            .iter()
            .filter(|k| !k.is_empty())
            .map(|k| k.to_lowercase())
            .collect();
        if events.is_empty() || keywords.is_empty() {
            return Vec::new();
        }

        let counts: Vec<usize> = events
            .iter()
            .map(|event| {
                let text = event.text.as_deref().unwrap_or("").to_lowercase();
                keywords.iter().map(|k| text.matches(k.as_str()).count()).sum()
            })
            .collect();

        let baseline = Series::new(counts.iter().map(|&c| c as f64).collect()).mean();
        let surge_threshold = baseline * self.opts.surge_factor;

        events
            .iter()
            .zip(&counts)
            .filter(|(_, &count)| count as f64 > surge_threshold)
            .map(|(event, &count)| {
                let severity = normalize_severity(count as f64 - baseline, surge_threshold);
                Anomaly {
                    anomaly_id: format!("anom-{}", self.ids.next_id()),
                    source_event_id: event.id.clone(),
                    detector: DetectorKind::TextKeywordSurge,
                    metric: "text".to_string(),
                    score: count as f64,
                    severity,
                    timestamp: event.timestamp,
                    rationale: format!(
                        "Keyword surge detected ({} > baseline {:.2} * factor {})",
                        count, baseline, self.opts.surge_factor
                    ),
                    metadata: json!({
                        "keywordCount": count,
                        "baseline": baseline,
                        "surgeFactor": self.opts.surge_factor,
                    }),
                }
            })
            .collect()
    }
}
