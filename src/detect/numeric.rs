//! Per-entity, per-metric numeric anomaly detection.
//!
//! Each metric value is scored against the baseline of its own (entity,
//! metric) series with both a z-score and a MAD-based robust score; the
//! larger of the two decides the threshold and the rationale.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::detect::stats::Series;
use crate::detect::{normalize_severity, Anomaly, DetectorKind, IdSource};
use crate::event::Event;

/// Scale factor turning a MAD into a sigma estimate under normality.
const MAD_TO_SIGMA: f64 = 1.4826;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericOptions {
    pub z_score_threshold: f64,
    pub mad_threshold: f64,
    /// Restrict scoring to these metrics; `None` scores every metric observed.
    pub metric_keys: Option<Vec<String>>,
}

impl Default for NumericOptions {
    fn default() -> Self {
        Self {
            z_score_threshold: 2.5,
            mad_threshold: 3.5,
            metric_keys: None,
        }
    }
}

/// Which scoring branch won for a value. Tagged at computation time so the
/// winner is never re-derived by comparing floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScoreKind {
    ZScore,
    Mad,
}

#[derive(Debug, Clone, Copy)]
struct MetricScore {
    kind: ScoreKind,
    value: f64,
}

impl MetricScore {
    /// Larger score wins; a tie resolves to the z-score branch.
    fn winner(z_score: f64, mad_score: f64) -> Self {
        if z_score >= mad_score {
            Self {
                kind: ScoreKind::ZScore,
                value: z_score,
            }
        } else {
            Self {
                kind: ScoreKind::Mad,
                value: mad_score,
            }
        }
    }
}

pub struct NumericDetector {
    opts: NumericOptions,
    ids: IdSource,
}

impl NumericDetector {
    pub fn new(opts: NumericOptions) -> Self {
        Self::with_ids(opts, IdSource::default())
    }

    pub fn with_ids(opts: NumericOptions, ids: IdSource) -> Self {
        Self { opts, ids }
    }

    /// Score all events and return the deviations that cross a threshold.
    /// Never fails; empty input yields an empty result.
    pub fn detect(&self, events: &[Event]) -> Vec<Anomaly> {
        if events.is_empty() {
            return Vec::new();
        }

        let metrics = self.metric_universe(events);
        let mut anomalies = Vec::new();

        for entity_events in group_by_entity(events) {
            for metric in &metrics {
                let values: Vec<f64> = entity_events
                    .iter()
                    .filter_map(|event| event.metric(metric))
                    .collect();
                if values.is_empty() {
                    continue;
                }

                let series = Series::new(values);
                let mean = series.mean();
                let std_dev = series.std_dev();
                let mad = series.mad();

                for (rank, event) in entity_events.iter().enumerate() {
                    let Some(value) = event.metric(metric) else {
                        continue;
                    };

                    let z_score = if std_dev > 0.0 {
                        (value - mean).abs() / std_dev
                    } else {
                        0.0
                    };
                    let mad_score = if mad > 0.0 {
                        (value - mean).abs() / (mad * MAD_TO_SIGMA)
                    } else {
                        0.0
                    };
                    let score = MetricScore::winner(z_score, mad_score);

                    let (threshold, rationale) = match score.kind {
                        ScoreKind::ZScore => (
                            self.opts.z_score_threshold,
                            format!(
                                "Z-score {:.2} for metric {} (mean {:.2}, std {:.2})",
                                score.value, metric, mean, std_dev
                            ),
                        ),
                        ScoreKind::Mad => (
                            self.opts.mad_threshold,
                            format!(
                                "MAD-based score {:.2} for metric {} (mean {:.2}, MAD {:.2})",
                                score.value, metric, mean, mad
                            ),
                        ),
                    };

                    if score.value > threshold {
                        anomalies.push(Anomaly {
                            anomaly_id: format!("anom-{}", self.ids.next_id()),
                            source_event_id: event.id.clone(),
                            detector: DetectorKind::NumericZscore,
                            metric: metric.clone(),
                            score: score.value,
                            severity: normalize_severity(score.value, threshold * 2.0),
                            timestamp: event.timestamp,
                            rationale,
                            metadata: json!({
                                "baselineMean": mean,
                                "baselineStdDev": std_dev,
                                "baselineMad": mad,
                                "rank": rank,
                            }),
                        });
                    }
                }
            }
        }

        anomalies
    }

    /// Explicit metric keys, or the union of metric names observed across all
    /// events in first-seen order.
    fn metric_universe(&self, events: &[Event]) -> Vec<String> {
        if let Some(keys) = &self.opts.metric_keys {
            return keys.clone();
        }
        let mut seen = HashSet::new();
        let mut universe = Vec::new();
        for event in events {
            if let Some(metrics) = &event.metrics {
                for key in metrics.keys() {
                    if seen.insert(key.clone()) {
                        universe.push(key.clone());
                    }
                }
            }
        }
        universe
    }
}

/// Group events by entity, preserving first-seen entity order. Events without
/// an entity share the "global" baseline.
fn group_by_entity(events: &[Event]) -> Vec<Vec<&Event>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<&Event>> = Vec::new();
    for event in events {
        let key = event.entity_id.as_deref().unwrap_or("global");
        match index.get(key) {
            Some(&i) => groups[i].push(event),
            None => {
                index.insert(key, groups.len());
                groups.push(vec![event]);
            }
        }
    }
    groups
}
