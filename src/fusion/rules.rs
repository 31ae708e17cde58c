//! Rule-based evidence assembly and correlation of a window's anomalies.

use std::collections::HashMap;

use crate::detect::{Anomaly, DetectorKind};
use crate::event::Event;
use crate::fusion::bayesian::compute_confidence;
use crate::fusion::{Correlation, Evidence};

pub const RULE_SINGLE_STREAM: &str = "fusion:single-stream";
pub const RULE_MULTI_MODAL: &str = "fusion:multi-modal";

/// Bonus likelihood ratio when an entity shows both numeric and text anomalies.
const MULTI_MODAL_WEIGHT: f64 = 1.5;
/// Bonus likelihood ratio when an entity has a dense cluster of anomalies.
const DENSITY_WEIGHT: f64 = 1.3;
/// Strictly more than this many anomalies triggers the density bonus.
const DENSITY_MIN_ANOMALIES: usize = 2;

/// Correlate one window's events with the anomalies rooted in them. Groups
/// anomalies per entity, assembles evidence and scores each entity's
/// hypothesis with a Bayesian posterior. Entities without anomalies produce
/// no correlation.
pub fn correlate_window(events: &[Event], anomalies: &[Anomaly], prior: f64) -> Vec<Correlation> {
    if events.is_empty() {
        return Vec::new();
    }

    let mut anomalies_by_event: HashMap<&str, Vec<&Anomaly>> = HashMap::new();
    for anomaly in anomalies {
        anomalies_by_event
            .entry(anomaly.source_event_id.as_str())
            .or_default()
            .push(anomaly);
    }

    let mut correlations = Vec::new();

    for (entity_id, entity_events) in group_by_entity(events) {
        let entity_anomalies: Vec<&Anomaly> = entity_events
            .iter()
            .flat_map(|event| {
                anomalies_by_event
                    .get(event.id.as_str())
                    .into_iter()
                    .flatten()
                    .copied()
            })
            .collect();

        if entity_anomalies.is_empty() {
            continue;
        }

        let mut evidence: Vec<Evidence> = entity_anomalies
            .iter()
            .map(|anomaly| Evidence {
                source: format!("{}:{}", anomaly.detector, anomaly.metric),
                weight: 1.0 + anomaly.severity,
            })
            .collect();

        let has_numeric = entity_anomalies
            .iter()
            .any(|a| a.detector == DetectorKind::NumericZscore);
        let has_text = entity_anomalies
            .iter()
            .any(|a| a.detector == DetectorKind::TextKeywordSurge);

        if has_numeric && has_text {
            evidence.push(Evidence {
                source: "rule:multi-modal".to_string(),
                weight: MULTI_MODAL_WEIGHT,
            });
        }
        if entity_anomalies.len() > DENSITY_MIN_ANOMALIES {
            evidence.push(Evidence {
                source: "rule:density".to_string(),
                weight: DENSITY_WEIGHT,
            });
        }

        let bayes = compute_confidence(prior, evidence);

        correlations.push(Correlation {
            correlation_id: format!(
                "corr-{}-{}",
                entity_id, entity_anomalies[0].source_event_id
            ),
            rule_id: if has_numeric && has_text {
                RULE_MULTI_MODAL.to_string()
            } else {
                RULE_SINGLE_STREAM.to_string()
            },
            involved_event_ids: entity_events.iter().map(|e| e.id.clone()).collect(),
            involved_anomaly_ids: entity_anomalies
                .iter()
                .map(|a| a.anomaly_id.clone())
                .collect(),
            hypothesis: format!(
                "Coordinated anomaly activity detected for entity {}",
                entity_id
            ),
            prior,
            likelihood: bayes.likelihood,
            posterior: bayes.posterior,
            rationale: build_rationale(entity_id, &entity_anomalies, bayes.posterior),
            bayesian_evidence: bayes.evidence,
        });
    }

    correlations
}

/// Group events by entity (default `"unknown"`), preserving first-seen order
/// so correlation IDs are deterministic for a given input order.
fn group_by_entity(events: &[Event]) -> Vec<(&str, Vec<&Event>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&Event>)> = Vec::new();
    for event in events {
        let key = event.entity_id.as_deref().unwrap_or("unknown");
        match index.get(key) {
            Some(&i) => groups[i].1.push(event),
            None => {
                index.insert(key, groups.len());
                groups.push((key, vec![event]));
            }
        }
    }
    groups
}

fn build_rationale(entity_id: &str, anomalies: &[&Anomaly], posterior: f64) -> String {
    let details: Vec<String> = anomalies
        .iter()
        .map(|a| format!("{}({}) severity {:.2}", a.detector, a.metric, a.severity))
        .collect();
    format!(
        "Entity {} shows posterior {:.1}% with contributing anomalies: {}",
        entity_id,
        posterior * 100.0,
        details.join("; ")
    )
}
